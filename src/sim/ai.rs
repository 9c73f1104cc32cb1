//! CPU opponent for the right paddle
//!
//! Direct tracking only: the AI looks at where the ball is and which way it
//! is heading, never where it will be.

use super::state::{Ball, Paddle, Side, Table};
use crate::consts::*;
use crate::settings::DifficultyProfile;

/// Vertical movement for the AI paddle this tick.
///
/// Ball incoming: close `ai_reaction` of the gap plus a step capped at
/// `ai_speed`. Ball outgoing: drift slowly back to the middle.
pub fn ai_move(paddle: &Paddle, ball: &Ball, profile: &DifficultyProfile, table: &Table) -> f32 {
    if ball.moving_toward(paddle.side) {
        let target = ball.center_y() - PADDLE_HEIGHT / 2.0;
        let diff = target - paddle.y;
        diff * profile.ai_reaction + diff.signum() * diff.abs().min(profile.ai_speed)
    } else {
        let center = table.height / 2.0 - PADDLE_HEIGHT / 2.0;
        (center - paddle.y) * AI_IDLE_DRIFT
    }
}

/// Move the AI paddle and keep it on the table
pub fn drive(paddle: &mut Paddle, ball: &Ball, profile: &DifficultyProfile, table: &Table) {
    debug_assert_eq!(paddle.side, Side::Right);
    paddle.y += ai_move(paddle, ball, profile, table);
    paddle.clamp_to(table);
}
