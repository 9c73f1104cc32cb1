//! Human paddle control

use super::state::{Paddle, Table};
use crate::consts::*;

/// Input for one paddle over one tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PaddleInput {
    /// Any "up" key held
    pub up: bool,
    /// Any "down" key held
    pub down: bool,
    /// Fresh pointer sample (table-relative y). Takes priority over keys.
    pub pointer_y: Option<f32>,
}

/// Apply held keys, then the pointer, then clamp onto the table.
///
/// Each held direction moves by `PADDLE_SPEED` once, so holding both cancels.
pub fn apply_input(paddle: &mut Paddle, input: &PaddleInput, table: &Table) {
    if input.up {
        paddle.y -= PADDLE_SPEED;
    }
    if input.down {
        paddle.y += PADDLE_SPEED;
    }
    if let Some(y) = input.pointer_y {
        paddle.y = y - PADDLE_HEIGHT / 2.0;
    }
    paddle.clamp_to(table);
}
