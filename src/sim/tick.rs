//! Per-frame simulation step
//!
//! Paddles move first (humans, then the AI), then the ball. A point ends the
//! rally: the scorer is credited, then either the match ends or the ball is
//! served at base speed toward the side that lost the point.

use super::ai;
use super::ball::step_ball;
use super::paddle::{PaddleInput, apply_input};
use super::state::{GameEvent, GamePhase, GameState, Side, Table};
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Player 1
    pub left: PaddleInput,
    /// Player 2 (ignored when the CPU plays the right side)
    pub right: PaddleInput,
}

/// Advance the match by one step. Does nothing unless playing.
pub fn tick(state: &mut GameState, input: &TickInput, table: &Table) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    apply_input(state.paddle_mut(Side::Left), &input.left, table);
    if state.right_is_cpu() {
        let profile = state.profile;
        ai::drive(&mut state.paddles[Side::Right.index()], &state.ball, &profile, table);
    } else {
        apply_input(state.paddle_mut(Side::Right), &input.right, table);
    }

    let step = step_ball(&mut state.ball, &state.paddles, table);

    if step.wall_bounce {
        state.events.push(GameEvent::WallBounce);
    }
    if let Some(side) = step.paddle_hit {
        state.rally_count += 1;
        state.events.push(GameEvent::PaddleHit {
            side,
            speed: state.ball.current_speed,
        });
    }
    if let Some(scorer) = step.scored {
        award_point(state, scorer, table);
    }
}

/// Credit a point and either end the match or serve the next rally
pub fn award_point(state: &mut GameState, scorer: Side, table: &Table) {
    state.score.point(scorer);
    state.events.push(GameEvent::PointScored {
        side: scorer,
        score: state.score,
    });
    log::debug!(
        "{} scores after {} hits ({})",
        state.side_name(scorer),
        state.rally_count,
        state.score
    );

    match state.score.winner(WIN_SCORE) {
        Some(winner) => {
            state.phase = GamePhase::MatchOver;
            state.winner = Some(winner);
            let new_high_score = state.high_score.record(state.score.get(winner));
            state.events.push(GameEvent::MatchOver {
                winner,
                score: state.score,
                new_high_score,
            });
            log::info!(
                "{} wins {} (high score {})",
                state.side_name(winner),
                state.score,
                state.high_score.best()
            );
        }
        None => state.serve(scorer.opponent(), table),
    }
}
