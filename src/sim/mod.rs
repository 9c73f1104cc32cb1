//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed step per frame
//! - Seeded RNG only
//! - Table size passed in every tick, never read from the platform
//! - No rendering, audio or storage dependencies

pub mod ai;
pub mod ball;
pub mod geometry;
pub mod paddle;
pub mod state;
pub mod tick;

pub use ball::{deflect, step_ball};
pub use geometry::{Aabb, clamp};
pub use state::{
    Ball, FrameSnapshot, GameEvent, GamePhase, GameState, Paddle, Score, Side, Table,
};
pub use tick::{TickInput, tick};
