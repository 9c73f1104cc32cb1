//! Table Tennis - single-screen arcade table tennis
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, AI, match rules)
//! - `scheduler`: Frame scheduling gated by running/paused state
//! - `input`: Held-key and pointer sampling into per-tick input
//! - `audio`: Procedural sound cues
//! - `persistence`: Key/value storage (LocalStorage on web)
//! - `platform`: Browser DOM glue

pub mod audio;
pub mod highscore;
pub mod input;
pub mod persistence;
pub mod platform;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use highscore::HighScore;
pub use settings::{Difficulty, DifficultyProfile, GameMode, MatchConfig};

/// Game configuration constants
pub mod consts {
    /// First side to reach this many points wins the match
    pub const WIN_SCORE: u32 = 7;

    /// Paddle geometry (pixels)
    pub const PADDLE_HEIGHT: f32 = 80.0;
    pub const PADDLE_WIDTH: f32 = 14.0;
    /// Gap between a paddle and its table edge
    pub const PADDLE_MARGIN: f32 = 12.0;
    /// Human paddle movement per tick, per held direction
    pub const PADDLE_SPEED: f32 = 6.0;

    /// Ball bounding box edge length
    pub const BALL_SIZE: f32 = 16.0;
    /// Speed added on every paddle hit (pixels/tick)
    pub const SPEED_INCREMENT: f32 = 0.3;
    /// Rally speed ceiling. Kept below PADDLE_WIDTH + BALL_SIZE so a single
    /// step can never carry the ball through a paddle.
    pub const MAX_BALL_SPEED: f32 = 28.0;

    /// Steepest deflection off a paddle edge (radians, 60°)
    pub const MAX_DEFLECTION: f32 = std::f32::consts::FRAC_PI_3;
    /// Serve angle range either side of horizontal (radians, 30°)
    pub const SERVE_SPREAD: f32 = std::f32::consts::FRAC_PI_6;

    /// AI drift rate back toward center while the ball moves away
    pub const AI_IDLE_DRIFT: f32 = 0.02;

    /// Pointer only steers player 1 over this fraction of the table (from the left)
    pub const POINTER_REGION: f32 = 0.6;
}
