//! Game state and core simulation types
//!
//! One struct owns everything a match touches. The platform layer only
//! reads it (snapshots, events) and drives it through the transition
//! methods here and `tick`.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::geometry::{Aabb, clamp};
use crate::consts::*;
use crate::highscore::HighScore;
use crate::settings::{DifficultyProfile, GameMode, MatchConfig};

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Menu, no match running
    Idle,
    /// Active rally
    Playing,
    /// Simulation suspended, resumable
    Paused,
    /// A side reached the win score
    MatchOver,
}

/// Table side. Left is player 1, right is player 2 or the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Sign of x velocity for a ball travelling toward this side
    #[inline]
    pub fn direction(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Live table size in pixels, re-read every frame since the page may resize
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Table {
    pub width: f32,
    pub height: f32,
}

impl Table {
    /// Degenerate sizes are raised to one pixel
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(1.0),
            height: height.max(1.0),
        }
    }
}

/// The ball. `pos` is the top-left corner of its box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    /// Velocity magnitude, kept equal to `vel.length()`
    pub current_speed: f32,
}

impl Ball {
    pub fn new(speed: f32) -> Self {
        Self {
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: BALL_SIZE,
            current_speed: speed,
        }
    }

    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.pos.y + self.size / 2.0
    }

    /// True if the ball is travelling toward `side`
    #[inline]
    pub fn moving_toward(&self, side: Side) -> bool {
        self.vel.x * side.direction() > 0.0
    }
}

/// A paddle. Only `y` moves; x is derived from the side and table width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    /// Top edge
    pub y: f32,
}

impl Paddle {
    pub fn new(side: Side) -> Self {
        Self { side, y: 0.0 }
    }

    /// Left edge for the given table
    pub fn x(&self, table: &Table) -> f32 {
        match self.side {
            Side::Left => PADDLE_MARGIN,
            Side::Right => table.width - PADDLE_MARGIN - PADDLE_WIDTH,
        }
    }

    pub fn aabb(&self, table: &Table) -> Aabb {
        Aabb::new(self.x(table), self.y, PADDLE_WIDTH, PADDLE_HEIGHT)
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        self.y + PADDLE_HEIGHT / 2.0
    }

    /// Move to vertical center
    pub fn center_on(&mut self, table: &Table) {
        self.y = table.height / 2.0 - PADDLE_HEIGHT / 2.0;
    }

    /// Keep the paddle fully on the table
    pub fn clamp_to(&mut self, table: &Table) {
        self.y = clamp(self.y, 0.0, table.height - PADDLE_HEIGHT);
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub left: u32,
    pub right: u32,
}

impl Score {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub fn point(&mut self, side: Side) {
        match side {
            Side::Left => self.left += 1,
            Side::Right => self.right += 1,
        }
    }

    /// The side that has reached `target`, if any
    pub fn winner(&self, target: u32) -> Option<Side> {
        if self.left >= target {
            Some(Side::Left)
        } else if self.right >= target {
            Some(Side::Right)
        } else {
            None
        }
    }

    /// Higher of the two scores (the winner's, once a match ends)
    pub fn best(&self) -> u32 {
        self.left.max(self.right)
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} - {}", self.left, self.right)
    }
}

/// Things that happened during a tick, drained by the platform for sound
/// and overlays
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// Ball bounced off the top or bottom edge
    WallBounce,
    /// Ball was returned by a paddle
    PaddleHit { side: Side, speed: f32 },
    /// A side won the rally
    PointScored { side: Side, score: Score },
    /// A side reached the win score
    MatchOver {
        winner: Side,
        score: Score,
        new_high_score: bool,
    },
}

/// Read-only view handed to the renderer each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    /// Ball top-left corner
    pub ball: Vec2,
    /// Paddle top edges (left, right)
    pub paddles: [f32; 2],
    pub score: Score,
}

/// Complete match state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Current phase
    pub phase: GamePhase,
    /// Selection the current match was started with
    pub config: MatchConfig,
    /// Tuning derived from `config` at match start
    pub profile: DifficultyProfile,
    pub ball: Ball,
    /// Indexed by `Side::index`
    pub paddles: [Paddle; 2],
    pub score: Score,
    /// Paddle hits since the last serve
    pub rally_count: u32,
    /// Set when the match ends
    pub winner: Option<Side>,
    /// Best winning score seen so far (persisted by the platform)
    pub high_score: HighScore,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Pending events since the last drain
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create an idle state. The seed drives serve angles.
    pub fn new(seed: u64, high_score: HighScore) -> Self {
        let config = MatchConfig::default();
        let profile = config.profile();
        Self {
            phase: GamePhase::Idle,
            config,
            profile,
            ball: Ball::new(profile.ball_speed),
            paddles: [Paddle::new(Side::Left), Paddle::new(Side::Right)],
            score: Score::default(),
            rally_count: 0,
            winner: None,
            high_score,
            time_ticks: 0,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        &self.paddles[side.index()]
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        &mut self.paddles[side.index()]
    }

    /// Match in progress, paused or not
    pub fn is_running(&self) -> bool {
        matches!(self.phase, GamePhase::Playing | GamePhase::Paused)
    }

    pub fn is_paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    /// Running and not paused: the only phase in which ticks do anything
    pub fn is_active(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Start a fresh match from `config`. Valid from any phase.
    pub fn start_match(&mut self, config: MatchConfig, table: &Table) {
        self.config = config;
        self.profile = config.profile();
        self.score = Score::default();
        self.rally_count = 0;
        self.winner = None;
        self.events.clear();
        for paddle in &mut self.paddles {
            paddle.center_on(table);
        }
        self.serve(Side::Right, table);
        self.phase = GamePhase::Playing;
        log::info!(
            "Match started: {} / {}",
            config.mode.as_str(),
            config.difficulty.as_str()
        );
    }

    /// Put the ball in the middle of the table heading toward `toward`,
    /// at a random angle within the serve spread and at the base speed
    pub fn serve(&mut self, toward: Side, table: &Table) {
        let ball = &mut self.ball;
        ball.current_speed = self.profile.ball_speed;
        ball.pos = Vec2::new(
            table.width / 2.0 - ball.size / 2.0,
            table.height / 2.0 - ball.size / 2.0,
        );
        let angle: f32 = self.rng.random_range(-SERVE_SPREAD..=SERVE_SPREAD);
        let speed = ball.current_speed;
        ball.vel = Vec2::new(toward.direction() * angle.cos(), angle.sin()) * speed;
        self.rally_count = 0;
    }

    /// Playing -> Paused. Returns false if not playing.
    pub fn pause(&mut self) -> bool {
        if self.phase != GamePhase::Playing {
            return false;
        }
        self.phase = GamePhase::Paused;
        log::info!("Paused");
        true
    }

    /// Paused -> Playing. Returns false if not paused.
    pub fn resume(&mut self) -> bool {
        if self.phase != GamePhase::Paused {
            return false;
        }
        self.phase = GamePhase::Playing;
        log::info!("Resumed");
        true
    }

    /// Flip between Playing and Paused
    pub fn toggle_pause(&mut self) -> bool {
        if self.is_paused() {
            self.resume()
        } else {
            self.pause()
        }
    }

    /// Abandon the current match (or leave the match-over screen)
    pub fn quit_to_menu(&mut self) {
        if self.phase != GamePhase::Idle {
            log::info!("Back to menu (score {})", self.score);
        }
        self.phase = GamePhase::Idle;
    }

    /// Take all events raised since the last call
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            ball: self.ball.pos,
            paddles: [self.paddles[0].y, self.paddles[1].y],
            score: self.score,
        }
    }

    /// Display name for a side under the current mode
    pub fn side_name(&self, side: Side) -> &'static str {
        match side {
            Side::Left => "PLAYER 1",
            Side::Right => self.config.mode.opponent_name(),
        }
    }

    /// Whether the right paddle is driven by the AI
    pub fn right_is_cpu(&self) -> bool {
        self.config.mode == GameMode::SinglePlayer
    }
}
