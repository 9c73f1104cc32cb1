//! Match settings
//!
//! Mode and difficulty are picked from two toggle groups before a match and
//! stay fixed while it runs. Nothing here is persisted.

/// Who controls the right paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameMode {
    /// Player 1 against the AI
    #[default]
    SinglePlayer,
    /// Two humans on one keyboard
    TwoPlayer,
}

impl GameMode {
    /// Toggle button value
    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::SinglePlayer => "1P",
            GameMode::TwoPlayer => "2P",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "1P" => Some(GameMode::SinglePlayer),
            "2P" => Some(GameMode::TwoPlayer),
            _ => None,
        }
    }

    /// Name shown for the right side
    pub fn opponent_name(&self) -> &'static str {
        match self {
            GameMode::SinglePlayer => "CPU",
            GameMode::TwoPlayer => "PLAYER 2",
        }
    }

    /// HUD control hints (left, right)
    pub fn control_hints(&self) -> (&'static str, &'static str) {
        match self {
            GameMode::SinglePlayer => ("P1: W / S or Mouse", "AI Opponent"),
            GameMode::TwoPlayer => ("P1: W / S", "P2: \u{2191} / \u{2193}"),
        }
    }
}

/// Difficulty preset levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Tuning bundle for this preset
    pub fn profile(&self) -> DifficultyProfile {
        match self {
            Difficulty::Easy => DifficultyProfile {
                ball_speed: 7.0,
                ai_speed: 5.0,
                ai_reaction: 0.5,
            },
            Difficulty::Medium => DifficultyProfile {
                ball_speed: 10.0,
                ai_speed: 8.0,
                ai_reaction: 0.8,
            },
            Difficulty::Hard => DifficultyProfile {
                ball_speed: 13.0,
                ai_speed: 11.0,
                ai_reaction: 1.0,
            },
        }
    }
}

/// Per-difficulty tuning, immutable for the length of a match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DifficultyProfile {
    /// Serve speed, and the speed every rally restarts at (pixels/tick)
    pub ball_speed: f32,
    /// Cap on the AI's speed-limited step (pixels/tick)
    pub ai_speed: f32,
    /// Proportional share of the remaining distance the AI closes per tick
    pub ai_reaction: f32,
}

/// Settings chosen before a match starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchConfig {
    pub mode: GameMode,
    pub difficulty: Difficulty,
}

impl MatchConfig {
    pub fn new(mode: GameMode, difficulty: Difficulty) -> Self {
        Self { mode, difficulty }
    }

    /// Build from raw toggle values. A missing or unknown value falls back
    /// to the default for that group (single-player, medium).
    pub fn from_selection(mode: Option<&str>, difficulty: Option<&str>) -> Self {
        let parsed_mode = mode.and_then(GameMode::from_str);
        let parsed_difficulty = difficulty.and_then(Difficulty::from_str);
        if parsed_mode.is_none() || parsed_difficulty.is_none() {
            log::warn!(
                "Incomplete match selection (mode={:?}, difficulty={:?}), using defaults",
                mode,
                difficulty
            );
        }
        Self {
            mode: parsed_mode.unwrap_or_default(),
            difficulty: parsed_difficulty.unwrap_or_default(),
        }
    }

    pub fn profile(&self) -> DifficultyProfile {
        self.difficulty.profile()
    }
}
