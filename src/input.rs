//! Input sampling
//!
//! Key and pointer events arrive whenever the browser delivers them; they
//! only update this tracker. The frame loop samples it once per tick, which
//! keeps the simulation step deterministic.

use std::collections::HashSet;

use crate::consts::POINTER_REGION;
use crate::settings::GameMode;
use crate::sim::TickInput;
use crate::sim::paddle::PaddleInput;

/// Keys the game cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    S,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Escape,
}

impl Key {
    /// Map a `KeyboardEvent.key` value
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "w" | "W" => Some(Key::W),
            "s" | "S" => Some(Key::S),
            "ArrowUp" => Some(Key::ArrowUp),
            "ArrowDown" => Some(Key::ArrowDown),
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            "Escape" => Some(Key::Escape),
            _ => None,
        }
    }

    fn is_arrow(self) -> bool {
        matches!(
            self,
            Key::ArrowUp | Key::ArrowDown | Key::ArrowLeft | Key::ArrowRight
        )
    }
}

/// What the platform should do with a key-down event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyResponse {
    /// Swallow the browser default (page scrolling)
    pub prevent_default: bool,
    /// Flip pause/resume
    pub toggle_pause: bool,
}

/// Held keys and the latest pointer sample
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    held: HashSet<Key>,
    pointer_y: Option<f32>,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. `running` is true while a match is in progress
    /// (paused or not).
    pub fn key_down(&mut self, name: &str, running: bool) -> KeyResponse {
        let Some(key) = Key::from_key_name(name) else {
            return KeyResponse::default();
        };
        self.held.insert(key);

        KeyResponse {
            prevent_default: running && (key == Key::Escape || key.is_arrow()),
            toggle_pause: running && key == Key::Escape,
        }
    }

    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_key_name(name) {
            self.held.remove(&key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Record pointer movement in table coordinates. Ignored unless the
    /// match is playing and the pointer is over the left part of the table.
    pub fn pointer_move(&mut self, x: f32, y: f32, table_width: f32, active: bool) {
        if !active || x > table_width * POINTER_REGION {
            return;
        }
        self.pointer_y = Some(y);
    }

    /// Forget everything (new match, focus loss)
    pub fn clear(&mut self) {
        self.held.clear();
        self.pointer_y = None;
    }

    /// Build this tick's input. The pointer sample is consumed.
    ///
    /// W/S always drive player 1. The arrows drive player 1 too in
    /// single-player, player 2 otherwise.
    pub fn sample(&mut self, mode: GameMode) -> TickInput {
        let ws_up = self.is_held(Key::W);
        let ws_down = self.is_held(Key::S);
        let arrow_up = self.is_held(Key::ArrowUp);
        let arrow_down = self.is_held(Key::ArrowDown);
        let pointer_y = self.pointer_y.take();

        match mode {
            GameMode::SinglePlayer => TickInput {
                left: PaddleInput {
                    up: ws_up || arrow_up,
                    down: ws_down || arrow_down,
                    pointer_y,
                },
                right: PaddleInput::default(),
            },
            GameMode::TwoPlayer => TickInput {
                left: PaddleInput {
                    up: ws_up,
                    down: ws_down,
                    pointer_y,
                },
                right: PaddleInput {
                    up: arrow_up,
                    down: arrow_down,
                    pointer_y: None,
                },
            },
        }
    }
}
