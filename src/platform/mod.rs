//! Platform abstraction layer
//!
//! The browser page owns layout; this layer only looks up elements, shows
//! and hides overlays, and copies simulation state into them. Text shown to
//! the player is built here so it can be checked natively.

use crate::sim::{GameState, Side};

#[cfg(target_arch = "wasm32")]
pub mod dom;

/// Full-screen overlays. At most one is visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlay {
    Start,
    Pause,
    GameOver,
}

impl Overlay {
    pub const ALL: [Overlay; 3] = [Overlay::Start, Overlay::Pause, Overlay::GameOver];

    /// Element id in the page
    pub fn element_id(&self) -> &'static str {
        match self {
            Overlay::Start => "start-screen",
            Overlay::Pause => "pause-overlay",
            Overlay::GameOver => "gameover-overlay",
        }
    }
}

/// Pointer position relative to the table's on-screen box. `width` is that
/// box's width, so the player-1 region is measured in the same units as `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TablePointer {
    pub x: f32,
    pub y: f32,
    pub width: f32,
}

impl TablePointer {
    /// From page coordinates and the table's bounding rect (left, top, width)
    pub fn from_client(client_x: f32, client_y: f32, left: f32, top: f32, width: f32) -> Self {
        Self {
            x: client_x - left,
            y: client_y - top,
            width,
        }
    }
}

/// Headline for the match-over screen, e.g. "CPU WINS!"
pub fn winner_text(state: &GameState) -> Option<String> {
    state
        .winner
        .map(|side| format!("{} WINS!", state.side_name(side)))
}

/// Names shown above each score
pub fn side_names(state: &GameState) -> (&'static str, &'static str) {
    (state.side_name(Side::Left), state.side_name(Side::Right))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::HighScore;
    use crate::input::InputTracker;
    use crate::settings::{Difficulty, GameMode, MatchConfig};
    use crate::sim::Table;

    #[test]
    fn test_winner_text() {
        let table = Table::new(800.0, 500.0);
        let mut state = GameState::new(1, HighScore::default());
        state.start_match(MatchConfig::new(GameMode::SinglePlayer, Difficulty::Medium), &table);
        assert_eq!(winner_text(&state), None);

        state.winner = Some(Side::Right);
        assert_eq!(winner_text(&state).as_deref(), Some("CPU WINS!"));

        state.start_match(MatchConfig::new(GameMode::TwoPlayer, Difficulty::Medium), &table);
        state.winner = Some(Side::Right);
        assert_eq!(winner_text(&state).as_deref(), Some("PLAYER 2 WINS!"));
        assert_eq!(side_names(&state), ("PLAYER 1", "PLAYER 2"));
    }

    #[test]
    fn test_pointer_region_uses_rect_width() {
        // Table laid out at 800px but drawn 400px wide
        let inside = TablePointer::from_client(330.0, 150.0, 100.0, 50.0, 400.0);
        assert_eq!(inside, TablePointer {
            x: 230.0,
            y: 100.0,
            width: 400.0,
        });

        let mut input = InputTracker::new();
        input.pointer_move(inside.x, inside.y, inside.width, true);
        assert_eq!(input.sample(GameMode::SinglePlayer).left.pointer_y, Some(100.0));

        // 250 of 400 is past the left 60%
        let outside = TablePointer::from_client(350.0, 150.0, 100.0, 50.0, 400.0);
        input.pointer_move(outside.x, outside.y, outside.width, true);
        assert_eq!(input.sample(GameMode::SinglePlayer).left.pointer_y, None);
    }

    #[test]
    fn test_overlay_ids_unique() {
        let ids: std::collections::HashSet<_> =
            Overlay::ALL.iter().map(|o| o.element_id()).collect();
        assert_eq!(ids.len(), Overlay::ALL.len());
    }
}
