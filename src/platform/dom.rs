//! Browser DOM glue
//!
//! Element lookup happens once at startup. Everything after that is plain
//! attribute, class and style writes; a failed write is ignored.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement};

use super::{Overlay, TablePointer, side_names, winner_text};
use crate::settings::MatchConfig;
use crate::sim::{FrameSnapshot, GameState, Score, Side, Table};

/// How long the score flash stays up (ms)
const SCORE_FLASH_MS: i32 = 700;
/// Ball pulse after a paddle hit (ms)
const BALL_PULSE_MS: i32 = 200;
/// Paddle glow after a hit (ms)
const PADDLE_FLASH_MS: i32 = 150;

fn by_id(document: &Document, id: &str) -> Option<Element> {
    let el = document.get_element_by_id(id);
    if el.is_none() {
        log::error!("Missing element #{}", id);
    }
    el
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    by_id(document, id)?.dyn_into::<HtmlElement>().ok()
}

/// Run `f` once after `ms` milliseconds
fn after(ms: i32, f: impl FnOnce() + 'static) {
    let Some(window) = web_sys::window() else { return };
    let callback = Closure::once_into_js(f);
    let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
        callback.unchecked_ref(),
        ms,
    );
}

/// Add `class` now and remove it after `ms`
fn flash_class(el: &Element, class: &'static str, ms: i32) {
    let _ = el.class_list().add_1(class);
    let el = el.clone();
    after(ms, move || {
        let _ = el.class_list().remove_1(class);
    });
}

fn set_hidden(el: &Element, hidden: bool) {
    let _ = el.class_list().toggle_with_force("hidden", hidden);
}

fn set_text(el: &Element, text: &str) {
    el.set_text_content(Some(text));
}

/// Buttons inside a toggle group
fn toggle_buttons(group: &Element) -> Vec<Element> {
    let Ok(list) = group.query_selector_all(".toggle-btn") else {
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Handles to every element the game touches
pub struct DomView {
    overlays: Vec<(Overlay, Element)>,
    game_container: Element,
    table: HtmlElement,
    ball: HtmlElement,
    paddles: [HtmlElement; 2],
    score_flash: HtmlElement,
    scores: [Element; 2],
    names: [Element; 2],
    controls: [Element; 2],
    winner_text: Element,
    final_score_text: Element,
    high_score_value: Element,
    gameover_high_score: Element,
    mode_toggle: Element,
    difficulty_toggle: Element,
}

impl DomView {
    /// Look up all elements. None if the page is missing any of them.
    pub fn new(document: &Document) -> Option<Self> {
        let mut overlays = Vec::with_capacity(Overlay::ALL.len());
        for overlay in Overlay::ALL {
            overlays.push((overlay, by_id(document, overlay.element_id())?));
        }

        Some(Self {
            overlays,
            game_container: by_id(document, "game-container")?,
            table: html_by_id(document, "ping-pong-table")?,
            ball: html_by_id(document, "ball")?,
            paddles: [
                html_by_id(document, "paddle-left")?,
                html_by_id(document, "paddle-right")?,
            ],
            score_flash: html_by_id(document, "score-flash")?,
            scores: [by_id(document, "p1-score")?, by_id(document, "p2-score")?],
            names: [by_id(document, "p1-name")?, by_id(document, "p2-name")?],
            controls: [
                by_id(document, "p1-controls")?,
                by_id(document, "p2-controls")?,
            ],
            winner_text: by_id(document, "winner-text")?,
            final_score_text: by_id(document, "final-score-text")?,
            high_score_value: by_id(document, "high-score-value")?,
            gameover_high_score: by_id(document, "gameover-high-score")?,
            mode_toggle: by_id(document, "mode-toggle")?,
            difficulty_toggle: by_id(document, "difficulty-toggle")?,
        })
    }

    /// Current table size (the page may have been resized)
    pub fn table_size(&self) -> Table {
        Table::new(
            self.table.client_width() as f32,
            self.table.client_height() as f32,
        )
    }

    /// Convert page coordinates to table coordinates
    pub fn to_table_coords(&self, client_x: f32, client_y: f32) -> TablePointer {
        let rect = self.table.get_bounding_client_rect();
        TablePointer::from_client(
            client_x,
            client_y,
            rect.left() as f32,
            rect.top() as f32,
            rect.width() as f32,
        )
    }

    /// Show one overlay (or none) and hide the others
    pub fn show_overlay(&self, overlay: Option<Overlay>) {
        for (kind, el) in &self.overlays {
            set_hidden(el, Some(*kind) != overlay);
        }
    }

    pub fn show_game(&self, visible: bool) {
        set_hidden(&self.game_container, !visible);
    }

    /// Copy ball and paddle positions into the page
    pub fn render(&self, frame: &FrameSnapshot) {
        let ball = self.ball.style();
        let _ = ball.set_property("left", &format!("{}px", frame.ball.x));
        let _ = ball.set_property("top", &format!("{}px", frame.ball.y));
        for (el, y) in self.paddles.iter().zip(frame.paddles) {
            let _ = el.style().set_property("top", &format!("{}px", y));
        }
    }

    pub fn update_score(&self, score: &Score) {
        set_text(&self.scores[0], &score.left.to_string());
        set_text(&self.scores[1], &score.right.to_string());
    }

    /// HUD names and control hints for a new match
    pub fn set_mode_labels(&self, state: &GameState) {
        let (left, right) = side_names(state);
        set_text(&self.names[0], left);
        set_text(&self.names[1], right);
        let (left_hint, right_hint) = state.config.mode.control_hints();
        set_text(&self.controls[0], left_hint);
        set_text(&self.controls[1], right_hint);
    }

    /// Big "p1 - p2" flash across the table
    pub fn show_score_flash(&self, score: &Score) {
        let el = &self.score_flash;
        set_text(el, &score.to_string());
        set_hidden(el, false);
        // Restart the CSS animation
        let style = el.style();
        let _ = style.set_property("animation", "none");
        let _ = el.offset_height();
        let _ = style.remove_property("animation");

        let el = el.clone();
        after(SCORE_FLASH_MS, move || set_hidden(&el, true));
    }

    pub fn flash_paddle_hit(&self, side: Side) {
        flash_class(&self.ball, "pulse", BALL_PULSE_MS);
        flash_class(&self.paddles[side.index()], "hit", PADDLE_FLASH_MS);
    }

    /// Fill in and show the match-over overlay
    pub fn show_match_over(&self, state: &GameState) {
        if let Some(text) = winner_text(state) {
            set_text(&self.winner_text, &text);
        }
        set_text(&self.final_score_text, &state.score.to_string());
        set_text(&self.gameover_high_score, &state.high_score.best().to_string());
        self.show_overlay(Some(Overlay::GameOver));
    }

    /// High score on the start screen
    pub fn set_high_score(&self, best: u32) {
        set_text(&self.high_score_value, &best.to_string());
    }

    /// Make each toggle group behave like radio buttons
    pub fn setup_toggle_groups(&self) {
        for group in [&self.mode_toggle, &self.difficulty_toggle] {
            let buttons = toggle_buttons(group);
            for button in &buttons {
                let all = buttons.clone();
                let me = button.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    for b in &all {
                        let _ = b.class_list().remove_1("active");
                    }
                    let _ = me.class_list().add_1("active");
                });
                let _ = button
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Read the active toggles
    pub fn selection(&self) -> MatchConfig {
        let active = |group: &Element| {
            group
                .query_selector(".toggle-btn.active")
                .ok()
                .flatten()
                .and_then(|b| b.get_attribute("data-value"))
        };
        let mode = active(&self.mode_toggle);
        let difficulty = active(&self.difficulty_toggle);
        MatchConfig::from_selection(mode.as_deref(), difficulty.as_deref())
    }

    /// Mark the toggles matching `config` active
    pub fn select(&self, config: &MatchConfig) {
        let groups = [
            (&self.mode_toggle, config.mode.as_str()),
            (&self.difficulty_toggle, config.difficulty.as_str()),
        ];
        for (group, value) in groups {
            for button in toggle_buttons(group) {
                let on = button.get_attribute("data-value").as_deref() == Some(value);
                let _ = button.class_list().toggle_with_force("active", on);
            }
        }
    }
}
