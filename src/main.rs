//! Table Tennis entry point
//!
//! On the web: wires page events to the game and runs the frame loop.
//! Natively: plays a headless match against the CPU and logs the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, MouseEvent};

    use table_tennis::audio::{AudioManager, WebAudioSink};
    use table_tennis::input::InputTracker;
    use table_tennis::persistence::LocalStore;
    use table_tennis::platform::Overlay;
    use table_tennis::platform::dom::DomView;
    use table_tennis::scheduler::{FrameId, FrameScheduler, FrameSource};
    use table_tennis::sim::{GameEvent, GameState};
    use table_tennis::{HighScore, MatchConfig};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        scheduler: FrameScheduler,
        input: InputTracker,
        audio: AudioManager<WebAudioSink>,
        store: LocalStore,
        view: DomView,
    }

    /// `requestAnimationFrame` as a frame source
    struct BrowserFrames<'a>(&'a Rc<RefCell<Game>>);

    impl FrameSource for BrowserFrames<'_> {
        fn request_frame(&mut self) -> Option<FrameId> {
            let window = web_sys::window()?;
            let game = self.0.clone();
            let callback = Closure::once_into_js(move |_time: f64| game_loop(game));
            window.request_animation_frame(callback.unchecked_ref()).ok()
        }

        fn cancel_frame(&mut self, id: FrameId) {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
    }

    impl Game {
        /// Start (or restart) a match with the selected toggles
        fn start(&mut self, frames: &mut BrowserFrames<'_>) {
            self.audio.resume();
            self.scheduler.cancel(frames);

            let config = self.view.selection();
            self.input.clear();

            // Show the table first so it has a size
            self.view.show_overlay(None);
            self.view.show_game(true);
            let table = self.view.table_size();

            self.state.start_match(config, &table);
            self.view.set_mode_labels(&self.state);
            self.view.update_score(&self.state.score);
            self.view.render(&self.state.snapshot());

            self.scheduler.schedule(&self.state, frames);
        }

        fn pause(&mut self, _frames: &mut BrowserFrames<'_>) {
            if self.state.pause() {
                self.view.show_overlay(Some(Overlay::Pause));
            }
        }

        fn resume(&mut self, frames: &mut BrowserFrames<'_>) {
            if self.state.resume() {
                self.view.show_overlay(None);
                self.view.show_game(true);
                self.scheduler.schedule(&self.state, frames);
            }
        }

        fn toggle_pause(&mut self, frames: &mut BrowserFrames<'_>) {
            if self.state.is_paused() {
                self.resume(frames);
            } else {
                self.pause(frames);
            }
        }

        fn quit_to_menu(&mut self, frames: &mut BrowserFrames<'_>) {
            self.state.quit_to_menu();
            self.scheduler.cancel(frames);
            self.input.clear();
            self.view.show_game(false);

            self.state.high_score = HighScore::load(&self.store);
            self.view.set_high_score(self.state.high_score.best());
            self.view.show_overlay(Some(Overlay::Start));
        }

        /// One display refresh
        fn frame(&mut self, frames: &mut BrowserFrames<'_>) {
            let table = self.view.table_size();
            let input = self.input.sample(self.state.config.mode);
            if !self.scheduler.on_frame(&mut self.state, &input, &table, frames) {
                return;
            }

            let events = self.state.take_events();
            self.audio.play_events(&events);
            for event in &events {
                self.handle_event(event);
            }
            self.view.render(&self.state.snapshot());
        }

        fn handle_event(&mut self, event: &GameEvent) {
            match *event {
                GameEvent::WallBounce => {}
                GameEvent::PaddleHit { side, .. } => self.view.flash_paddle_hit(side),
                GameEvent::PointScored { score, .. } => {
                    self.view.update_score(&score);
                    self.view.show_score_flash(&score);
                }
                GameEvent::MatchOver { new_high_score, .. } => {
                    if new_high_score {
                        self.state.high_score.save(&mut self.store);
                    }
                    self.view.show_match_over(&self.state);
                }
            }
        }
    }

    /// Borrow the game for an event handler. Skipped if already borrowed.
    fn with_game(game: &Rc<RefCell<Game>>, f: impl FnOnce(&mut Game, &mut BrowserFrames<'_>)) {
        let mut frames = BrowserFrames(game);
        let Ok(mut g) = game.try_borrow_mut() else {
            log::warn!("Game busy, event dropped");
            return;
        };
        f(&mut *g, &mut frames);
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        with_game(&game, |g, frames| g.frame(frames));
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Table Tennis starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let Some(view) = DomView::new(&document) else {
            log::error!("Page is missing game elements, not starting");
            return;
        };

        let store = LocalStore::new();
        let high_score = HighScore::load(&store);
        view.set_high_score(high_score.best());
        view.setup_toggle_groups();
        view.select(&MatchConfig::default());
        view.show_game(false);
        view.show_overlay(Some(Overlay::Start));

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed, high_score),
            scheduler: FrameScheduler::new(),
            input: InputTracker::new(),
            audio: AudioManager::new(Some(WebAudioSink::new())),
            store,
            view,
        }));

        setup_keyboard(&document, game.clone());
        setup_pointer(&document, game.clone());
        setup_buttons(&document, game.clone());
        setup_auto_pause(game);

        log::info!("Table Tennis ready (seed {})", seed);
    }

    fn setup_keyboard(document: &Document, game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                with_game(&game, |g, frames| {
                    let response = g.input.key_down(&event.key(), g.state.is_running());
                    if response.prevent_default {
                        event.prevent_default();
                    }
                    if response.toggle_pause {
                        g.toggle_pause(frames);
                    }
                });
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            with_game(&game, |g, _| g.input.key_up(&event.key()));
        });
        let _ =
            document.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Mouse steers player 1 over the left part of the table
    fn setup_pointer(document: &Document, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            with_game(&game, |g, _| {
                if !g.state.is_active() {
                    return;
                }
                let pointer = g
                    .view
                    .to_table_coords(event.client_x() as f32, event.client_y() as f32);
                g.input.pointer_move(pointer.x, pointer.y, pointer.width, true);
            });
        });
        let _ = document
            .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        action: fn(&mut Game, &mut BrowserFrames<'_>),
    ) {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("Missing button #{}", id);
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
            with_game(&game, action);
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        on_click(document, "start-btn", game.clone(), Game::start);
        on_click(document, "play-again-btn", game.clone(), Game::start);
        on_click(document, "resume-btn", game.clone(), Game::resume);
        on_click(document, "quit-btn", game.clone(), Game::quit_to_menu);
        on_click(document, "menu-btn", game, Game::quit_to_menu);
    }

    /// Pause when the window loses focus; held keys would otherwise stick
    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            with_game(&game, |g, frames| {
                g.input.clear();
                if g.state.is_active() {
                    g.pause(frames);
                    log::info!("Auto-paused (window blur)");
                }
            });
        });
        let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Table Tennis (native) - headless match against the CPU");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let difficulty = args
        .first()
        .and_then(|s| table_tennis::Difficulty::from_str(s))
        .unwrap_or_default();
    let seed = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(2024);

    demo::run(difficulty, seed);
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use table_tennis::audio::{AudioManager, LogSink};
    use table_tennis::consts::PADDLE_HEIGHT;
    use table_tennis::persistence::MemoryStore;
    use table_tennis::scheduler::{FrameId, FrameScheduler, FrameSource};
    use table_tennis::sim::paddle::PaddleInput;
    use table_tennis::sim::{GameEvent, GamePhase, GameState, Side, Table, TickInput};
    use table_tennis::{Difficulty, GameMode, HighScore, MatchConfig};

    /// Ten minutes at 60 fps
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Frame source that is always ready; the loop below plays the display
    #[derive(Default)]
    struct Ticker {
        next: FrameId,
    }

    impl FrameSource for Ticker {
        fn request_frame(&mut self) -> Option<FrameId> {
            self.next += 1;
            Some(self.next)
        }

        fn cancel_frame(&mut self, _id: FrameId) {}
    }

    /// Player 1 stand-in: hold up/down toward the ball with a small dead zone
    fn autopilot(state: &GameState) -> TickInput {
        let paddle = state.paddle(Side::Left).center_y();
        let ball = state.ball.center_y();
        let dead_zone = PADDLE_HEIGHT / 8.0;
        TickInput {
            left: PaddleInput {
                up: ball < paddle - dead_zone,
                down: ball > paddle + dead_zone,
                pointer_y: None,
            },
            ..Default::default()
        }
    }

    pub fn run(difficulty: Difficulty, seed: u64) {
        let mut store = MemoryStore::new();
        let table = Table::new(800.0, 500.0);
        let config = MatchConfig::new(GameMode::SinglePlayer, difficulty);

        let mut state = GameState::new(seed, HighScore::load(&store));
        let mut audio = AudioManager::new(Some(LogSink));
        let mut scheduler = FrameScheduler::new();
        let mut frames = Ticker::default();

        state.start_match(config, &table);
        scheduler.schedule(&state, &mut frames);

        let mut longest_rally = 0;
        while scheduler.is_scheduled() && scheduler.steps() < MAX_FRAMES {
            let input = autopilot(&state);
            let rally = state.rally_count;
            scheduler.on_frame(&mut state, &input, &table, &mut frames);

            let events = state.take_events();
            audio.play_events(&events);
            for event in events {
                match event {
                    GameEvent::PointScored { side, score } => {
                        longest_rally = longest_rally.max(rally);
                        log::info!("{} scores: {}", state.side_name(side), score);
                    }
                    GameEvent::MatchOver { new_high_score, .. } if new_high_score => {
                        state.high_score.save(&mut store);
                    }
                    _ => {}
                }
            }
        }

        if state.phase == GamePhase::MatchOver {
            println!(
                "{} wins {} after {} frames (longest rally {} hits, high score {})",
                state.winner.map_or("Nobody", |w| state.side_name(w)),
                state.score,
                scheduler.steps(),
                longest_rally,
                state.high_score.best()
            );
        } else {
            println!("No winner after {} frames ({})", scheduler.steps(), state.score);
        }
    }
}
