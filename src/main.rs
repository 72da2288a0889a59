//! Consulting Chaos entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::HtmlCanvasElement;

    use consulting_chaos::HighScore;
    use consulting_chaos::audio::{AudioManager, SoundEffect};
    use consulting_chaos::input::{InputState, Key};
    use consulting_chaos::renderer::Renderer;
    use consulting_chaos::sim::{GameEvent, GamePhase, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: Option<Renderer>,
        input: InputState,
        audio: AudioManager,
        high_score: HighScore,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let high_score = HighScore::load();
            Self {
                state: GameState::new(seed, high_score.best_level),
                renderer: None,
                input: InputState::new(),
                audio: AudioManager::new(),
                high_score,
            }
        }

        /// Run one simulation tick and react to whatever it produced
        fn update(&mut self) {
            let input = self.input.sample();
            tick(&mut self.state, &input);

            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }
                if let GameEvent::GameOver { new_high_score: true } = event {
                    self.high_score.record(self.state.level);
                    self.high_score.save();
                }
            }
        }

        /// Render the current frame
        fn render(&self, time: f64) {
            if let Some(renderer) = &self.renderer {
                renderer.render(&self.state, time);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.level.to_string()));
            }
            if let Some(el) = document.query_selector("#hud-score .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!("{}/{}", self.state.score, self.state.goal)));
            }
            if let Some(el) = document.query_selector("#hud-sanity .hud-value").ok().flatten() {
                el.set_text_content(Some(&format!("{:.0}", self.state.sanity)));
            }
            if let Some(el) = document.query_selector("#hud-best .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.high_score.best_level.to_string()));
            }

            // Phase overlays
            set_visible(&document, "start-screen", self.state.phase == GamePhase::Idle);
            set_visible(&document, "skip-prompt", self.state.phase == GamePhase::Memorize);
            set_visible(&document, "level-done", self.state.phase == GamePhase::LevelDone);
            set_visible(&document, "game-over", self.state.phase == GamePhase::GameOver);

            if self.state.phase == GamePhase::GameOver {
                if let Some(el) = document.get_element_by_id("final-level") {
                    el.set_text_content(Some(&self.state.level.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-best") {
                    el.set_text_content(Some(&self.high_score.best_level.to_string()));
                }
            }
        }

        /// Reset game state for a fresh run, keeping the loaded record
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed, self.high_score.best_level);
            self.input = InputState::new();
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Consulting Chaos starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().renderer = Renderer::new(&canvas);
        if game.borrow().renderer.is_none() {
            log::error!("Failed to acquire 2d canvas context");
        }

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Consulting Chaos running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                // Audio contexts unlock on the first real key press
                g.audio.resume();

                if let Some(key) = Key::from_browser(&event.key()) {
                    event.prevent_default();
                    g.input.key_down(key);
                    return;
                }
                if event.key() == "Enter" {
                    // Enter doubles for every overlay button
                    match g.state.phase {
                        GamePhase::Idle => g.input.request_start(),
                        GamePhase::Memorize => g.input.request_skip_memorize(),
                        GamePhase::LevelDone => g.input.request_advance_level(),
                        GamePhase::GameOver => {
                            let seed = js_sys::Date::now() as u64;
                            g.restart(seed);
                            g.input.request_start();
                        }
                        GamePhase::Playing => {}
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if let Some(key) = Key::from_browser(&event.key()) {
                    game.borrow_mut().input.key_up(key);
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        // Start button
        if let Some(btn) = document.get_element_by_id("start-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.audio.resume();
                g.input.request_start();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Skip memorize button
        if let Some(btn) = document.get_element_by_id("skip-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.request_skip_memorize();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Next level button
        if let Some(btn) = document.get_element_by_id("next-level-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.request_advance_level();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Restart button (game over screen)
        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                let mut g = game.borrow_mut();
                g.restart(seed);
                g.input.request_start();
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render(time);
            g.update_hud();
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Consulting Chaos (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Run a short headless simulation as a smoke check
    smoke_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_check() {
    use consulting_chaos::sim::{GamePhase, GameState, TickInput, tick};

    let mut state = GameState::new(4242, 0);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );
    assert_eq!(state.phase, GamePhase::Memorize);
    tick(
        &mut state,
        &TickInput {
            skip_memorize: true,
            ..Default::default()
        },
    );
    assert_eq!(state.phase, GamePhase::Playing);

    for _ in 0..600 {
        tick(&mut state, &TickInput::default());
    }
    assert!(!state.clients.is_empty(), "a client should be at the desk");
    println!("✓ Headless simulation ran 600 frames (phase: {:?})", state.phase);
}
