//! Node Burst entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use node_burst::consts::*;
    use node_burst::renderer::{CanvasSurface, Painter, Surface};
    use node_burst::sim::{GamePhase, GameState, TickInput, tick, to_canvas_coords};
    use node_burst::ui::{self, Overlays};
    use node_burst::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        painter: Painter,
        surface: CanvasSurface,
        accumulator: f64,
        last_time: f64,
        input: TickInput,
        last_phase: Option<GamePhase>,
    }

    impl Game {
        fn new(seed: u64, surface: CanvasSurface) -> Self {
            let size = surface.size();
            Self {
                state: GameState::new(seed, Tuning::default(), size),
                painter: Painter::new(seed ^ 0x9e37_79b9, Settings::load()),
                surface,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                last_phase: None,
            }
        }

        /// Run simulation frames for `dt_ms` of wall time
        fn update(&mut self, dt_ms: f64) {
            self.accumulator += dt_ms.min(MAX_FRAME_DELTA_MS);

            let mut substeps = 0;
            while self.accumulator >= FRAME_MS && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input);
                self.accumulator -= FRAME_MS;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.clear();
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            self.painter.draw(&self.state, &mut self.surface);
        }

        /// Push score text and overlay visibility to the DOM
        fn update_hud(&mut self, document: &Document) {
            let events = self.state.drain_events();
            if !events.is_empty() {
                for (id, text) in ui::hud_text(&self.state) {
                    set_text(document, id, &text);
                }
            }

            if self.last_phase != Some(self.state.phase) {
                for (id, visible) in Overlays::for_phase(self.state.phase).entries() {
                    set_visible(document, id, visible);
                }
                if self.state.is_running() {
                    self.fit_to_window();
                }
                self.last_phase = Some(self.state.phase);
            }
        }

        /// Resize the canvas to the window and move the play bounds with it
        fn fit_to_window(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let size = fit_canvas(self.surface.canvas(), &window);
            self.state.set_bounds(size.x, size.y);
        }

        /// Flip a preference and persist it
        fn toggle_setting(&mut self, key: &str) {
            let mut settings = self.painter.settings().clone();
            match key {
                "m" | "M" => settings.reduced_motion = !settings.reduced_motion,
                "p" | "P" => settings.particles = !settings.particles,
                _ => return,
            }
            log::info!(
                "Settings: reduced motion {}, particles {}",
                settings.reduced_motion,
                settings.particles
            );
            settings.save();
            self.painter.set_settings(settings);
        }

        fn push_pointer(&mut self, client: Vec2) {
            let rect = self.surface.canvas().get_bounding_client_rect();
            let origin = Vec2::new(rect.left() as f32, rect.top() as f32);
            self.input.pointers.push(to_canvas_coords(client, origin));
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// Size the canvas backing store from the window, like the page layout
    /// does, so a still-hidden canvas does not report zero
    fn fit_canvas(canvas: &HtmlCanvasElement, window: &web_sys::Window) -> Vec2 {
        let inner = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        let window_size = Vec2::new(inner(window.inner_width()), inner(window.inner_height()));
        let size = ui::playfield_size(window_size);
        canvas.set_width(size.x as u32);
        canvas.set_height(size.y as u32);
        size
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Node Burst starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(ui::ids::CANVAS)
            .ok_or("no canvas")?
            .dyn_into()?;

        let size = fit_canvas(&canvas, &window);

        let seed = js_sys::Date::now() as u64;
        let surface = CanvasSurface::new(canvas.clone())?;
        let game = Rc::new(RefCell::new(Game::new(seed, surface)));

        log::info!("Game initialized with seed: {} ({}x{})", seed, size.x, size.y);

        setup_input_handlers(&canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;

        request_animation_frame(game);

        log::info!("Node Burst running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Mouse
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let client = Vec2::new(event.client_x() as f32, event.client_y() as f32);
                game.borrow_mut().push_pointer(client);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window resize
        {
            let game = game.clone();
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut()>::new(move || {
                game.borrow_mut().fit_to_window();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard preferences
        {
            let game = game.clone();
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().toggle_setting(&event.key());
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch (prevent the emulated mouse event so a tap counts once)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let client = Vec2::new(touch.client_x() as f32, touch.client_y() as f32);
                    game.borrow_mut().push_pointer(client);
                }
            });
            canvas.add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        if let Some(btn) = document.get_element_by_id(ui::ids::START_BUTTON) {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.start = true;
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id(ui::ids::RESTART_BUTTON) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.reset = true;
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
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

            // Calculate delta time
            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                FRAME_MS
            };
            g.last_time = time;

            g.update(dt_ms);
            g.render();
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::collections::HashSet;

    use glam::Vec2;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use node_burst::consts::FRAME_MS;
    use node_burst::sim::{GameEvent, GameState, TickInput, tick};
    use node_burst::{MotionStyle, Tuning};

    /// Frames before the bot gives up on a session (10 minutes)
    const MAX_FRAMES: u64 = 10 * 60 * 60;

    /// How the autoplay bot behaves
    pub struct Bot {
        /// Time a node must be visible before the bot reacts (ms)
        pub reaction_ms: f64,
        /// Chance the bot misses a node it reacts to
        pub miss_chance: f64,
    }

    pub struct Outcome {
        pub score: u32,
        pub escaped: u32,
        pub frames: u64,
        pub final_interval_ms: f64,
    }

    /// Play one seeded session without a display
    pub fn autoplay(seed: u64, tuning: Tuning, bot: &Bot) -> Outcome {
        let mut state = GameState::new(seed, tuning, Vec2::new(800.0, 600.0));
        let mut rng = Pcg32::seed_from_u64(seed.wrapping_add(1));
        let mut decided: HashSet<u32> = HashSet::new();
        let mut input = TickInput {
            start: true,
            ..Default::default()
        };

        while state.frame < MAX_FRAMES {
            tick(&mut state, &input);
            input.clear();

            for event in state.drain_events() {
                match event {
                    GameEvent::SpawnIntervalChanged { interval_ms } => {
                        log::debug!("Difficulty up: {} ms", interval_ms);
                    }
                    GameEvent::GameOver { score } => {
                        log::info!("Bot finished with {} points", score);
                    }
                    _ => {}
                }
            }
            if !state.is_running() {
                break;
            }

            for node in &state.nodes {
                if decided.contains(&node.id) || state.now_ms - node.created_at_ms < bot.reaction_ms {
                    continue;
                }
                decided.insert(node.id);
                // A miss lands in the corner, which the spawn margin keeps empty
                let aim = if rng.random_bool(bot.miss_chance) {
                    Vec2::ZERO
                } else {
                    node.pos
                };
                input.pointers.push(aim);
            }
        }

        Outcome {
            score: state.score,
            escaped: state.escaped,
            frames: state.frame,
            final_interval_ms: state.spawn_interval_ms,
        }
    }

    pub fn load_tuning(path: Option<String>) -> Tuning {
        let Some(path) = path else {
            return Tuning::default();
        };
        match std::fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::error!("Bad tuning file {}: {}", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::error!("Cannot read {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    /// Override the motion style from a command-line word
    pub fn with_motion(mut tuning: Tuning, arg: Option<String>) -> Tuning {
        if let Some(arg) = arg {
            match MotionStyle::from_str(&arg) {
                Some(motion) => tuning.motion = motion,
                None => log::warn!("Unknown motion style '{}', keeping {}", arg, tuning.motion.as_str()),
            }
        }
        log::info!("Motion style: {}", tuning.motion.as_str());
        tuning
    }

    pub fn seconds(frames: u64) -> f64 {
        frames as f64 * FRAME_MS / 1000.0
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Node Burst (native) starting...");
    log::info!("Native mode runs a headless autoplay session - use the web build to play");

    let mut args = std::env::args().skip(1);
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let tuning = headless::load_tuning(args.next());
    let tuning = headless::with_motion(tuning, args.next());

    let bot = headless::Bot {
        reaction_ms: 450.0,
        miss_chance: 0.08,
    };
    let outcome = headless::autoplay(seed, tuning, &bot);

    println!(
        "seed {}: score {}, escaped {}, survived {:.1}s, spawn interval {} ms",
        seed,
        outcome.score,
        outcome.escaped,
        headless::seconds(outcome.frames),
        outcome.final_interval_ms
    );
}
