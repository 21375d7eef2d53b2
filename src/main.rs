//! Heartstring entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{HtmlCanvasElement, HtmlElement, HtmlVideoElement};

    use heartstring::Settings;
    use heartstring::platform::assets::{self, SharedAssets};
    use heartstring::platform::{AssetTable, EdgeTracker, FrameClock, KeyboardState};
    use heartstring::renderer::{CanvasRenderer, SceneOptions, build_scene, decoration_scene};
    use heartstring::sim::{GameEvent, GameState, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        assets: SharedAssets,
        clock: FrameClock,
        keys: KeyboardState,
        edges: EdgeTracker,
        scene: SceneOptions,
        running: bool,
        canvas: HtmlCanvasElement,
        video: Option<HtmlVideoElement>,
    }

    impl Game {
        /// Run one simulation tick and react to what it raised
        fn update(&mut self, dt: f32) {
            let input = self.keys.sample(&mut self.edges);
            tick(&mut self.state, &input, dt);

            for event in self.state.drain_events() {
                // Hits and the heart are logged by the sim
                match event {
                    GameEvent::Started => log::info!("Game started"),
                    GameEvent::Won => log::info!(
                        "Target won over after {} ticks, ending begins",
                        self.state.time_ticks
                    ),
                    GameEvent::Handoff => self.handoff(),
                    GameEvent::Hit { .. } | GameEvent::HeartShown => {}
                }
            }
        }

        /// Render the current frame
        fn render(&self, time: f64) {
            let cmds = build_scene(&self.state, &self.scene, time);
            self.renderer.present(&cmds, &self.assets.borrow());
        }

        /// Swap the canvas for the ending video; the canvas never comes back
        fn handoff(&mut self) {
            log::info!("Ending finished, handing off to video");
            self.running = false;
            let _ = self.canvas.style().set_property("display", "none");

            let Some(video) = &self.video else {
                log::warn!("No ending video element");
                return;
            };
            let _ = video.style().set_property("display", "block");
            match video.play() {
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        log::debug!("Video playback refused: {:?}", e);
                    }
                }),
                Err(e) => log::debug!("Video playback failed: {:?}", e),
            }
        }
    }

    fn element<T: JsCast>(document: &web_sys::Document, id: &str) -> Result<T, JsValue> {
        document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))?
            .dyn_into::<T>()
            .map_err(|_| JsValue::from_str(&format!("#{id} has the wrong element type")))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Trace).expect("Failed to init logger");

        let settings = Settings::load();
        log::set_max_level(settings.level().to_level_filter());
        log::info!("Heartstring starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let canvas: HtmlCanvasElement = element(&document, "game")?;
        let start_screen: HtmlElement = element(&document, "start-screen")?;
        let start_btn: HtmlElement = element(&document, "start-btn")?;
        let video: Option<HtmlVideoElement> = element(&document, "ending-video").ok();
        let decor_canvas: Option<HtmlCanvasElement> = element(&document, "string-start").ok();

        let assets: SharedAssets = Rc::new(RefCell::new(AssetTable::new()));
        assets::preload(&assets);

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let mut state = GameState::new(canvas.width() as f32, canvas.height() as f32, seed);
        state.max_hits = settings.max_hits;
        log::info!(
            "Playfield {}x{}, seed {}",
            state.width,
            state.height,
            state.seed
        );

        let scene = SceneOptions::from(&settings);
        let game = Rc::new(RefCell::new(Game {
            state,
            renderer: CanvasRenderer::new(&canvas)?,
            assets: assets.clone(),
            clock: FrameClock::new(),
            keys: KeyboardState::new(),
            edges: EdgeTracker::new(),
            scene,
            running: false,
            canvas: canvas.clone(),
            video,
        }));

        setup_input_handlers(game.clone())?;

        let decor_active = Rc::new(Cell::new(true));
        if let Some(decor_canvas) = decor_canvas {
            let decor = Decoration {
                renderer: CanvasRenderer::new(&decor_canvas)?,
                assets,
                scene,
                active: decor_active.clone(),
            };
            request_decoration_frame(Rc::new(decor));
        }

        setup_start_button(game, start_screen, start_btn, decor_active)?;

        log::info!("Heartstring ready");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                if game.borrow_mut().keys.key_down(&event.key()).is_some() {
                    // Keep space/arrows from scrolling the page
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().keys.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur: key-ups will never arrive, so let go of everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keys.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_start_button(
        game: Rc<RefCell<Game>>,
        start_screen: HtmlElement,
        start_btn: HtmlElement,
        decor_active: Rc<Cell<bool>>,
    ) -> Result<(), JsValue> {
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            {
                let mut g = game.borrow_mut();
                if !g.state.start() {
                    return;
                }
                let _ = start_screen.style().set_property("display", "none");
                let _ = g.canvas.style().set_property("display", "block");
                g.running = true;

                let missing = g.assets.borrow().missing();
                if !missing.is_empty() {
                    log::debug!("Starting with {} sprites not loaded: {:?}", missing.len(), missing);
                }
            }
            decor_active.set(false);
            request_animation_frame(game.clone());
        });
        start_btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
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
            if !g.running {
                return;
            }

            let dt = g.clock.advance(time);
            g.update(dt);
            if !g.running {
                // Handed off during this update
                return;
            }
            g.render(time);
        }

        request_animation_frame(game);
    }

    /// Animated thread behind the title card, until the game starts
    struct Decoration {
        renderer: CanvasRenderer,
        assets: SharedAssets,
        scene: SceneOptions,
        active: Rc<Cell<bool>>,
    }

    fn request_decoration_frame(decor: Rc<Decoration>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            if !decor.active.get() {
                return;
            }
            let r = &decor.renderer;
            let cmds = decoration_scene(r.width as f32, r.height as f32, &decor.scene, time);
            r.present(&cmds, &decor.assets.borrow());
            request_decoration_frame(decor);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Heartstring (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    println!("\nRunning headless autopilot...");
    autopilot_demo(heartstring::Settings::load());
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a whole game with the autopilot at a simulated 60 fps
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_demo(settings: heartstring::Settings) {
    use heartstring::consts::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
    use heartstring::platform::FrameClock;
    use heartstring::sim::{Autopilot, GameEvent, GameState, tick};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_TICKS: u64 = 60 * 60 * 5;

    let mut state = GameState::new(DEFAULT_WIDTH, DEFAULT_HEIGHT, settings.seed.unwrap_or(1));
    state.max_hits = settings.max_hits;
    state.start();

    let mut pilot = Autopilot::default();
    let mut clock = FrameClock::new();
    let mut now = 0.0;

    while state.time_ticks < MAX_TICKS && !state.is_finished() {
        now += FRAME_MS;
        let dt = clock.advance(now);
        let input = pilot.next_input(&state);
        tick(&mut state, &input, dt);

        for event in state.drain_events() {
            let secs = now / 1000.0;
            match event {
                GameEvent::Hit { hits } => log::info!("[{secs:7.2}s] hit {hits}"),
                other => log::info!("[{secs:7.2}s] {other:?}"),
            }
        }
    }

    if state.is_finished() {
        println!(
            "✓ Ending reached after {:.1}s / {} ticks ({} hits, seed {})",
            now / 1000.0,
            state.time_ticks,
            state.hits,
            state.seed
        );
    } else {
        println!(
            "✗ Gave up after {:.1}s in phase {} ({} hits)",
            now / 1000.0,
            state.phase.as_str(),
            state.hits
        );
    }
}
