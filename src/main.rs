//! Frogger 3D entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, PageTransitionEvent};

    use frogger_3d::consts::MAX_FRAME_DT;
    use frogger_3d::platform::{FrameClock, KeyboardBinding, load_tuning};
    use frogger_3d::renderer::SceneRenderState;
    use frogger_3d::sim::{GameEvent, GameState, hop, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<SceneRenderState>,
        /// Paused while the page is hidden
        clock: FrameClock,
        /// Present while the page is shown
        keyboard: Option<KeyboardBinding>,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(state: GameState) -> Self {
            Self {
                state,
                render_state: None,
                clock: FrameClock::new(),
                keyboard: None,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Advance the simulation by one displayed frame
        fn update(&mut self, dt: f32, time: f64) {
            tick(&mut self.state, dt.min(MAX_FRAME_DT));

            for event in self.state.drain_events() {
                match event {
                    GameEvent::Squashed { .. } | GameEvent::Drowned => {
                        log::debug!("Game over with score {}", self.state.score());
                    }
                    other => log::debug!("{:?}", other),
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&format!("Score: {}", self.state.score())));
            }

            if let Some(el) = document.get_element_by_id("fps") {
                el.set_text_content(Some(&self.fps.to_string()));
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if self.state.is_game_over() { "" } else { "hidden" };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Frogger 3D starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| JsValue::from_str("no canvas"))?
            .dyn_into()?;

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let tuning = load_tuning();
        let game = Rc::new(RefCell::new(Game::new(GameState::new(&tuning))));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state = SceneRenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        render_state.set_start_time(js_sys::Date::now());
        game.borrow_mut().render_state = Some(render_state);

        let keyboard = attach_keyboard(&game)?;
        game.borrow_mut().keyboard = Some(keyboard);
        setup_page_lifecycle(game.clone())?;
        setup_restart_button(&document, game.clone())?;

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        let generation = game.borrow().clock.generation();
        request_animation_frame(game, generation);

        log::info!("Frogger 3D running!");
        Ok(())
    }

    /// Arrow keys hop the frog immediately, between frames
    fn attach_keyboard(game: &Rc<RefCell<Game>>) -> Result<KeyboardBinding, JsValue> {
        let game = game.clone();
        KeyboardBinding::attach(move |direction| {
            hop(&mut game.borrow_mut().state, direction);
        })
    }

    /// Pause on `pagehide`, resume on `pageshow` after a back/forward cache restore
    fn setup_page_lifecycle(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;

        let hide_game = game.clone();
        let on_hide = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            let mut g = hide_game.borrow_mut();
            g.keyboard = None;
            g.clock.pause();
            if event.persisted() {
                log::info!("Page cached, game loop paused");
            } else {
                log::info!("Page unloaded, game loop stopped");
            }
        });
        window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref())?;
        on_hide.forget();

        let on_show = Closure::<dyn FnMut(_)>::new(move |event: PageTransitionEvent| {
            // The initial load also fires pageshow; only cache restores need work
            if !event.persisted() {
                return;
            }
            let keyboard = match attach_keyboard(&game) {
                Ok(keyboard) => Some(keyboard),
                Err(err) => {
                    log::error!("Failed to re-attach keyboard: {:?}", err);
                    None
                }
            };
            let generation = {
                let mut g = game.borrow_mut();
                g.keyboard = keyboard;
                g.clock.resume()
            };
            log::info!("Page restored, game loop resumed");
            request_animation_frame(game.clone(), generation);
        });
        window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref())?;
        on_show.forget();
        Ok(())
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id("restart-btn") else {
            log::warn!("No restart button in page");
            return Ok(());
        };

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            game.borrow_mut().state.reset();
            log::info!("Game restarted");
        });
        btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, generation: u32) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, generation, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, generation: u32, time: f64) {
        {
            let mut g = game.borrow_mut();
            // Paused, or superseded by a newer loop
            if !g.clock.accepts(generation) {
                return;
            }

            let dt = g.clock.delta(time);

            g.update(dt, time);
            g.render(time);
            if let Some(document) = web_sys::window().and_then(|w| w.document()) {
                g.update_hud(&document);
            }
        }

        request_animation_frame(game, generation);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(err) = wasm_game::run().await {
        log::error!("Frogger 3D failed to start: {:?}", err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Frogger 3D (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    headless_run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play the default layout at 60 Hz, hopping forward every half second
#[cfg(not(target_arch = "wasm32"))]
fn headless_run() {
    use frogger_3d::Tuning;
    use frogger_3d::consts::FIRST_FRAME_DT;
    use frogger_3d::sim::{Direction, GameState, Verdict, hop, tick};

    const FRAMES: u32 = 60 * 20;
    const HOP_EVERY: u32 = 30;

    let mut state = GameState::new(&Tuning::default());

    for frame in 0..FRAMES {
        if frame % HOP_EVERY == 0 {
            hop(&mut state, Direction::Up);
        }
        match tick(&mut state, FIRST_FRAME_DT) {
            Verdict::ReachedGoal { score } => log::info!("frame {}: crossing #{}", frame, score),
            verdict if verdict.is_fatal() => {
                log::info!("frame {}: {:?}", frame, verdict);
                break;
            }
            _ => {}
        }
    }
    state.drain_events();

    log::info!(
        "Finished after {} frames: score {}, game over: {}",
        state.frames,
        state.score(),
        state.is_game_over()
    );
    match serde_json::to_string_pretty(&state) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize final state: {}", e),
    }
}
