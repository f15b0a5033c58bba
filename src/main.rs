//! Wall Run entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlInputElement, KeyboardEvent};

    use wall_run::Settings;
    use wall_run::consts::*;
    use wall_run::renderer::{RenderState, Renderer, SceneStyle};
    use wall_run::sim::{
        FixedTimestep, GameEvent, GamePhase, InputState, LevelTable, PasswordOutcome,
        RenderSnapshot, SimulationState, Viewport, resolve, tick,
    };

    const CANVAS_ID: &str = "gameCanvas";

    /// Game instance holding all state
    struct Game {
        state: SimulationState,
        render_state: Option<RenderState>,
        clock: FixedTimestep,
        last_time: f64,
        input: InputState,
        settings: Settings,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(levels: LevelTable, viewport: Viewport, settings: Settings) -> Self {
            Self {
                state: SimulationState::new(levels, viewport),
                render_state: None,
                clock: FixedTimestep::new(settings.max_substeps),
                last_time: 0.0,
                input: InputState::default(),
                settings,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run simulation steps for the elapsed frame time
        fn update(&mut self, dt: f32, time: f64) {
            let steps = self.clock.advance(dt);
            for _ in 0..steps {
                let intent = resolve(&self.input);
                tick(&mut self.state, &intent);
                if self.state.phase == GamePhase::Locked {
                    // Nothing left to simulate until the password is in
                    self.clock.reset();
                    break;
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
        fn render(&mut self) {
            let snapshot = RenderSnapshot::capture(&self.state);
            if let Some(ref mut render_state) = self.render_state {
                match render_state.draw(&snapshot) {
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

        /// React to everything the simulation emitted this frame
        fn handle_events(&mut self, document: &Document) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::Captured { level } => {
                        log::info!("Caught by the wall on level {}", level);
                    }
                    GameEvent::GoalReached { level } => {
                        log::info!("Level {} cleared", level);
                    }
                    GameEvent::CampaignComplete => {
                        set_visible(document, "campaign-complete", true);
                    }
                    GameEvent::LevelLocked { title, story, .. } => {
                        // Held buttons would otherwise carry over into the next level
                        self.input.clear();
                        show_password_prompt(document, &title, story.as_deref());
                    }
                    GameEvent::Unlocked { level } => {
                        log::info!("Level {} unlocked", level);
                        set_visible(document, "password-overlay", false);
                        set_visible(document, "campaign-complete", false);
                    }
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.query_selector("#hud-level .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.state.current_level.to_string()));
            }

            set_visible(document, "hud-fps", self.settings.show_fps);
            if self.settings.show_fps {
                if let Some(el) = document.query_selector("#hud-fps .hud-value").ok().flatten() {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }
        }

        /// Match the canvas, simulation, and surface to the window
        fn resize(&mut self, canvas: &HtmlCanvasElement) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (css_w, css_h) = window_size(&window);
            let dpr = window.device_pixel_ratio();
            let width = (css_w * dpr) as u32;
            let height = (css_h * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            self.state.resize(Viewport::new(css_w as f32, css_h as f32));
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
            log::debug!("Resized to {}x{} (dpr {})", css_w, css_h, dpr);
        }
    }

    fn window_size(window: &web_sys::Window) -> (f64, f64) {
        let w = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(800.0);
        let h = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(600.0);
        (w, h)
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn show_password_prompt(document: &Document, title: &str, story: Option<&str>) {
        if let Some(el) = document.get_element_by_id("level-title") {
            el.set_text_content(Some(title));
        }
        if let Some(el) = document.get_element_by_id("level-story") {
            el.set_text_content(story);
        }
        if let Some(el) = document.get_element_by_id("password-error") {
            el.set_text_content(None);
        }
        set_visible(document, "password-overlay", true);
        if let Some(input) = password_input(document) {
            input.set_value("");
            let _ = input.focus();
        }
    }

    fn password_input(document: &Document) -> Option<HtmlInputElement> {
        document
            .get_element_by_id("password-input")
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Wall Run starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id(CANVAS_ID)
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let levels = match LevelTable::builtin() {
            Ok(levels) => levels,
            Err(e) => {
                log::error!("Built-in levels are broken: {}", e);
                return;
            }
        };
        log::info!("Loaded {} levels", levels.len());

        let (css_w, css_h) = window_size(&window);
        let style = SceneStyle {
            high_contrast: settings.high_contrast,
            dim_when_locked: !settings.reduced_motion,
        };
        set_visible(&document, "touch-controls", settings.show_touch_controls);

        let game = Rc::new(RefCell::new(Game::new(
            levels,
            Viewport::new(css_w as f32, css_h as f32),
            settings,
        )));
        game.borrow_mut().resize(&canvas);

        // Initialize WebGPU (WebGL2 fallback)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => {
                log::info!("Using adapter: {:?}", adapter.get_info().name);
                let (width, height) = (canvas.width(), canvas.height());
                match RenderState::new(surface, &adapter, width, height, style).await {
                    Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                    Err(e) => log::error!("No render device, running without graphics: {}", e),
                }
            }
            Err(e) => log::error!("No graphics adapter, running without graphics: {}", e),
        }

        setup_input_handlers(game.clone());
        setup_touch_buttons(game.clone());
        setup_password_prompt(game.clone());
        setup_resize(&canvas, game.clone());

        request_animation_frame(game);

        log::info!("Wall Run running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        for (event_name, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if g.state.phase == GamePhase::Locked {
                    // Keys belong to the password box
                    return;
                }
                if g.input.set_key(&event.code(), pressed) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Releasing focus drops every held key
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// On-screen buttons: touch, plus mouse so they work on desktop
    fn setup_touch_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        let buttons: [(&str, fn(&mut InputState, bool)); 3] = [
            ("btn-left", |input, held| input.touch_left = held),
            ("btn-right", |input, held| input.touch_right = held),
            ("btn-jump", |input, held| input.touch_jump = held),
        ];
        let bindings = [
            ("touchstart", true, true),
            ("touchend", false, true),
            ("mousedown", true, false),
            ("mouseup", false, false),
            ("mouseleave", false, false),
        ];

        for (id, set) in buttons {
            let Some(btn) = document.get_element_by_id(id) else {
                log::warn!("Missing touch button #{}", id);
                continue;
            };
            for (event_name, held, prevent) in bindings {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                    if prevent {
                        event.prevent_default();
                    }
                    set(&mut game.borrow_mut().input, held);
                });
                let _ = btn
                    .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_password_prompt(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        let submit: Rc<dyn Fn()> = {
            let game = game.clone();
            Rc::new(move || {
                let document = web_sys::window().unwrap().document().unwrap();
                let Some(input) = password_input(&document) else {
                    return;
                };
                let attempt = input.value().to_uppercase();

                let outcome = game.borrow_mut().state.submit_password(&attempt);
                match outcome {
                    PasswordOutcome::Accepted => input.set_value(""),
                    PasswordOutcome::Rejected => {
                        if let Some(el) = document.get_element_by_id("password-error") {
                            el.set_text_content(Some("Incorrect password. Try again."));
                        }
                        input.select();
                    }
                    PasswordOutcome::NotLocked => {}
                }
            })
        };

        if let Some(btn) = document.get_element_by_id("password-submit") {
            let submit = submit.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                submit();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(input) = password_input(&document) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    event.prevent_default();
                    submit();
                }
            });
            let _ = input.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().resize(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let document = web_sys::window().unwrap().document().unwrap();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.handle_events(&document);
            g.render();
            g.update_hud(&document);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Wall Run (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let settings = wall_run::Settings::load();
    let levels = match wall_run::sim::LevelTable::builtin() {
        Ok(levels) => levels,
        Err(e) => {
            log::error!("Built-in levels are broken: {}", e);
            std::process::exit(1);
        }
    };

    let summary = demo::run(levels, &settings);
    println!(
        "\nDemo finished after {} steps: {} levels cleared, {} captures, {} frames drawn",
        summary.steps, summary.cleared, summary.captures, summary.frames
    );
    if !summary.campaign_complete {
        println!("Campaign did not complete within the step budget");
        std::process::exit(1);
    }
    println!("✓ Campaign complete!");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted headless run through the whole campaign
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use wall_run::Settings;
    use wall_run::consts::SIM_DT;
    use wall_run::renderer::{HeadlessRenderer, Renderer, SceneStyle};
    use wall_run::sim::{
        FixedTimestep, GameEvent, InputState, LevelTable, PasswordOutcome, RenderSnapshot,
        SimulationState, Viewport, resolve, tick,
    };

    /// Upper bound on simulated frames
    const MAX_FRAMES: u64 = 60 * 60 * 5;
    /// Hold jump for one step out of this many
    const JUMP_EVERY: u64 = 45;

    #[derive(Debug, Default)]
    pub struct Summary {
        pub steps: u64,
        pub frames: u64,
        pub cleared: u32,
        pub captures: u32,
        pub campaign_complete: bool,
    }

    pub fn run(levels: LevelTable, settings: &Settings) -> Summary {
        // The demo knows the answers
        let passwords: Vec<String> = (1..=levels.len())
            .filter_map(|i| levels.get(i).map(|def| def.password.to_lowercase()))
            .collect();

        let mut state = SimulationState::new(levels, Viewport::new(1280.0, 720.0));
        let mut clock = FixedTimestep::new(settings.max_substeps);
        let mut renderer = HeadlessRenderer {
            style: SceneStyle {
                high_contrast: settings.high_contrast,
                dim_when_locked: !settings.reduced_motion,
            },
            ..Default::default()
        };
        renderer.resize(1280, 720);

        let mut input = InputState {
            right: true,
            ..Default::default()
        };
        let mut summary = Summary::default();

        for _ in 0..MAX_FRAMES {
            for _ in 0..clock.advance(SIM_DT) {
                input.up = state.time_ticks % JUMP_EVERY == 0;
                tick(&mut state, &resolve(&input));
                summary.steps += 1;
            }

            for event in state.drain_events() {
                log::info!("{:?}", event);
                match event {
                    GameEvent::Captured { .. } => summary.captures += 1,
                    GameEvent::GoalReached { .. } => summary.cleared += 1,
                    GameEvent::CampaignComplete => summary.campaign_complete = true,
                    GameEvent::LevelLocked { level, .. } => {
                        let answer = passwords.get(level - 1).map(String::as_str).unwrap_or("");
                        // Exercise the rejection path once per lock
                        let wrong = state.submit_password("open sesame");
                        let right = state.submit_password(answer);
                        log::info!("Password attempts: {:?} then {:?}", wrong, right);
                        debug_assert_eq!(right, PasswordOutcome::Accepted);
                    }
                    GameEvent::Unlocked { .. } => clock.reset(),
                }
            }

            let snapshot = RenderSnapshot::capture(&state);
            let Ok(()) = renderer.draw(&snapshot);

            if summary.campaign_complete {
                break;
            }
        }

        summary.frames = renderer.frames;
        summary
    }
}
