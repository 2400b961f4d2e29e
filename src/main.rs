//! Flappy Degen entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent,
    };

    use flappy_degen::game::TriggerToken;
    use flappy_degen::persistence::{KeyValueStore, MemoryStore};
    use flappy_degen::platform::LocalStore;
    use flappy_degen::sim::GamePhase;
    use flappy_degen::{Game, Snapshot, Tuning, autopilot};

    type Store = Box<dyn KeyValueStore>;

    /// Game instance plus the browser handles of the running session
    struct App {
        game: Game<Store>,
        ctx: CanvasRenderingContext2d,
        /// Token of the running session's triggers
        token: Option<TriggerToken>,
        spawn_interval: Option<i32>,
        frame_request: Option<i32>,
        /// Spawn-timer callback, created once and re-armed every session
        spawner: Option<Closure<dyn FnMut()>>,
        idle_mode: bool,
    }

    impl App {
        /// Primary input: start from the menu, jump while playing, leave game over
        fn press(app: &Rc<RefCell<App>>) {
            let phase = app.borrow().game.phase();
            match phase {
                GamePhase::Menu => start_session(app),
                GamePhase::Playing => {
                    app.borrow_mut().game.jump();
                }
                GamePhase::GameOver => {
                    let mut a = app.borrow_mut();
                    a.game.return_to_menu();
                    a.render();
                }
            }
        }

        /// Cancel both periodic triggers
        fn stop_triggers(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            if let Some(id) = self.spawn_interval.take() {
                window.clear_interval_with_handle(id);
            }
            if let Some(id) = self.frame_request.take() {
                let _ = window.cancel_animation_frame(id);
            }
            self.token = None;
        }

        fn render(&self) {
            draw(&self.ctx, &self.game.snapshot());
        }
    }

    fn start_session(app: &Rc<RefCell<App>>) {
        let token = {
            let mut a = app.borrow_mut();
            // Anything left over from an earlier session goes first
            a.stop_triggers();
            match a.game.start() {
                Some(token) => token,
                None => return,
            }
        };
        app.borrow_mut().token = Some(token);

        let Some(window) = web_sys::window() else {
            return;
        };

        {
            let mut a = app.borrow_mut();
            let interval_ms = a.game.tuning().spawn_interval_ms as i32;
            let armed = match &a.spawner {
                Some(spawner) => window.set_interval_with_callback_and_timeout_and_arguments_0(
                    spawner.as_ref().unchecked_ref(),
                    interval_ms,
                ),
                None => Err(JsValue::from_str("spawner not installed")),
            };
            match armed {
                Ok(id) => a.spawn_interval = Some(id),
                Err(e) => log::error!("Could not start spawn timer: {:?}", e),
            }
        }

        request_animation_frame(app.clone(), token);
    }

    /// Build the spawn-timer callback; it serves whichever session is running
    fn install_spawner(app: &Rc<RefCell<App>>) {
        let handle = app.clone();
        let spawner = Closure::<dyn FnMut()>::new(move || {
            let mut a = handle.borrow_mut();
            let Some(token) = a.token else {
                return;
            };
            a.game.on_spawn(token);
            if !a.game.is_live(token) {
                a.stop_triggers();
            }
        });
        app.borrow_mut().spawner = Some(spawner);
    }

    fn request_animation_frame(app: Rc<RefCell<App>>, token: TriggerToken) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let frame_app = app.clone();
        // Freed by wasm-bindgen once the frame has run
        let callback = Closure::once_into_js(move |_time: f64| {
            game_loop(frame_app, token);
        });
        match window.request_animation_frame(callback.unchecked_ref()) {
            Ok(id) => app.borrow_mut().frame_request = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
    }

    fn game_loop(app: Rc<RefCell<App>>, token: TriggerToken) {
        {
            let mut a = app.borrow_mut();
            a.frame_request = None;
            if !a.game.is_live(token) {
                return;
            }

            if a.idle_mode && autopilot::should_jump(a.game.state(), a.game.tuning()) {
                a.game.jump();
            }
            a.game.on_frame(token);
            a.render();

            if !a.game.is_live(token) {
                a.stop_triggers();
                return;
            }
        }

        request_animation_frame(app, token);
    }

    /// Draw the snapshot onto the 2D canvas
    fn draw(ctx: &CanvasRenderingContext2d, snap: &Snapshot) {
        let (w, h) = (snap.width as f64, snap.height as f64);

        ctx.set_fill_style_str("#70c5ce");
        ctx.fill_rect(0.0, 0.0, w, h);

        if snap.phase != GamePhase::Menu {
            ctx.set_fill_style_str("#7b2ff7");
            for o in &snap.obstacles {
                let x = o.x as f64;
                let ow = snap.obstacle_width as f64;
                ctx.fill_rect(x, 0.0, ow, o.gap_top as f64);
                ctx.fill_rect(x, o.gap_bottom as f64, ow, h - o.gap_bottom as f64);
            }

            ctx.set_fill_style_str("#f357a8");
            let size = snap.player_size as f64;
            ctx.fill_rect(snap.player_x as f64, snap.player_y as f64, size, size);
        }

        ctx.set_fill_style_str("#ffffff");
        ctx.set_text_align("center");
        let lines: Vec<String> = match snap.phase {
            GamePhase::Menu => vec![
                "Flappy Degen".to_string(),
                format!("High Score: {}", snap.best_score),
                format!("Points: {}", snap.points),
                "Tap or Enter to start".to_string(),
            ],
            GamePhase::Playing => vec![snap.score.to_string()],
            GamePhase::GameOver => vec![
                "Game Over".to_string(),
                format!("Your Score: {}", snap.score),
                format!("High Score: {}", snap.best_score),
                "Tap or Enter for menu".to_string(),
            ],
        };
        ctx.set_font("bold 22px sans-serif");
        for (i, line) in lines.iter().enumerate() {
            let _ = ctx.fill_text(line, w / 2.0, 60.0 + i as f64 * 34.0);
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse click
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                App::press(&app);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                App::press(&app);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.key().as_str() {
                    " " => {
                        event.prevent_default();
                        app.borrow_mut().game.jump();
                    }
                    "Enter" => {
                        if app.borrow().game.phase() != GamePhase::Playing {
                            App::press(&app);
                        }
                    }
                    "i" | "I" => {
                        let mut a = app.borrow_mut();
                        a.idle_mode = !a.idle_mode;
                        log::info!("Idle mode: {}", a.idle_mode);
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Flappy Degen starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let store: Store = match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; scores will not be kept", e);
                Box::new(MemoryStore::new())
            }
        };
        let tuning = Tuning::load(&store);
        canvas.set_width(tuning.width as u32);
        canvas.set_height(tuning.height as u32);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(store, tuning, seed),
            ctx,
            token: None,
            spawn_interval: None,
            frame_request: None,
            spawner: None,
            idle_mode: false,
        }));
        install_spawner(&app);
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, app.clone());
        app.borrow().render();

        log::info!("Flappy Degen running!");
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {:?}", e);
    }
}

/// Validate a donation entered on the page before it goes to the wallet
///
/// Returns the amount in wei as a decimal string, or the message to show.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = validateDonation)]
pub fn validate_donation(amount: &str, wallet_connected: bool) -> Result<String, JsValue> {
    use flappy_degen::donation::DonationRequest;

    match DonationRequest::new(amount, wallet_connected) {
        Ok(request) => {
            log::info!("Donation ready: {}", request);
            Ok(request.amount_wei.to_string())
        }
        Err(e) => Err(JsValue::from_str(&e.to_string())),
    }
}

/// Address donations are sent to
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(js_name = donationRecipient)]
pub fn donation_recipient() -> String {
    flappy_degen::donation::DONATION_RECIPIENT.to_string()
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use flappy_degen::game::run_headless;
    use flappy_degen::{Game, MemoryStore, Tuning, autopilot};

    env_logger::init();
    log::info!("Flappy Degen (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse::<u64>().ok())
        .unwrap_or(12345);

    let store = MemoryStore::new();
    let tuning = Tuning::load(&store);
    let mut game = Game::new(store, tuning, seed);

    // Five minutes of play at 60 Hz
    let outcome = run_headless(&mut game, 5 * 60 * 60, autopilot::should_jump);

    log::info!(
        "Seed {}: score {} after {} ticks ({} obstacles spawned, {})",
        seed,
        outcome.score,
        outcome.ticks,
        outcome.spawned,
        if outcome.ended { "crashed" } else { "survived" }
    );
    log::debug!("Final state: {}", game.snapshot().to_json());
    println!("score {} best {}", outcome.score, outcome.best_score);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
