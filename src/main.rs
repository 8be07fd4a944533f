//! Trash Catcher entry point
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
    use web_sys::{Document, Element, HtmlElement, KeyboardEvent, MouseEvent, TouchEvent};

    use trash_catcher::sim::{self, GameEvent, GameState, Layout};
    use trash_catcher::{GameStore, Scheduler, Settings};

    const PLAY_AREA_ID: &str = "play-area";
    const BIN_ID: &str = "bin";
    const START_BTN_ID: &str = "start-btn";
    const TRASH_LAYER_ID: &str = "trash-layer";

    /// Game instance holding all state
    struct Game {
        store: GameStore,
        scheduler: Scheduler,
        last_time: f64,
        /// Present exactly while a session is playing
        pointer: Option<PointerListeners>,
    }

    impl Game {
        fn new(seed: u64, autopilot: bool) -> Self {
            let mut store = GameStore::new(seed);
            store.set_autopilot(autopilot);
            Self {
                store,
                scheduler: Scheduler::new(),
                last_time: 0.0,
                pointer: None,
            }
        }

        /// Run due timers for the elapsed frame time
        fn update(&mut self, dt_ms: f64) {
            let layout = measure_layout();
            let Game {
                store, scheduler, ..
            } = self;
            for event in scheduler.advance(store, dt_ms, layout.as_ref()) {
                if let GameEvent::GameOver { score, level } = event {
                    log::info!("Game over - final score {} (level {})", score, level);
                }
            }
        }
    }

    /// Window pointer/touch listeners registered for one playing session
    ///
    /// Dropping the guard removes both listeners.
    struct PointerListeners {
        mouse: Closure<dyn FnMut(MouseEvent)>,
        touch: Closure<dyn FnMut(TouchEvent)>,
    }

    impl PointerListeners {
        fn register(game: &Rc<RefCell<Game>>) -> Option<Self> {
            let window = web_sys::window()?;

            let mouse = {
                let game = game.clone();
                Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                    move_to_client_x(&game, event.client_x() as f32);
                })
            };
            let touch = {
                let game = game.clone();
                Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    if let Some(touch) = event.touches().get(0) {
                        move_to_client_x(&game, touch.client_x() as f32);
                    }
                })
            };

            let _ = window
                .add_event_listener_with_callback("mousemove", mouse.as_ref().unchecked_ref());
            let _ = window
                .add_event_listener_with_callback("touchmove", touch.as_ref().unchecked_ref());
            log::debug!("Pointer listeners registered");

            Some(Self { mouse, touch })
        }
    }

    impl Drop for PointerListeners {
        fn drop(&mut self) {
            if let Some(window) = web_sys::window() {
                let _ = window.remove_event_listener_with_callback(
                    "mousemove",
                    self.mouse.as_ref().unchecked_ref(),
                );
                let _ = window.remove_event_listener_with_callback(
                    "touchmove",
                    self.touch.as_ref().unchecked_ref(),
                );
            }
            log::debug!("Pointer listeners removed");
        }
    }

    fn move_to_client_x(game: &Rc<RefCell<Game>>, client_x: f32) {
        let Some(area) = document().and_then(|d| d.get_element_by_id(PLAY_AREA_ID)) else {
            return;
        };
        let rect = area.get_bounding_client_rect();
        if let Ok(mut g) = game.try_borrow_mut() {
            g.store
                .pointer_move(client_x, rect.left() as f32, rect.width() as f32);
        }
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    /// Measure play area and bin; `None` skips collision this tick
    fn measure_layout() -> Option<Layout> {
        let document = document()?;
        let area = document.get_element_by_id(PLAY_AREA_ID)?.get_bounding_client_rect();
        let bin = document.get_element_by_id(BIN_ID)?.get_bounding_client_rect();
        Layout {
            area: Vec2::new(area.width() as f32, area.height() as f32),
            catcher: Vec2::new(bin.width() as f32, bin.height() as f32),
            catcher_bottom: (bin.bottom() - area.top()) as f32,
        }
        .validated()
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if hidden { "hidden" } else { "" });
        }
    }

    /// Redraw HUD, trash and bin from the current state
    fn render(state: &GameState) {
        let Some(document) = document() else {
            return;
        };

        set_text(&document, "score", &state.score.to_string());
        set_text(&document, "level", &state.level.to_string());

        set_hidden(&document, "start-panel", state.is_playing());
        set_text(
            &document,
            START_BTN_ID,
            if state.is_over() { "Play again" } else { "Start" },
        );
        set_hidden(&document, "game-over", !state.is_over());
        if state.is_over() {
            set_text(
                &document,
                "game-over",
                &format!("Game over! Final score: {}", state.score),
            );
        }

        if let Some(layer) = document.get_element_by_id(TRASH_LAYER_ID) {
            layer.set_inner_html("");
            for obj in &state.objects {
                let Ok(el) = document.create_element("div") else {
                    continue;
                };
                let _ = el.set_attribute("class", "trash");
                if let Some(el) = el.dyn_ref::<HtmlElement>() {
                    let style = el.style();
                    let _ = style.set_property("left", &format!("{}%", obj.left));
                    let _ = style.set_property("top", &format!("{}%", obj.top));
                    let _ = style.set_property("background-color", obj.kind.color());
                }
                let _ = layer.append_child(&el);
            }
        }

        if let Some(bin) = document
            .get_element_by_id(BIN_ID)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = bin
                .style()
                .set_property("left", &format!("{}%", state.catcher_x));
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();

        let loaded = Settings::load();
        let settings = loaded.as_ref().cloned().unwrap_or_default();
        console_log::init_with_level(settings.log_level()).expect("Failed to init logger");
        if let Err(e) = &loaded {
            log::warn!("Ignoring page settings: {}", e);
        }

        log::info!("Trash Catcher starting...");

        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        let game = Rc::new(RefCell::new(Game::new(seed, settings.autopilot)));
        {
            let mut g = game.borrow_mut();
            g.store.subscribe(|state, _events| render(state));
            render(g.store.state());
        }
        log::info!("Game initialized with seed: {}", seed);

        setup_buttons(game.clone());
        setup_keyboard(game.clone());

        request_animation_frame(game);
    }

    fn on_element<E, F>(id: &str, event: &str, handler: F)
    where
        E: wasm_bindgen::convert::FromWasmAbi + 'static,
        F: FnMut(E) + 'static,
    {
        let Some(el) = document().and_then(|d| d.get_element_by_id(id)) else {
            log::warn!("#{} not found, {} handler not attached", id, event);
            return;
        };
        let closure = Closure::<dyn FnMut(E)>::new(handler);
        let _ = el.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        {
            let game = game.clone();
            on_element(START_BTN_ID, "click", move |_event: MouseEvent| {
                game.borrow_mut().store.start();
            });
        }

        for (id, left) in [("step-left", true), ("step-right", false)] {
            let step = {
                let game = game.clone();
                move || {
                    let mut g = game.borrow_mut();
                    if left {
                        g.store.step_left();
                    } else {
                        g.store.step_right();
                    }
                }
            };
            let on_touch = step.clone();
            on_element(id, "touchstart", move |event: TouchEvent| {
                event.prevent_default();
                on_touch();
            });
            let on_mouse = step;
            on_element(id, "mousedown", move |_event: MouseEvent| on_mouse());
        }
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = game.borrow_mut();
            let key = event.key();
            let on_start_button = event
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .is_some_and(|el| el.id() == START_BTN_ID);
            match key.as_str() {
                "ArrowLeft" => g.store.step_left(),
                "ArrowRight" => g.store.step_right(),
                k if sim::key_starts_session(k, on_start_button, g.store.state().is_playing()) => {
                    g.store.start();
                }
                "i" | "I" => {
                    let on = !g.store.autopilot();
                    g.store.set_autopilot(on);
                }
                _ => {}
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Keep pointer listeners registered exactly while playing
    fn reconcile_listeners(game: &Rc<RefCell<Game>>) {
        let mut g = game.borrow_mut();
        let playing = g.store.state().is_playing();
        if playing && g.pointer.is_none() {
            g.pointer = PointerListeners::register(game);
        } else if !playing && g.pointer.is_some() {
            g.pointer = None;
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
            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                0.0
            };
            g.last_time = time;
            g.update(dt_ms);
        }
        reconcile_listeners(&game);

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
use trash_catcher::Settings;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Trash Catcher (native) starting...");
    log::info!("Native mode runs a headless autopilot session - use `trunk serve` to play");

    let settings = Settings::load().unwrap_or_else(|e| {
        log::warn!("Ignoring settings: {}", e);
        Settings::default()
    });
    let seed = settings.seed.unwrap_or(0x7A54_C0DE);

    match run_headless(&settings, seed) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            log::error!("Failed to serialize final state: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play one autopilot session at 60 FPS for up to five simulated minutes
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(settings: &Settings, seed: u64) -> serde_json::Result<String> {
    use std::cell::Cell;
    use std::rc::Rc;
    use trash_catcher::sim::GameEvent;
    use trash_catcher::{GameStore, Scheduler};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    let layout = settings.layout();
    let mut store = GameStore::new(seed);
    let mut scheduler = Scheduler::new();

    let catches = Rc::new(Cell::new(0u32));
    {
        let catches = catches.clone();
        store.subscribe(move |_, events| {
            for event in events {
                match event {
                    GameEvent::Caught { .. } => catches.set(catches.get() + 1),
                    GameEvent::LevelUp { level, speed } => {
                        log::info!("Level {} (speed {})", level, speed)
                    }
                    _ => {}
                }
            }
        });
    }

    store.set_autopilot(true);
    store.start();
    let mut frames = 0;
    while store.state().is_playing() && frames < MAX_FRAMES {
        scheduler.advance(&mut store, FRAME_MS, Some(&layout));
        frames += 1;
    }

    log::info!(
        "Session finished after {:.1}s: {} catches, score {}, level {}",
        scheduler.now_ms() / 1000.0,
        catches.get(),
        store.state().score,
        store.state().level
    );
    serde_json::to_string_pretty(&store.state().snapshot())
}
