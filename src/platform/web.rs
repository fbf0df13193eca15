//! Browser platform: `requestAnimationFrame` driver and DOM input wiring
//!
//! `WebGame` is the JavaScript-facing handle. The page renders whatever the
//! `on_frame` callback receives (a JSON snapshot of the state).

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, EventTarget, KeyboardEvent, MouseEvent, Window};

use super::frame::{FrameDriver, FrameScheduler};
use super::input::{InputHandle, Key};
use crate::campaign::Campaign;
use crate::game::Game;
use crate::settings::Settings;

type Scheduler = FrameScheduler<AnimationFrames>;

/// `requestAnimationFrame` / `cancelAnimationFrame`
pub struct AnimationFrames {
    window: Window,
    callback: Closure<dyn FnMut(f64)>,
}

impl FrameDriver for AnimationFrames {
    type Handle = i32;

    fn request_frame(&mut self) -> Option<i32> {
        match self
            .window
            .request_animation_frame(self.callback.as_ref().unchecked_ref())
        {
            Ok(id) => Some(id),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("cancelAnimationFrame failed: {:?}", e);
        }
    }
}

/// DOM event listener that deregisters itself on drop
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        callback: Closure<dyn FnMut(web_sys::Event)>,
    ) -> Option<Self> {
        match target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self {
                target: target.clone(),
                kind,
                callback,
            }),
            Err(e) => {
                log::warn!("Could not listen to {}: {:?}", kind, e);
                None
            }
        }
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

fn mouse_listener(target: &EventTarget, field: Element, input: InputHandle) -> Option<Listener> {
    let callback = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
        if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
            let left = field.get_bounding_client_rect().left();
            input.pointer_moved((f64::from(mouse.client_x()) - left) as f32);
        }
    });
    Listener::attach(target, "mousemove", callback)
}

fn key_listener(target: &EventTarget, input: InputHandle) -> Option<Listener> {
    let callback = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
        if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
            input.key_down(Key::from_key_name(&key.key()));
        }
    });
    Listener::attach(target, "keydown", callback)
}

/// A game mounted on a page element
#[wasm_bindgen]
pub struct WebGame {
    scheduler: Option<Rc<RefCell<Scheduler>>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl WebGame {
    /// Mount on the element with id `field_id`; `on_frame` receives a JSON
    /// snapshot after every tick. `settings_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(
        field_id: &str,
        settings_json: &str,
        on_frame: js_sys::Function,
    ) -> Result<WebGame, JsValue> {
        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let field = document
            .get_element_by_id(field_id)
            .ok_or_else(|| JsValue::from_str("no play field element"))?;

        let settings = if settings_json.is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let settings = Settings {
            seed: Some(settings.seed_or(js_sys::Date::now() as u64)),
            ..settings
        };
        let game = Game::new(&settings, Campaign::default());
        let input = game.input_handle();

        let scheduler = Rc::new_cyclic(|weak: &Weak<RefCell<Scheduler>>| {
            let weak = weak.clone();
            let callback = Closure::<dyn FnMut(f64)>::new(move |time: f64| {
                let Some(scheduler) = weak.upgrade() else {
                    return;
                };
                // Serialize under the borrow, hand off to JS after releasing it
                let snapshot = scheduler
                    .borrow_mut()
                    .on_frame(time)
                    .map(|state| serde_json::to_string(state));
                match snapshot {
                    Some(Ok(json)) => {
                        let _ = on_frame.call1(&JsValue::NULL, &JsValue::from_str(&json));
                    }
                    Some(Err(e)) => log::error!("Snapshot failed: {}", e),
                    None => {}
                }
            });
            RefCell::new(FrameScheduler::new(
                AnimationFrames {
                    window: window.clone(),
                    callback,
                },
                game,
            ))
        });

        let target: &EventTarget = document.as_ref();
        let listeners = [
            mouse_listener(target, field, input.clone()),
            key_listener(target, input),
        ]
        .into_iter()
        .flatten()
        .collect();

        log::info!("Bucket Bomber mounted on #{}", field_id);
        Ok(WebGame {
            scheduler: Some(scheduler),
            listeners,
        })
    }

    pub fn start(&self) {
        if let Some(scheduler) = &self.scheduler {
            scheduler.borrow_mut().start();
        }
    }

    /// Restart command (e.g. the "Restart?" button)
    pub fn restart(&self) {
        if let Some(scheduler) = &self.scheduler {
            scheduler.borrow_mut().game_mut().restart();
        }
    }

    /// Cancel the frame loop and remove every listener
    pub fn teardown(&mut self) {
        self.listeners.clear();
        if let Some(scheduler) = self.scheduler.take() {
            scheduler.borrow_mut().teardown();
        }
    }
}

impl Drop for WebGame {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Install browser logging once per page
#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
}
