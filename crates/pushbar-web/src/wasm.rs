#![forbid(unsafe_code)]

//! `wasm-bindgen` exports and DOM listener wiring.
//!
//! Only compiled on `wasm32` targets.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Reflect;
use pushbar_core::{Activation, Ignored, Key, PanelStackController, Transition};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent};

use crate::bridge::{self, CommittedState};
use crate::dom::DomHost;

struct Shared {
    controller: RefCell<PanelStackController<DomHost>>,
    committed: CommittedState,
}

type SharedController = Rc<Shared>;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = match info.location() {
                Some(loc) => format!("pushbar panic at {}:{}: {info}", loc.file(), loc.line()),
                None => format!("pushbar panic: {info}"),
            };
            console_error(&msg);
        }));
    });
}

/// Run `f` against the controller unless a transition is already running,
/// then commit the resulting stack state for the getters.
///
/// Notification listeners run synchronously inside `open` / `close`; a call
/// back into the controller from such a listener is dropped.
fn with_controller<R>(
    shared: &SharedController,
    f: impl FnOnce(&mut PanelStackController<DomHost>) -> R,
) -> Option<R> {
    match shared.controller.try_borrow_mut() {
        Ok(mut ctrl) => {
            let out = f(&mut ctrl);
            shared.committed.commit(ctrl.snapshot());
            Some(out)
        }
        Err(_) => {
            warn!("pushbar call dropped: transition in progress");
            None
        }
    }
}

fn busy() -> Activation {
    Activation {
        prevent_default: true,
        transition: Transition::Ignored(Ignored::Busy),
    }
}

fn config_from_js(config: &JsValue) -> pushbar_core::PushbarConfig {
    if config.is_undefined() || config.is_null() {
        return bridge::config_from_json(None);
    }
    let json = js_sys::JSON::stringify(config)
        .ok()
        .and_then(|s| s.as_string());
    bridge::config_from_json(json.as_deref())
}

/// Attach `handler` to `target` for the rest of the page's lifetime.
fn listen(
    target: &EventTarget,
    kind: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), JsValue> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
    // No unbind path: the closure must outlive this call.
    closure.forget();
    Ok(())
}

fn bind_listeners(shared: &SharedController) -> Result<(), JsValue> {
    let (triggers, overlay, document) = {
        let ctrl = shared.controller.borrow();
        let triggers: Vec<_> = ctrl.triggers().iter().map(|b| b.handle.clone()).collect();
        (
            triggers,
            ctrl.host().overlay().cloned(),
            ctrl.host().document().clone(),
        )
    };

    for (index, trigger) in triggers.iter().enumerate() {
        let state = Rc::clone(shared);
        listen(trigger, "click", move |event: Event| {
            let activation =
                with_controller(&state, |ctrl| ctrl.activate_trigger(index)).unwrap_or_else(busy);
            if activation.prevent_default {
                event.prevent_default();
            }
        })?;
    }

    if let Some(overlay) = overlay {
        let state = Rc::clone(shared);
        listen(&overlay, "click", move |event: Event| {
            let activation =
                with_controller(&state, |ctrl| ctrl.overlay_click()).unwrap_or_else(busy);
            if activation.prevent_default {
                event.prevent_default();
            }
        })?;
    }

    let state = Rc::clone(shared);
    listen(&document, "keyup", move |event: Event| {
        let Some(keyboard) = event.dyn_ref::<KeyboardEvent>() else {
            return;
        };
        let key = Key::from_dom(&keyboard.key(), keyboard.key_code());
        let Some(activation) = with_controller(&state, |ctrl| ctrl.key_up(&key)) else {
            return;
        };
        if activation.prevent_default {
            event.prevent_default();
        }
    })?;

    debug!(triggers = triggers.len(), "pushbar listeners attached");
    Ok(())
}

/// Stacked slide-in panel controller bound to the current document.
#[wasm_bindgen]
pub struct Pushbar {
    inner: SharedController,
}

#[wasm_bindgen]
impl Pushbar {
    /// Bind to `document`. `config` may be `undefined` or an object with
    /// `overlay` / `blur` booleans.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Pushbar, JsValue> {
        install_panic_hook();

        let config = config_from_js(&config);
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("pushbar: no document available"))?;
        let host = DomHost::new(document)
            .ok_or_else(|| JsValue::from_str("pushbar: document has no root element"))?;

        let controller = PanelStackController::new(host, config);
        let inner = Rc::new(Shared {
            committed: CommittedState::new(controller.snapshot()),
            controller: RefCell::new(controller),
        });
        bind_listeners(&inner)?;
        Ok(Self { inner })
    }

    /// Open the panel with `id`. Returns whether anything changed.
    pub fn open(&self, id: &str) -> bool {
        let Some(id) = bridge::panel_id_from_js(id) else {
            return false;
        };
        with_controller(&self.inner, |ctrl| ctrl.open(&id))
            .is_some_and(|transition| transition.is_applied())
    }

    /// Close the panel with `id`. Returns whether anything changed.
    pub fn close(&self, id: &str) -> bool {
        let Some(id) = bridge::panel_id_from_js(id) else {
            return false;
        };
        with_controller(&self.inner, |ctrl| ctrl.close(&id))
            .is_some_and(|transition| transition.is_applied())
    }

    /// Close whichever panel is active.
    #[wasm_bindgen(js_name = closeActive)]
    pub fn close_active(&self) -> bool {
        with_controller(&self.inner, |ctrl| ctrl.close_active())
            .is_some_and(|transition| transition.is_applied())
    }

    /// Id of the active panel.
    ///
    /// Inside a `pushbar_opening` / `pushbar_closing` listener this reports
    /// the state before the running transition, like the root markers do.
    #[wasm_bindgen(getter, js_name = activeId)]
    pub fn active_id(&self) -> Option<String> {
        self.inner.committed.active_id()
    }

    /// Whether any panel holds the page lock. Same timing as `activeId`.
    #[wasm_bindgen(getter, js_name = isLocked)]
    pub fn is_locked(&self) -> bool {
        self.inner.committed.is_locked()
    }

    /// JSON snapshot: `{"active": id|null, "trail": [ids], "locked": bool}`.
    #[wasm_bindgen(js_name = snapshotJson)]
    pub fn snapshot_json(&self) -> String {
        self.inner.committed.to_json()
    }
}
