//! GravityController - the JS-facing handle
//!
//! Owns the orchestrator and every browser timer of the current session.
//! Timer callbacks hold only a weak reference and skip their work when the
//! controller is busy or gone.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::prelude::*;

use crate::domain::config::GravityConfig;
use crate::simulation::{GravityOrchestrator, Phase, SessionStats};

use super::dom::DomPage;
use super::schedule::{after, FrameLoop, Interval, Listener};

struct Shared {
    orchestrator: GravityOrchestrator<DomPage>,
    /// `None` when there is no document to act on
    page: Option<DomPage>,
    stepper: Option<Interval>,
    frames: Option<FrameLoop>,
    pointer: Option<Listener>,
    /// Bumped per trigger; stale timeouts compare against it
    generation: u32,
    on_active_change: Option<js_sys::Function>,
}

impl Shared {
    /// Drop the listener and both loops
    fn stop_schedule(&mut self) {
        self.pointer = None;
        self.stepper = None;
        self.frames = None;
    }
}

fn with_shared<R>(weak: &Weak<RefCell<Shared>>, f: impl FnOnce(&mut Shared) -> R) -> Option<R> {
    let shared = weak.upgrade()?;
    let mut guard = shared.try_borrow_mut().ok()?;
    Some(f(&mut guard))
}

fn notify(callback: Option<js_sys::Function>, active: bool) {
    if let Some(callback) = callback {
        if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_bool(active)) {
            gravity_warn!("active-change callback threw: {:?}", e);
        }
    }
}

#[wasm_bindgen]
pub struct GravityController {
    shared: Rc<RefCell<Shared>>,
}

#[wasm_bindgen]
impl GravityController {
    /// Create a controller; `config_json` overrides any subset of defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: Option<String>) -> Result<GravityController, JsValue> {
        let config = match config_json.as_deref() {
            Some(json) => GravityConfig::from_json(json).map_err(|e| JsValue::from_str(&e))?,
            None => GravityConfig::default(),
        };

        let page = DomPage::from_window();
        if page.is_none() {
            gravity_warn!("no document; gravity disabled");
        }

        Ok(GravityController {
            shared: Rc::new(RefCell::new(Shared {
                orchestrator: GravityOrchestrator::new(config),
                page,
                stepper: None,
                frames: None,
                pointer: None,
                generation: 0,
                on_active_change: None,
            })),
        })
    }

    /// Explode the page. No-op unless idle. Returns whether it started.
    pub fn trigger(&self) -> bool {
        let started = match self.shared.try_borrow_mut() {
            Ok(mut shared) => start_session(&self.shared, &mut shared),
            Err(_) => false,
        };
        if started {
            let callback = self.shared.try_borrow().ok().and_then(|s| s.on_active_change.clone());
            notify(callback, true);
        }
        started
    }

    /// Begin the return animation. Safe to call at any time.
    pub fn reset(&self) {
        let Ok(mut guard) = self.shared.try_borrow_mut() else {
            return;
        };
        let shared = &mut *guard;
        let Some(page) = shared.page.clone() else {
            return;
        };
        // Phase flips before the loops are torn down
        if !shared.orchestrator.reset(&page) {
            return;
        }
        shared.stop_schedule();

        let weak = Rc::downgrade(&self.shared);
        let generation = shared.generation;
        let delay = shared.orchestrator.config().timing.restore_ms;
        if let Err(e) = after(page.window(), delay, move || finish_session(&weak, generation)) {
            gravity_warn!("restore timer failed: {:?}", e);
            drop(guard);
            finish_session(&Rc::downgrade(&self.shared), generation);
        }
    }

    #[wasm_bindgen(getter, js_name = isActive)]
    pub fn is_active(&self) -> bool {
        self.shared
            .try_borrow()
            .map(|s| s.orchestrator.is_active())
            .unwrap_or(true)
    }

    /// `idle`, `exploding`, `active` or `restoring`
    #[wasm_bindgen(getter)]
    pub fn phase(&self) -> String {
        let phase = self.shared.try_borrow().map(|s| s.orchestrator.phase()).unwrap_or(Phase::Exploding);
        match phase {
            Phase::Idle => "idle",
            Phase::Exploding => "exploding",
            Phase::Active => "active",
            Phase::Restoring => "restoring",
        }
        .to_string()
    }

    /// Called with the active flag on every trigger and completed reset
    #[wasm_bindgen(js_name = setOnActiveChange)]
    pub fn set_on_active_change(&self, callback: Option<js_sys::Function>) {
        if let Ok(mut shared) = self.shared.try_borrow_mut() {
            shared.on_active_change = callback;
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.shared
            .try_borrow()
            .map(|s| s.orchestrator.stats())
            .unwrap_or_default()
    }

    #[wasm_bindgen(js_name = configJson)]
    pub fn config_json(&self) -> String {
        self.shared
            .try_borrow()
            .map(|s| s.orchestrator.config().to_json())
            .unwrap_or_default()
    }
}

fn start_session(rc: &Rc<RefCell<Shared>>, shared: &mut Shared) -> bool {
    let Some(page) = shared.page.clone() else {
        gravity_log!("trigger ignored: no document");
        return false;
    };
    if !shared.orchestrator.trigger(&page) {
        return false;
    }
    shared.generation = shared.generation.wrapping_add(1);
    let generation = shared.generation;
    let timing = shared.orchestrator.config().timing;
    let window = page.window().clone();

    let weak = Rc::downgrade(rc);
    let mut last = js_sys::Date::now();
    shared.stepper = Interval::start(&window, timing.step_ms.round() as i32, move || {
        let now = js_sys::Date::now();
        let elapsed = now - last;
        last = now;
        with_shared(&weak, |s| s.orchestrator.tick(elapsed));
    })
    .map_err(|e| gravity_warn!("stepper failed to start: {:?}", e))
    .ok();

    let weak = Rc::downgrade(rc);
    shared.frames = FrameLoop::start(&window, move || {
        with_shared(&weak, |s| match s.page.as_ref() {
            Some(page) => s.orchestrator.render(page).is_some(),
            None => false,
        })
        // Busy this frame (a reset in progress); try again next frame
        .unwrap_or(true)
    })
    .map_err(|e| gravity_warn!("frame loop failed to start: {:?}", e))
    .ok();

    let weak = Rc::downgrade(rc);
    if let Err(e) = after(&window, timing.listener_delay_ms, move || arm_pointer(&weak, generation)) {
        gravity_warn!("pointer timer failed: {:?}", e);
    }
    true
}

fn arm_pointer(weak: &Weak<RefCell<Shared>>, generation: u32) {
    let handler_weak = weak.clone();
    with_shared(weak, |s| {
        if s.generation != generation || !s.orchestrator.arm_interaction() {
            return;
        }
        let Some(page) = s.page.as_ref() else {
            return;
        };
        let listener = Listener::add(page.window(), "mousedown", move |event: web_sys::MouseEvent| {
            with_shared(&handler_weak, |s| {
                if let Some(page) = s.page.as_ref() {
                    s.orchestrator
                        .pointer_down(page, event.client_x() as f64, event.client_y() as f64);
                }
            });
        });
        s.pointer = listener.map_err(|e| gravity_warn!("mousedown listener failed: {:?}", e)).ok();
    });
}

fn finish_session(weak: &Weak<RefCell<Shared>>, generation: u32) {
    let callback = with_shared(weak, |s| {
        if s.generation != generation {
            return None;
        }
        let page = s.page.clone()?;
        if !s.orchestrator.finish_reset(&page) {
            return None;
        }
        Some(s.on_active_change.clone())
    })
    .flatten();

    if let Some(callback) = callback {
        notify(callback, false);
    }
}
