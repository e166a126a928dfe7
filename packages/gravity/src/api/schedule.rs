//! Browser timers as owned handles
//!
//! Dropping a handle cancels it and frees its closure. Callbacks must not
//! drop their own handle.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{EventTarget, MouseEvent, Window};

/// `setInterval`
pub(crate) struct Interval {
    window: Window,
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    pub(crate) fn start(window: &Window, every_ms: i32, tick: impl FnMut() + 'static) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(tick) as Box<dyn FnMut()>);
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            every_ms.max(1),
        )?;
        Ok(Self {
            window: window.clone(),
            id,
            _closure: closure,
        })
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.window.clear_interval_with_handle(self.id);
    }
}

type FrameSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// `requestAnimationFrame` loop; `frame` returns false to stop rescheduling
pub(crate) struct FrameLoop {
    window: Window,
    slot: FrameSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    pub(crate) fn start(window: &Window, mut frame: impl FnMut() -> bool + 'static) -> Result<Self, JsValue> {
        let slot: FrameSlot = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));

        let weak_slot = Rc::downgrade(&slot);
        let pending_in = pending.clone();
        let w = window.clone();
        *slot.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            pending_in.set(None);
            if !frame() {
                return;
            }
            let Some(slot) = weak_slot.upgrade() else {
                return;
            };
            let Ok(slot) = slot.try_borrow() else {
                return;
            };
            if let Some(closure) = slot.as_ref() {
                if let Ok(id) = w.request_animation_frame(closure.as_ref().unchecked_ref()) {
                    pending_in.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>));

        let first = match slot.borrow().as_ref() {
            Some(closure) => window.request_animation_frame(closure.as_ref().unchecked_ref())?,
            None => return Err(JsValue::from_str("frame closure missing")),
        };
        pending.set(Some(first));

        Ok(Self {
            window: window.clone(),
            slot,
            pending,
        })
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        if let Ok(mut slot) = self.slot.try_borrow_mut() {
            slot.take();
        }
    }
}

/// Mouse event listener, removed on drop
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

impl Listener {
    pub(crate) fn add(
        target: &EventTarget,
        event: &'static str,
        handler: impl FnMut(MouseEvent) + 'static,
    ) -> Result<Self, JsValue> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(MouseEvent)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

/// One-shot `setTimeout`. The closure frees itself when it runs, so callers
/// guard against stale firings instead of cancelling.
pub(crate) fn after(window: &Window, delay_ms: u32, callback: impl FnOnce() + 'static) -> Result<i32, JsValue> {
    let callback = Closure::once_into_js(callback);
    window.set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), timer_delay(delay_ms))
}

/// Browser timers take an i32; longer delays saturate instead of wrapping.
pub(crate) fn timer_delay(delay_ms: u32) -> i32 {
    i32::try_from(delay_ms).unwrap_or(i32::MAX)
}
