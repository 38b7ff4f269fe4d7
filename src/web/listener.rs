//! DOM event listeners that unsubscribe themselves when dropped.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget};

use crate::error::MotionResult;

/// A registered listener. Dropping it removes it from its target.
pub struct EventListener {
    target: EventTarget,
    event: &'static str,
    capture: bool,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListener {
    pub fn new<F>(target: &EventTarget, event: &'static str, handler: F) -> MotionResult<Self>
    where
        F: FnMut(Event) + 'static,
    {
        Self::with_capture(target, event, false, handler)
    }

    /// Listen in the capture phase, ahead of listeners on descendants.
    pub fn with_capture<F>(
        target: &EventTarget,
        event: &'static str,
        capture: bool,
        handler: F,
    ) -> MotionResult<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let callback = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback_and_bool(
            event,
            callback.as_ref().unchecked_ref(),
            capture,
        )?;

        Ok(Self {
            target: target.clone(),
            event,
            capture,
            callback,
        })
    }
}

impl Drop for EventListener {
    fn drop(&mut self) {
        if let Err(e) = self.target.remove_event_listener_with_callback_and_bool(
            self.event,
            self.callback.as_ref().unchecked_ref(),
            self.capture,
        ) {
            log::warn!("[LISTENER] failed to remove '{}' listener: {:?}", self.event, e);
        }
    }
}
