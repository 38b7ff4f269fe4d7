//! `requestAnimationFrame` scheduler.
//!
//! The callback holds only a weak reference to the loop state, so dropping
//! the loop breaks the closure cycle and the next frame becomes a no-op.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::scheduler::{Scheduler, SharedTask};

struct LoopState {
    running: Cell<bool>,
    request_id: Cell<Option<i32>>,
    callback: RefCell<Option<Closure<dyn FnMut(f64)>>>,
}

impl LoopState {
    fn request_next(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let callback = self.callback.borrow();
        let Some(callback) = callback.as_ref() else {
            return;
        };
        match window.request_animation_frame(callback.as_ref().unchecked_ref()) {
            Ok(id) => self.request_id.set(Some(id)),
            Err(e) => {
                log::warn!("[FRAME_LOOP] requestAnimationFrame failed: {:?}", e);
                self.running.set(false);
            },
        }
    }
}

pub struct AnimationFrameLoop {
    task: SharedTask,
    state: Rc<LoopState>,
}

impl AnimationFrameLoop {
    pub fn new(task: SharedTask) -> Self {
        Self {
            task,
            state: Rc::new(LoopState {
                running: Cell::new(false),
                request_id: Cell::new(None),
                callback: RefCell::new(None),
            }),
        }
    }
}

impl Scheduler for AnimationFrameLoop {
    fn start(&mut self) {
        if self.state.running.get() {
            return;
        }
        self.state.running.set(true);

        let weak: Weak<LoopState> = Rc::downgrade(&self.state);
        let task = self.task.clone();
        let callback = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(state) = weak.upgrade() else {
                return;
            };
            if !state.running.get() {
                return;
            }
            state.request_id.set(None);
            task.borrow_mut().on_frame(timestamp_ms);
            state.request_next();
        }) as Box<dyn FnMut(f64)>);

        *self.state.callback.borrow_mut() = Some(callback);
        self.state.request_next();
        log::debug!("[FRAME_LOOP] started");
    }

    fn stop(&mut self) {
        if !self.state.running.replace(false) {
            return;
        }
        if let (Some(id), Some(window)) = (self.state.request_id.take(), web_sys::window()) {
            if let Err(e) = window.cancel_animation_frame(id) {
                log::warn!("[FRAME_LOOP] cancelAnimationFrame failed: {:?}", e);
            }
        }
        self.state.callback.borrow_mut().take();
        log::debug!("[FRAME_LOOP] stopped");
    }

    fn is_running(&self) -> bool {
        self.state.running.get()
    }
}

impl Drop for AnimationFrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
