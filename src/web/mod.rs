//! Browser binding.
//!
//! Discovers elements once at mount, wires DOM events into the motion
//! models and drives the cursor from `requestAnimationFrame`. Every feature
//! binds independently: a missing node or bad selector disables that feature
//! and logs a warning, nothing more.

mod dom;
mod frame_loop;
mod listener;

pub use dom::{CursorNodes, DocumentSource, DomElement};
pub use frame_loop::AnimationFrameLoop;
pub use listener::EventListener;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Event, MouseEvent, Window};

use crate::config::{parse_factor, MotionConfig};
use crate::cursor::CursorRenderer;
use crate::error::{MotionResult, OptionExt};
use crate::hover::HoverLift;
use crate::magnetic::MagneticFieldController;
use crate::parallax::ParallaxLayer;
use crate::pointer::{PointerTracker, SharedPointer};
use crate::reveal::{play_intro, ScrollRevealOrchestrator};
use crate::scheduler::Scheduler;
use crate::surface::{ElementSource, MotionTarget};

/// Initialize panic hook and logging for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("[MOTION] WASM module initialized");
}

/// Everything a mounted layer owns. Dropping it tears the layer down.
struct Mounted {
    window: Window,
    pointer: SharedPointer,
    frame_loop: Option<AnimationFrameLoop>,
    reveals: Rc<RefCell<ScrollRevealOrchestrator>>,
    // Controllers are kept alive by the listeners that capture them; held
    // here too so teardown order is explicit.
    _magnetic: Rc<RefCell<MagneticFieldController>>,
    _parallax: Rc<RefCell<ParallaxLayer>>,
    _lift: Rc<RefCell<HoverLift>>,
    listeners: Vec<EventListener>,
}

impl Mounted {
    fn evaluate_reveals(&self) {
        let height = dom::viewport_size(&self.window).height;
        self.reveals.borrow_mut().evaluate(height);
    }
}

impl Drop for Mounted {
    fn drop(&mut self) {
        if let Some(frame_loop) = self.frame_loop.as_mut() {
            frame_loop.stop();
        }
        self.listeners.clear();
        self.pointer.clear();
        log::info!("[MOTION] disposed");
    }
}

struct Binder<'a> {
    config: &'a MotionConfig,
    window: &'a Window,
    document: &'a Document,
    source: DocumentSource,
    pointer: SharedPointer,
    listeners: Vec<EventListener>,
}

impl Binder<'_> {
    fn listen<F>(&mut self, target: &web_sys::EventTarget, event: &'static str, handler: F)
    where
        F: FnMut(Event) + 'static,
    {
        match EventListener::new(target, event, handler) {
            Ok(listener) => self.listeners.push(listener),
            Err(e) => log::warn!("[MOTION] could not listen for '{}': {}", event, e),
        }
    }

    /// Pointer writes happen in the capture phase on `window`, before any
    /// element-level handler reads the tracker in the same event.
    fn bind_pointer(&mut self) -> MotionResult<()> {
        let pointer = self.pointer.clone();
        self.listeners.push(EventListener::with_capture(
            self.window,
            "mousemove",
            true,
            move |event: Event| {
                if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                    pointer.update(mouse.client_x() as f64, mouse.client_y() as f64);
                }
            },
        )?);

        let pointer = self.pointer.clone();
        self.listen(self.window, "mouseout", move |event: Event| {
            let left_document = event
                .dyn_ref::<MouseEvent>()
                .map(|mouse| mouse.related_target().is_none())
                .unwrap_or(false);
            if left_document {
                pointer.clear();
            }
        });
        Ok(())
    }

    fn bind_cursor(&mut self) -> MotionResult<AnimationFrameLoop> {
        let config = self.config;
        let cfg = &config.cursor;
        let inner = query_first(self.document, &cfg.inner_selector)?;
        let outer = query_first(self.document, &cfg.outer_selector)?;

        let renderer = Rc::new(RefCell::new(CursorRenderer::new(
            self.pointer.clone(),
            Box::new(CursorNodes::new(inner, outer)),
            cfg,
        )));

        let interactive = dom::query_all(self.document, &cfg.interactive_selector);
        for el in &interactive {
            let r = renderer.clone();
            self.listen(el, "mouseenter", move |_| r.borrow_mut().interactive_enter());
            let r = renderer.clone();
            self.listen(el, "mouseleave", move |_| r.borrow_mut().interactive_leave());
        }
        log::info!(
            "[CURSOR] bound with {} interactive element(s)",
            interactive.len()
        );

        let mut frame_loop = AnimationFrameLoop::new(renderer);
        frame_loop.start();
        Ok(frame_loop)
    }

    fn bind_magnetic(&mut self) -> Rc<RefCell<MagneticFieldController>> {
        let config = self.config;
        let cfg = &config.magnetic;
        let controller = Rc::new(RefCell::new(MagneticFieldController::new(
            self.pointer.clone(),
        )));

        let elements = self.source.select(&cfg.selector);
        for el in &elements {
            let strength = parse_factor(el.attribute(&cfg.attribute).as_deref(), cfg.default_strength);
            let handle = controller
                .borrow_mut()
                .register(el.clone() as Rc<dyn MotionTarget>, strength);

            let c = controller.clone();
            self.listen(el.element(), "mouseenter", move |_| c.borrow_mut().pointer_enter(handle));
            let c = controller.clone();
            self.listen(el.element(), "mousemove", move |_| c.borrow_mut().pointer_move(handle));
            let c = controller.clone();
            self.listen(el.element(), "mouseleave", move |_| c.borrow_mut().pointer_leave(handle));
        }
        log::info!("[MAGNETIC] bound {} element(s)", elements.len());
        controller
    }

    fn bind_parallax(&mut self) -> Rc<RefCell<ParallaxLayer>> {
        let config = self.config;
        let cfg = &config.parallax;
        let layer = Rc::new(RefCell::new(ParallaxLayer::new(
            self.pointer.clone(),
            dom::viewport_size(self.window),
            cfg.amplitude_px,
        )));

        let elements = self.source.select(&cfg.selector);
        for el in &elements {
            let depth = parse_factor(el.attribute(&cfg.attribute).as_deref(), cfg.default_depth);
            layer
                .borrow_mut()
                .register(el.clone() as Rc<dyn MotionTarget>, depth);
        }

        if !elements.is_empty() {
            let l = layer.clone();
            self.listen(self.window, "mousemove", move |_| l.borrow().pointer_moved());

            let l = layer.clone();
            let window = self.window.clone();
            self.listen(self.window, "resize", move |_| {
                l.borrow_mut().set_viewport(dom::viewport_size(&window));
            });
        }
        log::info!("[PARALLAX] bound {} element(s)", elements.len());
        layer
    }

    fn bind_hover_lift(&mut self) -> Rc<RefCell<HoverLift>> {
        let config = self.config;
        let cfg = &config.hover_lift;
        let lift = Rc::new(RefCell::new(HoverLift::new(cfg.lift_px)));

        let elements = self.source.select(&cfg.selector);
        for el in &elements {
            let handle = lift
                .borrow_mut()
                .register(el.clone() as Rc<dyn MotionTarget>);
            let l = lift.clone();
            self.listen(el.element(), "mouseenter", move |_| l.borrow().enter(handle));
            let l = lift.clone();
            self.listen(el.element(), "mouseleave", move |_| l.borrow().leave(handle));
        }
        lift
    }

    fn bind_reveals(&mut self) -> Rc<RefCell<ScrollRevealOrchestrator>> {
        let config = self.config;
        let reveals = Rc::new(RefCell::new(ScrollRevealOrchestrator::new()));
        for rule in &config.reveal.rules {
            reveals.borrow_mut().register_rule(rule, &self.source);
        }
        for intro in &config.reveal.intro {
            play_intro(intro, &self.source);
        }

        for event in ["scroll", "resize"] {
            let r = reveals.clone();
            let window = self.window.clone();
            self.listen(self.window, event, move |_| {
                let height = dom::viewport_size(&window).height;
                r.borrow_mut().evaluate(height);
            });
        }
        log::info!("[REVEAL] bound {} target(s)", reveals.borrow().len());
        reveals
    }
}

fn query_first(document: &Document, selector: &str) -> MotionResult<web_sys::HtmlElement> {
    document
        .query_selector(selector)?
        .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
        .or_missing(selector)
}

/// The mounted motion layer, exported to JavaScript.
#[wasm_bindgen]
pub struct MotionLayer {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl MotionLayer {
    /// Bind every feature to the current document.
    ///
    /// `config` is a partial `MotionConfig`; `undefined` means defaults and a
    /// malformed one falls back to defaults with a warning.
    pub fn mount(config: JsValue) -> Result<MotionLayer, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            MotionConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).unwrap_or_else(|e| {
                log::warn!("[MOTION] invalid config, using defaults: {}", e);
                MotionConfig::default()
            })
        };

        let window = web_sys::window().context("No window")?;
        let document = window.document().context("No document")?;

        let mut binder = Binder {
            config: &config,
            window: &window,
            document: &document,
            source: DocumentSource::new(document.clone()),
            pointer: PointerTracker::shared(),
            listeners: Vec::new(),
        };

        if let Err(e) = binder.bind_pointer() {
            log::warn!("[MOTION] pointer tracking unavailable: {}", e);
        }
        let frame_loop = match binder.bind_cursor() {
            Ok(frame_loop) => Some(frame_loop),
            Err(e) => {
                log::warn!("[CURSOR] disabled: {}", e);
                None
            },
        };
        let magnetic = binder.bind_magnetic();
        let parallax = binder.bind_parallax();
        let lift = binder.bind_hover_lift();
        let reveals = binder.bind_reveals();

        let mounted = Mounted {
            window: window.clone(),
            pointer: binder.pointer.clone(),
            frame_loop,
            reveals,
            _magnetic: magnetic,
            _parallax: parallax,
            _lift: lift,
            listeners: binder.listeners,
        };
        mounted.evaluate_reveals();

        log::info!(
            "[MOTION] mounted with {} listener(s)",
            mounted.listeners.len()
        );
        Ok(MotionLayer {
            mounted: Some(mounted),
        })
    }

    /// Stop the cursor frame loop.
    pub fn pause(&mut self) {
        if let Some(frame_loop) = self.mounted.as_mut().and_then(|m| m.frame_loop.as_mut()) {
            frame_loop.stop();
        }
    }

    /// Restart the cursor frame loop.
    pub fn resume(&mut self) {
        if let Some(frame_loop) = self.mounted.as_mut().and_then(|m| m.frame_loop.as_mut()) {
            frame_loop.start();
        }
    }

    /// Re-check reveal triggers, e.g. after a layout change without scrolling.
    pub fn refresh(&self) {
        if let Some(mounted) = &self.mounted {
            mounted.evaluate_reveals();
        }
    }

    /// Stop the frame loop and remove every listener.
    pub fn dispose(&mut self) {
        self.mounted.take();
    }

    #[wasm_bindgen(getter)]
    pub fn running(&self) -> bool {
        self.mounted
            .as_ref()
            .and_then(|m| m.frame_loop.as_ref())
            .map(|f| f.is_running())
            .unwrap_or(false)
    }
}
