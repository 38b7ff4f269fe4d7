//! DOM implementations of the rendering seams.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

use crate::config::RingStyle;
use crate::cursor::CursorFrame;
use crate::error::MotionResult;
use crate::geom::{Bounds, Offset, Size, ViewportSpace};
use crate::surface::{Animatable, CursorSurface, ElementSource, MotionTarget};
use crate::tween::{PlayDirection, Playback, Repeat, Tween};

fn collect_html(list: NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.get(i))
        .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
        .collect()
}

/// All HTML elements in the document matching `selector`.
///
/// An invalid selector logs and matches nothing.
pub fn query_all(document: &Document, selector: &str) -> Vec<HtmlElement> {
    match document.query_selector_all(selector) {
        Ok(list) => collect_html(list),
        Err(e) => {
            log::warn!("[DOM] bad selector '{}': {:?}", selector, e);
            Vec::new()
        },
    }
}

/// Descendants of `scope` matching `selector`.
pub fn query_within(scope: &Element, selector: &str) -> Vec<HtmlElement> {
    match scope.query_selector_all(selector) {
        Ok(list) => collect_html(list),
        Err(e) => {
            log::warn!("[DOM] bad selector '{}': {:?}", selector, e);
            Vec::new()
        },
    }
}

pub fn viewport_size(window: &Window) -> Size<ViewportSpace> {
    let dimension = |value: Result<JsValue, JsValue>| {
        value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0)
    };
    Size::new(dimension(window.inner_width()), dimension(window.inner_height()))
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    if let Err(e) = el.style().set_property(property, value) {
        log::warn!("[DOM] failed to set {}: {:?}", property, e);
    }
}

fn client_bounds(el: &HtmlElement) -> Bounds {
    let rect = el.get_bounding_client_rect();
    Bounds::from_coords(rect.x(), rect.y(), rect.width(), rect.height())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnimationOptions {
    duration: f64,
    delay: f64,
    easing: String,
    fill: &'static str,
    iterations: f64,
    direction: &'static str,
}

impl AnimationOptions {
    fn for_tween(tween: &Tween) -> Self {
        let (iterations, direction) = match tween.repeat {
            Repeat::Once => (1.0, "normal"),
            Repeat::Yoyo => (f64::INFINITY, "alternate"),
        };
        Self {
            duration: tween.duration_s * 1000.0,
            delay: tween.delay_s * 1000.0,
            easing: tween.ease.css(),
            fill: "both",
            iterations,
            direction,
        }
    }
}

/// An element driven by the motion layer.
pub struct DomElement {
    el: HtmlElement,
    /// Last Web Animation started on this element and the way it was played.
    animation: RefCell<Option<(JsValue, PlayDirection)>>,
}

impl DomElement {
    pub fn new(el: HtmlElement) -> Self {
        Self {
            el,
            animation: RefCell::new(None),
        }
    }

    pub fn element(&self) -> &HtmlElement {
        &self.el
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.el.get_attribute(name)
    }

    fn call_method(target: &JsValue, name: &str, args: &[&JsValue]) -> MotionResult<JsValue> {
        let method: js_sys::Function = js_sys::Reflect::get(target, &JsValue::from_str(name))?
            .dyn_into()
            .map_err(|_| format!("{} is not a function", name))?;
        let result = match args {
            [] => method.call0(target)?,
            [a, b] => method.call2(target, a, b)?,
            _ => return Err(format!("unsupported arity for {}", name).into()),
        };
        Ok(result)
    }

    fn start_animation(&self, tween: &Tween, direction: PlayDirection) -> MotionResult<JsValue> {
        let keyframes = serde_wasm_bindgen::to_value(&tween.keyframes(direction))
            .map_err(|e| e.to_string())?;
        let options = serde_wasm_bindgen::to_value(&AnimationOptions::for_tween(tween))
            .map_err(|e| e.to_string())?;
        Self::call_method(self.el.as_ref(), "animate", &[&keyframes, &options])
    }

    fn try_play(&self, tween: &Tween, direction: PlayDirection) -> MotionResult<()> {
        let mut current = self.animation.borrow_mut();

        match Playback::next(current.as_ref().map(|(_, played)| *played), direction) {
            Playback::Start => {
                let animation = self.start_animation(tween, direction)?;
                *current = Some((animation, direction));
            },
            Playback::Reverse => {
                if let Some((animation, played)) = current.as_mut() {
                    Self::call_method(animation, "reverse", &[])?;
                    *played = direction;
                }
            },
            Playback::Keep => {},
        }
        Ok(())
    }
}

impl MotionTarget for DomElement {
    fn bounds(&self) -> Bounds {
        client_bounds(&self.el)
    }

    fn translate(&self, offset: Offset) {
        set_style(&self.el, "translate", &offset.css_translate());
    }
}

impl Animatable for DomElement {
    fn bounds(&self) -> Bounds {
        client_bounds(&self.el)
    }

    fn prepare(&self, tween: &Tween) {
        let start = tween.from.to_keyframe();
        if let Some(opacity) = start.opacity {
            set_style(&self.el, "opacity", &opacity.to_string());
        }
        if let Some(transform) = &start.transform {
            set_style(&self.el, "transform", transform);
        }
        if let Some(filter) = &start.backdrop_filter {
            set_style(&self.el, "backdrop-filter", filter);
        }
    }

    fn play(&self, tween: &Tween, direction: PlayDirection) {
        if let Err(e) = self.try_play(tween, direction) {
            log::warn!("[DOM] animation failed: {}", e);
        }
    }
}

/// Selector lookups against a live document.
pub struct DocumentSource {
    document: Document,
}

impl DocumentSource {
    pub fn new(document: Document) -> Self {
        Self { document }
    }
}

fn wrap(elements: Vec<HtmlElement>) -> Vec<Rc<DomElement>> {
    elements.into_iter().map(|el| Rc::new(DomElement::new(el))).collect()
}

impl ElementSource for DocumentSource {
    type Element = DomElement;

    fn select(&self, selector: &str) -> Vec<Rc<DomElement>> {
        wrap(query_all(&self.document, selector))
    }

    fn select_within(&self, scope: &DomElement, selector: &str) -> Vec<Rc<DomElement>> {
        wrap(query_within(scope.element(), selector))
    }
}

/// The inner mark and outer ring nodes.
pub struct CursorNodes {
    inner: HtmlElement,
    outer: HtmlElement,
    ring: Cell<Option<RingStyle>>,
    visible: Cell<Option<bool>>,
}

impl CursorNodes {
    pub fn new(inner: HtmlElement, outer: HtmlElement) -> Self {
        Self {
            inner,
            outer,
            ring: Cell::new(None),
            visible: Cell::new(None),
        }
    }

    fn place(el: &HtmlElement, x: f64, y: f64) {
        set_style(
            el,
            "transform",
            &format!("translate({}px, {}px) translate(-50%, -50%)", x, y),
        );
    }
}

impl CursorSurface for CursorNodes {
    fn render(&self, frame: &CursorFrame) {
        if self.visible.replace(Some(frame.visible)) != Some(frame.visible) {
            let opacity = if frame.visible { "1" } else { "0" };
            set_style(&self.inner, "opacity", opacity);
            set_style(&self.outer, "opacity", opacity);
        }
        if !frame.visible {
            return;
        }

        Self::place(&self.inner, frame.inner.x, frame.inner.y);
        Self::place(&self.outer, frame.outer.x, frame.outer.y);

        if self.ring.replace(Some(frame.ring)) != Some(frame.ring) {
            let size = format!("{}px", frame.ring.size_px);
            set_style(&self.outer, "width", &size);
            set_style(&self.outer, "height", &size);
            set_style(&self.outer, "border-width", &format!("{}px", frame.ring.border_px));
        }
    }
}
