//! Tween requests handed to the animation timeline.
//!
//! The motion layer never interpolates reveal properties itself. It decides
//! when a transition fires and in which direction, then hands a [`Tween`] to
//! an [`Animatable`](crate::surface::Animatable). In the browser that is the
//! Web Animations API, which is why a tween can render itself as keyframes.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Direction a reveal transition plays in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/")]
pub enum PlayDirection {
    Forward,
    Reverse,
}

/// What happens to an element's animation when a direction is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    /// Nothing has played yet.
    Start,
    /// Flip the existing animation in place, continuing from where it is.
    Reverse,
    /// Already playing that way.
    Keep,
}

impl Playback {
    pub fn next(current: Option<PlayDirection>, requested: PlayDirection) -> Self {
        match current {
            None => Playback::Start,
            Some(played) if played != requested => Playback::Reverse,
            Some(_) => Playback::Keep,
        }
    }
}

/// Named easing curves, mapped to cubic-bezier control points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/")]
pub enum Ease {
    Linear,
    Power2Out,
    #[default]
    Power3Out,
    Power4Out,
    ExpoOut,
    SineInOut,
}

impl Ease {
    /// Cubic-bezier control points `(x1, y1, x2, y2)`.
    pub fn control_points(&self) -> (f64, f64, f64, f64) {
        match self {
            Ease::Linear => (0.0, 0.0, 1.0, 1.0),
            Ease::Power2Out => (0.25, 0.46, 0.45, 0.94),
            Ease::Power3Out => (0.215, 0.61, 0.355, 1.0),
            Ease::Power4Out => (0.165, 0.84, 0.44, 1.0),
            Ease::ExpoOut => (0.19, 1.0, 0.22, 1.0),
            Ease::SineInOut => (0.445, 0.05, 0.55, 0.95),
        }
    }

    /// CSS `easing` value.
    pub fn css(&self) -> String {
        match self {
            Ease::Linear => "linear".to_string(),
            _ => {
                let (x1, y1, x2, y2) = self.control_points();
                format!("cubic-bezier({}, {}, {}, {})", x1, y1, x2, y2)
            },
        }
    }
}

/// How many times a tween runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/")]
pub enum Repeat {
    #[default]
    Once,
    /// Forever, alternating direction each iteration.
    Yoyo,
}

/// Snapshot of the animatable visual properties. Unset fields are untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "../web/types/")]
pub struct VisualState {
    pub opacity: Option<f64>,
    /// Vertical offset in pixels.
    pub y: Option<f64>,
    /// Vertical offset in percent of the element's own height.
    pub y_percent: Option<f64>,
    pub scale: Option<f64>,
    /// Backdrop blur radius in pixels.
    pub blur_px: Option<f64>,
}

impl VisualState {
    /// Rest values for every property this state sets.
    pub fn rest_of(&self) -> VisualState {
        VisualState {
            opacity: self.opacity.map(|_| 1.0),
            y: self.y.map(|_| 0.0),
            y_percent: self.y_percent.map(|_| 0.0),
            scale: self.scale.map(|_| 1.0),
            blur_px: self.blur_px.map(|_| 0.0),
        }
    }

    /// CSS `transform` for the translation and scale parts, if any are set.
    pub fn transform(&self) -> Option<String> {
        let mut parts = Vec::new();
        if let Some(y) = self.y {
            parts.push(format!("translateY({}px)", y));
        }
        if let Some(pct) = self.y_percent {
            parts.push(format!("translateY({}%)", pct));
        }
        if let Some(scale) = self.scale {
            parts.push(format!("scale({})", scale));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(" "))
        }
    }

    pub fn to_keyframe(&self) -> Keyframe {
        Keyframe {
            opacity: self.opacity,
            transform: self.transform(),
            backdrop_filter: self.blur_px.map(|px| format!("blur({}px)", px)),
        }
    }
}

/// One Web Animations API keyframe.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Keyframe {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_filter: Option<String>,
}

/// A single transition request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/")]
pub struct Tween {
    pub from: VisualState,
    pub to: VisualState,
    pub duration_s: f64,
    #[serde(default)]
    pub delay_s: f64,
    #[serde(default)]
    pub ease: Ease,
    #[serde(default)]
    pub repeat: Repeat,
}

impl Tween {
    /// Tween from `from` to the rest values of the same properties.
    pub fn from_state(from: VisualState, duration_s: f64, ease: Ease) -> Self {
        Self {
            to: from.rest_of(),
            from,
            duration_s,
            delay_s: 0.0,
            ease,
            repeat: Repeat::Once,
        }
    }

    pub fn with_delay(mut self, delay_s: f64) -> Self {
        self.delay_s = delay_s;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Fade in while rising 40px into place.
    pub fn fade_up() -> Self {
        Self::from_state(
            VisualState {
                opacity: Some(0.0),
                y: Some(40.0),
                ..Default::default()
            },
            0.9,
            Ease::Power3Out,
        )
    }

    /// Image zoom settling from 115% to rest.
    pub fn zoom_settle() -> Self {
        Self::from_state(
            VisualState {
                scale: Some(1.15),
                ..Default::default()
            },
            1.8,
            Ease::ExpoOut,
        )
    }

    /// Start and end keyframes for the given direction.
    pub fn keyframes(&self, direction: PlayDirection) -> [Keyframe; 2] {
        match direction {
            PlayDirection::Forward => [self.from.to_keyframe(), self.to.to_keyframe()],
            PlayDirection::Reverse => [self.to.to_keyframe(), self.from.to_keyframe()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_flips_in_place() {
        use PlayDirection::*;

        assert_eq!(Playback::next(None, Forward), Playback::Start);
        assert_eq!(Playback::next(Some(Forward), Reverse), Playback::Reverse);
        assert_eq!(Playback::next(Some(Reverse), Forward), Playback::Reverse);
        assert_eq!(Playback::next(Some(Forward), Forward), Playback::Keep);
    }

    #[test]
    fn test_rest_of_only_touches_set_properties() {
        let from = VisualState {
            opacity: Some(0.0),
            scale: Some(1.15),
            ..Default::default()
        };
        let rest = from.rest_of();
        assert_eq!(rest.opacity, Some(1.0));
        assert_eq!(rest.scale, Some(1.0));
        assert_eq!(rest.y, None);
        assert_eq!(rest.blur_px, None);
    }

    #[test]
    fn test_transform_string() {
        let state = VisualState {
            y: Some(60.0),
            scale: Some(1.15),
            ..Default::default()
        };
        assert_eq!(
            state.transform().as_deref(),
            Some("translateY(60px) scale(1.15)")
        );
        assert_eq!(VisualState::default().transform(), None);
    }

    #[test]
    fn test_keyframe_serialization_skips_unset() {
        let frame = VisualState {
            opacity: Some(0.0),
            blur_px: Some(6.0),
            ..Default::default()
        }
        .to_keyframe();
        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "opacity": 0.0, "backdropFilter": "blur(6px)" })
        );
    }

    #[test]
    fn test_reverse_swaps_keyframes() {
        let tween = Tween::zoom_settle();
        let [start, end] = tween.keyframes(PlayDirection::Reverse);
        assert_eq!(start.transform.as_deref(), Some("scale(1)"));
        assert_eq!(end.transform.as_deref(), Some("scale(1.15)"));
    }

    #[test]
    fn test_ease_css() {
        assert_eq!(Ease::Linear.css(), "linear");
        assert_eq!(Ease::ExpoOut.css(), "cubic-bezier(0.19, 1, 0.22, 1)");
    }

    #[test]
    fn test_tween_deserializes_with_defaults() {
        let tween: Tween = serde_json::from_str(
            r#"{ "from": { "opacity": 0 }, "to": { "opacity": 1 }, "durationS": 0.8 }"#,
        )
        .unwrap();
        assert_eq!(tween.delay_s, 0.0);
        assert_eq!(tween.ease, Ease::Power3Out);
        assert_eq!(tween.repeat, Repeat::Once);
    }
}
