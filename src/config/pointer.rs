//! Pointer-driven effect settings.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Outer ring dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/")]
pub struct RingStyle {
    pub size_px: f64,
    pub border_px: f64,
}

impl RingStyle {
    pub const IDLE: RingStyle = RingStyle {
        size_px: 36.0,
        border_px: 1.0,
    };

    pub const ACTIVE: RingStyle = RingStyle {
        size_px: 56.0,
        border_px: 2.0,
    };
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "../web/types/")]
pub struct CursorConfig {
    pub inner_selector: String,
    pub outer_selector: String,
    /// Elements that enlarge the ring while hovered.
    pub interactive_selector: String,
    /// Fraction of the remaining distance the ring covers per frame.
    pub ease_factor: f64,
    pub idle_ring: RingStyle,
    pub active_ring: RingStyle,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            inner_selector: ".cursor--inner".to_string(),
            outer_selector: ".cursor--outer".to_string(),
            interactive_selector: "a, button, .btn, .chip, .card, input, textarea, .hamburger"
                .to_string(),
            ease_factor: 0.18,
            idle_ring: RingStyle::IDLE,
            active_ring: RingStyle::ACTIVE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "../web/types/")]
pub struct MagneticConfig {
    pub selector: String,
    /// Attribute holding a per-element strength override.
    pub attribute: String,
    pub default_strength: f64,
}

impl Default for MagneticConfig {
    fn default() -> Self {
        Self {
            selector: ".magnetic".to_string(),
            attribute: "data-strength".to_string(),
            default_strength: 0.3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "../web/types/")]
pub struct ParallaxConfig {
    pub selector: String,
    /// Attribute holding a per-element depth override.
    pub attribute: String,
    pub default_depth: f64,
    /// Displacement in pixels at the viewport edge for depth 1.
    pub amplitude_px: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            selector: ".parallax".to_string(),
            attribute: "data-depth".to_string(),
            default_depth: 0.1,
            amplitude_px: 20.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "../web/types/")]
pub struct HoverLiftConfig {
    pub selector: String,
    /// Vertical offset while hovered (negative lifts).
    pub lift_px: f64,
}

impl Default for HoverLiftConfig {
    fn default() -> Self {
        Self {
            selector: ".card".to_string(),
            lift_px: -6.0,
        }
    }
}
