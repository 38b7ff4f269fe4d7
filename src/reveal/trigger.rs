//! Trigger lines and crossing detection.
//!
//! A trigger is written the way designers say it: `"top 85%"` means "fire
//! when the element's top edge rises above 85% of the viewport height".

use std::fmt;

use crate::error::{MotionError, MotionResult};
use crate::geom::Bounds;

/// Which element edge is compared against the trigger line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Top,
    Center,
    Bottom,
}

/// Direction the element crossed the trigger line in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Crossing {
    /// Edge moved from below the line to at/above it.
    Enter,
    /// Edge moved back below the line.
    Exit,
}

impl Crossing {
    /// Crossing implied by a change of side. `was_past` is `None` before the
    /// first evaluation, where being past the line already counts as entering.
    pub fn between(was_past: Option<bool>, now_past: bool) -> Option<Crossing> {
        match (was_past, now_past) {
            (None | Some(false), true) => Some(Crossing::Enter),
            (Some(true), false) => Some(Crossing::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriggerPoint {
    pub edge: Edge,
    /// Line position as a fraction of viewport height, `0.0..=1.0`.
    pub fraction: f64,
}

impl Default for TriggerPoint {
    fn default() -> Self {
        Self {
            edge: Edge::Top,
            fraction: 0.85,
        }
    }
}

impl fmt::Display for TriggerPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = match self.edge {
            Edge::Top => "top",
            Edge::Center => "center",
            Edge::Bottom => "bottom",
        };
        write!(f, "{} {}%", edge, (self.fraction * 1000.0).round() / 10.0)
    }
}

impl TriggerPoint {
    /// Parse `"<edge> <line>"` or just `"<line>"` (edge defaults to `top`).
    ///
    /// `<line>` is a percentage (`85%`) or one of `top`, `center`, `bottom`.
    pub fn parse(input: &str) -> MotionResult<Self> {
        let invalid = |reason: &str| MotionError::InvalidTrigger {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let tokens: Vec<&str> = input.split_whitespace().collect();
        let (edge, line) = match tokens.as_slice() {
            [line] => ("top", *line),
            [edge, line] => (*edge, *line),
            [] => return Err(invalid("empty")),
            _ => return Err(invalid("expected '<edge> <percent>'")),
        };

        let edge = match edge.to_ascii_lowercase().as_str() {
            "top" => Edge::Top,
            "center" => Edge::Center,
            "bottom" => Edge::Bottom,
            _ => return Err(invalid("edge must be top, center or bottom")),
        };

        let fraction = match line.to_ascii_lowercase().as_str() {
            "top" => 0.0,
            "center" => 0.5,
            "bottom" => 1.0,
            pct => {
                let number = pct
                    .strip_suffix('%')
                    .ok_or_else(|| invalid("line must be a percentage"))?;
                let value: f64 = number
                    .parse()
                    .map_err(|_| invalid("line is not a number"))?;
                if !(0.0..=100.0).contains(&value) {
                    return Err(invalid("line must be within 0%..100%"));
                }
                value / 100.0
            },
        };

        Ok(Self { edge, fraction })
    }

    /// Parse, falling back to `top 85%` on malformed input.
    pub fn parse_or_default(input: &str) -> Self {
        Self::parse(input).unwrap_or_else(|e| {
            log::warn!("[REVEAL] {}; using {}", e, TriggerPoint::default());
            TriggerPoint::default()
        })
    }

    fn edge_y(&self, bounds: &Bounds) -> f64 {
        match self.edge {
            Edge::Top => bounds.top(),
            Edge::Center => bounds.center().y,
            Edge::Bottom => bounds.bottom(),
        }
    }

    /// Whether the element's edge is at or above the line.
    pub fn is_past(&self, bounds: &Bounds, viewport_height: f64) -> bool {
        self.edge_y(bounds) <= self.fraction * viewport_height
    }
}
