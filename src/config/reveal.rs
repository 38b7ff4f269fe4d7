//! Scroll reveal rules and the intro sequence.
//!
//! The defaults describe the site's own sections; each rule names a selector,
//! a trigger line and the tween that plays when the line is crossed.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::reveal::ReplayPolicy;
use crate::tween::{Ease, Repeat, Tween, VisualState};

/// Image nested inside a revealed element that zooms on its own trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/")]
pub struct NestedZoom {
    pub selector: String,
    pub trigger: String,
    pub replay: ReplayPolicy,
    pub tween: Tween,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/")]
pub struct RevealRule {
    pub selector: String,
    /// Trigger line, e.g. `"top 85%"`.
    pub trigger: String,
    pub replay: ReplayPolicy,
    pub tween: Tween,
    /// Delay added per element index.
    #[serde(default)]
    pub stagger_s: f64,
    /// When set, one element matching this selector triggers a cascade over
    /// the `selector` matches inside it.
    #[serde(default)]
    pub group_trigger: Option<String>,
    #[serde(default)]
    pub nested_zoom: Option<NestedZoom>,
}

/// Tween that plays on mount, without a scroll trigger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "../web/types/")]
pub struct IntroRule {
    pub selector: String,
    pub tween: Tween,
    #[serde(default)]
    pub stagger_s: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export, export_to = "../web/types/")]
pub struct RevealConfig {
    pub rules: Vec<RevealRule>,
    pub intro: Vec<IntroRule>,
}

fn fade(opacity: f64, y: f64) -> VisualState {
    VisualState {
        opacity: Some(opacity),
        y: Some(y),
        ..Default::default()
    }
}

impl Default for RevealConfig {
    fn default() -> Self {
        let contact_form = Tween {
            from: VisualState {
                blur_px: Some(0.0),
                ..fade(0.0, 40.0)
            },
            to: VisualState {
                blur_px: Some(6.0),
                ..fade(1.0, 0.0)
            },
            duration_s: 1.2,
            delay_s: 0.0,
            ease: Ease::Power3Out,
            repeat: Repeat::Once,
        };

        let rules = vec![
            RevealRule {
                selector: ".reveal".to_string(),
                trigger: "top 85%".to_string(),
                replay: ReplayPolicy::Once,
                tween: Tween::fade_up(),
                stagger_s: 0.05,
                group_trigger: None,
                nested_zoom: None,
            },
            RevealRule {
                selector: ".contact-form".to_string(),
                trigger: "top 85%".to_string(),
                replay: ReplayPolicy::Once,
                tween: contact_form,
                stagger_s: 0.0,
                group_trigger: None,
                nested_zoom: None,
            },
            RevealRule {
                selector: ".card".to_string(),
                trigger: "top 85%".to_string(),
                replay: ReplayPolicy::Once,
                tween: Tween::from_state(fade(0.0, 40.0), 1.0, Ease::Power2Out),
                stagger_s: 0.15,
                group_trigger: Some(".portfolio".to_string()),
                nested_zoom: None,
            },
            RevealRule {
                selector: ".portfolio-item".to_string(),
                trigger: "top 80%".to_string(),
                replay: ReplayPolicy::Toggle,
                tween: Tween::from_state(fade(0.0, 60.0), 1.3, Ease::Power4Out),
                stagger_s: 0.2,
                group_trigger: None,
                nested_zoom: Some(NestedZoom {
                    selector: "img".to_string(),
                    trigger: "top 85%".to_string(),
                    replay: ReplayPolicy::Toggle,
                    tween: Tween::zoom_settle(),
                }),
            },
        ];

        let intro = vec![
            IntroRule {
                selector: ".hero-title .line".to_string(),
                tween: Tween::from_state(
                    VisualState {
                        opacity: Some(0.0),
                        y_percent: Some(120.0),
                        ..Default::default()
                    },
                    1.1,
                    Ease::Power4Out,
                ),
                stagger_s: 0.08,
            },
            IntroRule {
                selector: ".hero-sub".to_string(),
                tween: Tween::from_state(fade(0.0, 16.0), 0.8, Ease::Power2Out).with_delay(0.2),
                stagger_s: 0.0,
            },
            IntroRule {
                selector: ".hero-cta .btn".to_string(),
                tween: Tween::from_state(fade(0.0, 14.0), 0.7, Ease::Power2Out).with_delay(0.35),
                stagger_s: 0.08,
            },
            IntroRule {
                selector: ".photo-card".to_string(),
                tween: Tween {
                    from: VisualState {
                        y: Some(0.0),
                        ..Default::default()
                    },
                    to: VisualState {
                        y: Some(-8.0),
                        ..Default::default()
                    },
                    duration_s: 2.0,
                    delay_s: 0.0,
                    ease: Ease::SineInOut,
                    repeat: Repeat::Yoyo,
                },
                stagger_s: 0.0,
            },
        ];

        Self { rules, intro }
    }
}
