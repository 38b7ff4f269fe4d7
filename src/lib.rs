//! Pointer and scroll driven motion layer.
//!
//! Custom two-part cursor, magnetic hover, pointer parallax and scroll
//! reveals. The models are platform independent and render through the
//! traits in [`surface`]; the `web` module (wasm32 only) binds them to the DOM.

pub mod config;
pub mod cursor;
pub mod error;
pub mod geom;
pub mod hover;
pub mod magnetic;
pub mod parallax;
pub mod pointer;
pub mod registry;
pub mod reveal;
pub mod scheduler;
pub mod surface;
pub mod tween;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::MotionConfig;
pub use cursor::{CursorFrame, CursorRenderer};
pub use error::{MotionError, MotionResult};
pub use hover::HoverLift;
pub use magnetic::MagneticFieldController;
pub use parallax::ParallaxLayer;
pub use pointer::{PointerTracker, SharedPointer};
pub use reveal::{ReplayPolicy, RevealSpec, ScrollRevealOrchestrator, TriggerPoint};
pub use scheduler::{FrameTask, ManualScheduler, Scheduler};
