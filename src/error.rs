//! Central error types for the motion layer.
//!
//! Nothing in the motion layer is fatal: errors surface at mount time and are
//! logged per feature, so one broken selector never disables the others.
//! All errors implement `Serialize` so they can cross the JS boundary as strings.

use serde::Serialize;
use thiserror::Error;

/// Main error type for motion layer operations.
#[derive(Error, Debug)]
pub enum MotionError {
    /// Reveal trigger string could not be parsed
    #[error("Invalid trigger '{input}': {reason}")]
    InvalidTrigger { input: String, reason: String },

    /// A required DOM node was not found
    #[error("Element not found: {selector}")]
    MissingElement { selector: String },

    /// A browser API call failed
    #[error("JS error: {0}")]
    Js(String),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Serialize for MotionError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<String> for MotionError {
    fn from(msg: String) -> Self {
        MotionError::Other(msg)
    }
}

impl From<&str> for MotionError {
    fn from(msg: &str) -> Self {
        MotionError::Other(msg.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for MotionError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        MotionError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<MotionError> for wasm_bindgen::JsValue {
    fn from(err: MotionError) -> Self {
        wasm_bindgen::JsValue::from_str(&err.to_string())
    }
}

/// Extension trait for turning missing DOM lookups into errors.
pub trait OptionExt<T> {
    /// Convert None to MotionError::Other with the given message.
    fn context(self, msg: &str) -> MotionResult<T>;

    /// Convert None to MotionError::MissingElement for a selector.
    fn or_missing(self, selector: &str) -> MotionResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn context(self, msg: &str) -> MotionResult<T> {
        self.ok_or_else(|| MotionError::Other(msg.to_string()))
    }

    fn or_missing(self, selector: &str) -> MotionResult<T> {
        self.ok_or_else(|| MotionError::MissingElement {
            selector: selector.to_string(),
        })
    }
}

/// Type alias for Results using MotionError.
pub type MotionResult<T> = Result<T, MotionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MotionError::InvalidTrigger {
            input: "middle".to_string(),
            reason: "missing percentage".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid trigger 'middle': missing percentage"
        );
    }

    #[test]
    fn test_error_serialization() {
        let err = MotionError::MissingElement {
            selector: ".cursor--outer".to_string(),
        };
        let json = serde_json::to_string(&err).unwrap();
        assert_eq!(json, "\"Element not found: .cursor--outer\"");
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("nope").unwrap_err();
        let err: MotionError = json_err.into();
        assert!(matches!(err, MotionError::Json(_)));
    }

    #[test]
    fn test_from_string() {
        let err: MotionError = "test error".into();
        assert!(matches!(err, MotionError::Other(_)));
    }

    #[test]
    fn test_option_ext() {
        let missing: Option<u8> = None;
        let err = missing.or_missing(".magnetic").unwrap_err();
        assert!(matches!(err, MotionError::MissingElement { .. }));
        assert!(err.to_string().contains(".magnetic"));

        let present = Some(7).context("should not appear");
        assert_eq!(present.unwrap(), 7);

        let msg = None::<u8>.context("no window").unwrap_err().to_string();
        assert_eq!(msg, "no window");
    }
}
