//! Application-level errors.

use crate::logging::LoggingError;
use rowscroll_yaml::ParseError;

/// Failure while starting or driving the application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The manifest did not parse or validate
    #[error("manifest error: {0}")]
    Manifest(#[from] ParseError),
    /// Logging could not be installed
    #[error("logging error: {0}")]
    Logging(#[from] LoggingError),
    /// State could not be serialized
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// A browser API was missing or failed
    #[error("browser error: {0}")]
    Dom(String),
}

#[cfg(target_arch = "wasm32")]
impl From<wasm_bindgen::JsValue> for AppError {
    fn from(value: wasm_bindgen::JsValue) -> Self {
        Self::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<AppError> for wasm_bindgen::JsValue {
    fn from(err: AppError) -> Self {
        Self::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_error_message() {
        let err: AppError = rowscroll_yaml::Manifest::load("rowscroll: \"9.9\"\nrows: []\n")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Manifest(_)));
        assert!(err.to_string().starts_with("manifest error:"));
    }

    #[test]
    fn test_dom_error_message() {
        let err = AppError::Dom("no window".to_string());
        assert_eq!(err.to_string(), "browser error: no window");
    }
}
