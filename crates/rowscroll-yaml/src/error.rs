//! Error types for manifest loading.

use rowscroll_core::{ColorParseError, DatasetError};

/// Error type for manifest parsing and validation.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// YAML syntax or shape error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
    /// Manifest written for an incompatible format version
    #[error("unsupported manifest version '{0}'")]
    UnsupportedVersion(String),
    /// A field holds a value outside its allowed range
    #[error("invalid value for '{field}': {message}")]
    InvalidValue {
        /// Field path
        field: String,
        /// Error message
        message: String,
    },
    /// A theme color is not a hex color
    #[error("invalid color for '{field}': {source}")]
    Color {
        /// Field path
        field: String,
        /// Parse failure
        #[source]
        source: ColorParseError,
    },
    /// A row failed validation
    #[error("invalid rows: {0}")]
    Dataset(#[from] DatasetError),
}

impl ParseError {
    pub(crate) fn invalid(field: &str, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            message: message.into(),
        }
    }
}
