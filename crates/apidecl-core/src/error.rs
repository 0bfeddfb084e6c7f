//! # Error Types
//!
//! Contract faults for apidecl. All errors use `thiserror` for derive-based
//! `Display` and `Error` implementations.
//!
//! Document violations are not errors: an invalid
//! document is a successful validation call with a non-empty report.

use thiserror::Error;

/// Top-level error type for apidecl.
#[derive(Error, Debug)]
pub enum ApiDeclError {
    /// A schema name that is not registered was requested.
    #[error("unknown schema: {0:?}")]
    UnknownSchema(String),

    /// An ingested tree could not be mapped onto the value model.
    #[error("value conversion error: {0}")]
    ValueConversion(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for ApiDeclError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}

impl From<serde_yaml::Error> for ApiDeclError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Serialization(e.to_string())
    }
}
