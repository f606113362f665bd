//! Error types for the estat library.

use thiserror::Error;

/// Main error type for e-Stat operations.
#[derive(Debug, Error)]
pub enum EstatError {
    /// Transport-level failure talking to the e-Stat API.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body could not be deserialized from XML.
    #[error("XML decode error: {0}")]
    Xml(#[from] quick_xml::DeError),

    /// JSON serialization error while rendering output segments.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error (missing or invalid environment).
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required request parameter was not supplied by the caller.
    #[error("The '{0}' parameter is required.")]
    MissingParameter(&'static str),
}

/// Result type alias for e-Stat operations.
pub type Result<T> = std::result::Result<T, EstatError>;
