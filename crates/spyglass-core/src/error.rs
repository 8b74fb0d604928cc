//! Error types for decoding change records.
//!
//! Rendering itself never fails. Errors only arise where loosely-typed
//! records enter the crate and are classified into [`crate::ChangeEvent`]s.

use thiserror::Error;

/// Errors while decoding a change record.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The record is not a JSON object.
    #[error("Change record must be an object, got {0}")]
    NotAnObject(&'static str),

    /// An observable handle is missing its kind, name or id.
    #[error("Malformed observable handle: {0}")]
    MalformedHandle(String),

    /// A known change kind is missing fields or has mistyped ones.
    #[error("Malformed '{kind}' record: {source}")]
    Malformed {
        /// The change kind being decoded.
        kind: String,
        /// Underlying serde error.
        #[source]
        source: serde_json::Error,
    },

    /// The record is not valid JSON.
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for decode operations.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;
