//! Error types for postmap

use thiserror::Error;

/// postmap error types
///
/// Conversion itself never fails; these cover start-up (registry and option
/// construction) and the edges that read or write JSON text.
#[derive(Debug, Error)]
pub enum MapError {
    /// Two conversion routines were registered for the same concrete type.
    #[error("Duplicate conversion routine for type: {type_name}")]
    DuplicateRoutine {
        /// Rust type name of the conflicting entity
        type_name: &'static str,
    },
    /// Mapper options failed validation.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    /// Configuration file could not be interpreted.
    #[error("Config error: {0}")]
    Config(String),
    /// I/O operation failed while reading or writing data.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON parsing or serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, MapError>;
