//! Error types for the mark pipeline.

use thiserror::Error;

/// Result type alias using [`MarkError`].
pub type Result<T> = std::result::Result<T, MarkError>;

/// Every failure is fatal to a run: no marks are produced when one is returned.
#[derive(Debug, Error)]
pub enum MarkError {
    /// Paired datasets differ in length, or their length is not `rows * cols`.
    #[error("length mismatch: expected {expected} values, found {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Degenerate mapping range or unusable grid geometry.
    #[error("configuration error: {0}")]
    ConfigError(String),

    /// A data source could not produce its values.
    #[error("data source '{source_name}' unavailable")]
    SourceUnavailable {
        source_name: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync + 'static>,
    },
}

impl MarkError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        MarkError::ConfigError(message.into())
    }
}
