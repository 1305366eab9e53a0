//! Error types for the review persistence sinks.

use thiserror::Error;

/// Errors surfaced while appending a review record.
///
/// No sink retries: a failed append is reported to the caller and the
/// attempted record is discarded.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SinkError {
    /// Required sink credentials or identifiers were absent. Fatal to the
    /// save action only; viewing and filtering are unaffected.
    #[error("sink configuration error: {message}")]
    Configuration {
        /// Details about the missing or invalid setting.
        message: String,
    },

    /// A local file operation failed.
    #[error("I/O error appending review: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The HTTP transport failed before a response was received.
    #[error("network error talking to the sheet service: {message}")]
    Network {
        /// Transport-level error detail.
        message: String,
    },

    /// The sheet service rejected the append.
    #[error("sheet service rejected the append: {message}")]
    Append {
        /// Response detail from the service.
        message: String,
    },
}
