//! Error types for annotation table loading and normalization.

use thiserror::Error;

/// Errors surfaced while loading or normalizing an annotation table.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LoadError {
    /// Reading the table file failed.
    #[error("failed to read table file: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },

    /// The table file was not valid JSON of the expected shape.
    #[error("failed to parse table JSON: {message}")]
    Json {
        /// Error detail from the JSON parser.
        message: String,
    },

    /// A required column was absent from a row.
    #[error("row {row_index} is missing required column '{column}'")]
    MissingColumn {
        /// Name of the absent column.
        column: String,
        /// Zero-based index of the offending row.
        row_index: usize,
    },

    /// A note identifier could not be coerced to a non-negative integer.
    #[error("row {row_index} has a note_id that is not a non-negative integer: {value}")]
    InvalidNoteId {
        /// The raw value that failed coercion.
        value: String,
        /// Zero-based index of the offending row.
        row_index: usize,
    },

    /// Two rows carried the same note identifier.
    #[error("note_id {note_id} appears more than once")]
    DuplicateNoteId {
        /// The repeated identifier.
        note_id: u64,
    },
}
