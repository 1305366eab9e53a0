//! CSV export of the current filtered view.
//!
//! The export carries the full, untruncated note text (never the preview),
//! one header row, and one data row per visible note, encoded as UTF-8.

mod csv;

use thiserror::Error;

pub use csv::write_view_csv;
pub(crate) use csv::csv_line;

/// Errors surfaced while writing an export.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExportError {
    /// Writing to the output failed.
    #[error("I/O error writing export: {message}")]
    Io {
        /// Error detail from the underlying write.
        message: String,
    },
}
