//! Append-only persistence sinks for review records.
//!
//! A sink accepts one flat seven-field record per submission and stores it
//! durably. When the target collection does not exist yet, the sink creates
//! it with the header row of [`crate::review::RECORD_FIELDS`]. Failures are
//! surfaced to the caller; nothing is retried or queued.

mod csv_file;
mod error;
mod sheets;

use crate::review::ReviewRecord;

pub use csv_file::CsvFileSink;
pub use error::SinkError;
pub use sheets::{DEFAULT_SHEET_TAB, SheetsSink};

/// An append-only store for review records.
#[cfg_attr(test, mockall::automock)]
pub trait ReviewSink {
    /// Appends one record.
    ///
    /// # Errors
    ///
    /// Returns a [`SinkError`] when the record could not be stored; the
    /// record is discarded and no local state changes.
    fn append(&self, record: &ReviewRecord) -> Result<(), SinkError>;
}
