//! Local CSV file sink.

use std::fs::OpenOptions;
use std::io::Write;

use camino::{Utf8Path, Utf8PathBuf};

use crate::export::csv_line;
use crate::review::{RECORD_FIELDS, ReviewRecord};

use super::error::SinkError;
use super::ReviewSink;

/// Appends review records to a local CSV file.
///
/// The file is created with the seven-field header row on first append;
/// later appends add one data row each.
#[derive(Debug, Clone)]
pub struct CsvFileSink {
    path: Utf8PathBuf,
}

impl CsvFileSink {
    /// Creates a sink writing to the given path.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the target path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    fn needs_header(&self) -> bool {
        match std::fs::metadata(&self.path) {
            Ok(metadata) => metadata.len() == 0,
            Err(_) => true,
        }
    }
}

impl ReviewSink for CsvFileSink {
    fn append(&self, record: &ReviewRecord) -> Result<(), SinkError> {
        let needs_header = self.needs_header();
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|error| SinkError::Io {
                message: format!("{}: {error}", self.path),
            })?;

        if needs_header {
            let header: Vec<String> = RECORD_FIELDS.iter().map(|&field| field.to_owned()).collect();
            write_row(&mut file, &header, &self.path)?;
        }
        write_row(&mut file, &record.to_row(), &self.path)?;
        tracing::debug!(path = %self.path, note_id = record.note_id, "review appended to CSV sink");
        Ok(())
    }
}

fn write_row(file: &mut std::fs::File, cells: &[String], path: &Utf8Path) -> Result<(), SinkError> {
    writeln!(file, "{}", csv_line(cells)).map_err(|error| SinkError::Io {
        message: format!("{path}: {error}"),
    })
}
