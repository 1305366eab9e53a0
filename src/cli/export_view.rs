//! Export mode: write the filtered view as CSV to the configured path.

use std::fs::File;

use crate::config::CidviewConfig;
use crate::export::{ExportError, write_view_csv};
use crate::filter::TableView;

use super::CliError;
use super::output::write_line;

/// Writes the filtered view (full note text) as CSV to the configured
/// export path. Without a configured path there is nothing to write and
/// the call returns immediately.
///
/// # Errors
///
/// Returns [`CliError::Export`] when the file cannot be created or written.
pub fn run(view: &TableView, config: &CidviewConfig) -> Result<(), CliError> {
    let Some(path) = &config.export else {
        return Ok(());
    };
    let mut file = File::create(path).map_err(|error| ExportError::Io {
        message: format!("{path}: {error}"),
    })?;
    write_view_csv(&mut file, view)?;
    write_line(&format!("exported {} rows to {path}", view.rows.len()))
}
