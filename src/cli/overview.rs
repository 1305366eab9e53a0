//! Overview mode: print the filtered grid with truncated note previews.

use crate::filter::TableView;
use crate::render::overview_lines;

use super::CliError;
use super::output::write_lines;

/// Prints the overview grid for the preview table.
///
/// # Errors
///
/// Returns [`CliError::Io`] when writing to the terminal fails.
pub fn run(preview: &TableView) -> Result<(), CliError> {
    write_lines(&overview_lines(preview))
}
