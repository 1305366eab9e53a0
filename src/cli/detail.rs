//! Detail mode: print one note's full text and model panels.

use crate::filter::TableView;
use crate::render::detail_view;
use crate::table::AnnotationRow;

use super::CliError;
use super::output::write_line;

/// Prints the detail view for the requested note, defaulting to the first
/// row of the filtered view when no note id is given. An id absent from the
/// view, or an empty view with no id, prints an informational message.
///
/// # Errors
///
/// Returns [`CliError::Io`] when writing to the terminal fails.
pub fn run(view: &TableView, note: Option<u64>) -> Result<(), CliError> {
    match selected_row(view, note) {
        Some(row) => write_line(&detail_view(row)),
        None => match note {
            Some(note_id) => {
                write_line(&format!("note_id {note_id} not found in the current filter"))
            }
            None => write_line("no notes match the current filter"),
        },
    }
}

/// Resolves the row to detail: an explicit note id looks up the view, no id
/// falls back to the view's first row.
fn selected_row(view: &TableView, note: Option<u64>) -> Option<&AnnotationRow> {
    match note {
        Some(note_id) => view.lookup(note_id),
        None => view.rows.first(),
    }
}
