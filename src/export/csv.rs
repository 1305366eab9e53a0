//! CSV formatting for the view export and the file sink.

use std::io::Write;

use crate::filter::TableView;
use crate::table::AnnotationItem;

use super::ExportError;

/// Writes the filtered view as CSV to the given writer.
///
/// The header row is `note_id,note_text,<models...>` in display order.
/// Model cells join their item texts with `; `; the note text is the full
/// text, not the overview preview.
///
/// # Errors
///
/// Returns [`ExportError::Io`] when writing to the output fails.
pub fn write_view_csv<W: Write>(writer: &mut W, view: &TableView) -> Result<(), ExportError> {
    let mut header = vec!["note_id".to_owned(), "note_text".to_owned()];
    header.extend(view.models.iter().cloned());
    write_line(writer, &csv_line(&header))?;

    for row in &view.rows {
        let mut cells = vec![row.note_id.to_string(), row.note_text.clone()];
        for model_cell in &row.models {
            cells.push(join_items(&model_cell.items));
        }
        write_line(writer, &csv_line(&cells))?;
    }
    Ok(())
}

fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<(), ExportError> {
    writeln!(writer, "{line}").map_err(|error| ExportError::Io {
        message: error.to_string(),
    })
}

fn join_items(items: &[AnnotationItem]) -> String {
    items
        .iter()
        .map(AnnotationItem::text)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Joins cells into one CSV line, escaping as needed.
pub(crate) fn csv_line(cells: &[String]) -> String {
    cells
        .iter()
        .map(|cell| csv_escape(cell))
        .collect::<Vec<_>>()
        .join(",")
}

/// Escapes a value for CSV: wrapped in quotes when it contains a comma,
/// quote, or newline, with inner quotes doubled.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}
