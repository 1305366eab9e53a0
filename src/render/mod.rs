//! Plain-text rendering of the overview grid and the note detail view.
//!
//! This module owns the display contract: panel titles prefix the gold
//! column with 🟨 and every other model with 🔧, and an empty item list
//! renders as a single dash.

use crate::filter::TableView;
use crate::table::{AnnotationItem, AnnotationRow};

/// Placeholder rendered for an empty item list.
pub const EMPTY_PLACEHOLDER: &str = "—";

/// Returns true when the column names the gold standard.
///
/// The comparison ignores case and surrounding whitespace, so "Ouro",
/// "ouro", and " OURO " all label the gold column.
#[must_use]
pub fn is_gold_column(model: &str) -> bool {
    model.trim().eq_ignore_ascii_case("ouro")
}

/// Returns the panel title for a model column.
#[must_use]
pub fn panel_title(model: &str) -> String {
    if is_gold_column(model) {
        "🟨 Ouro".to_owned()
    } else {
        format!("🔧 {model}")
    }
}

/// Renders one model panel: the title followed by one bulleted line per
/// item, or the placeholder dash when the list is empty.
#[must_use]
pub fn model_panel(model: &str, items: &[AnnotationItem]) -> String {
    let mut panel = panel_title(model);
    panel.push('\n');
    if items.is_empty() {
        panel.push_str(EMPTY_PLACEHOLDER);
        panel.push('\n');
    } else {
        for item in items {
            panel.push_str(&format!("- {item}\n"));
        }
    }
    panel
}

/// Renders the detail view for one row: the note id, the full note text,
/// and one panel per model column in display order.
#[must_use]
pub fn detail_view(row: &AnnotationRow) -> String {
    let mut out = format!("note_id: {}\n\n{}\n", row.note_id, row.note_text);
    for cell in &row.models {
        out.push('\n');
        out.push_str(&model_panel(&cell.model, &cell.items));
    }
    out
}

/// Renders the overview grid as one header line plus one line per row.
///
/// Columns are `note_id`, the note preview, then the selected models in
/// display order, separated by ` | `. Item lists are joined with `; ` and
/// empty lists render as the placeholder dash.
#[must_use]
pub fn overview_lines(preview: &TableView) -> Vec<String> {
    let mut header = vec!["note_id".to_owned(), "note_text".to_owned()];
    header.extend(preview.models.iter().cloned());

    let mut lines = vec![header.join(" | ")];
    for row in &preview.rows {
        let mut cells = vec![row.note_id.to_string(), row.note_text.clone()];
        for model_cell in &row.models {
            cells.push(join_items(&model_cell.items));
        }
        lines.push(cells.join(" | "));
    }
    lines
}

fn join_items(items: &[AnnotationItem]) -> String {
    if items.is_empty() {
        EMPTY_PLACEHOLDER.to_owned()
    } else {
        items
            .iter()
            .map(AnnotationItem::text)
            .collect::<Vec<_>>()
            .join("; ")
    }
}
