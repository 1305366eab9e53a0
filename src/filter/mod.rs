//! The annotation table filter: view parameters, status filtering, row
//! filtering, column projection, and preview derivation.
//!
//! Every operation here is a pure transformation: the source table is never
//! mutated, and the same inputs always yield the same outputs. The filtered
//! view is recomputed from scratch on every interaction.

use crate::table::{AnnotationItem, AnnotationRow, AnnotationTable, ModelItems, ValidationStatus};

/// Character budget for the overview grid's note preview.
pub const OVERVIEW_PREVIEW_CHARS: usize = 200;

/// The analyst's current filter selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    /// Case-insensitive substring matched against the note text; blank
    /// (empty or whitespace-only) keeps every row.
    pub query: String,
    /// Model columns to include, in display order. Must be a subset of the
    /// table's model columns.
    pub selected_models: Vec<String>,
    /// Whether ✅-prefixed items survive filtering.
    pub show_validated: bool,
    /// Whether ❌-prefixed items survive filtering.
    pub show_unvalidated: bool,
}

impl ViewParams {
    /// Parameters that show every row, every model column of the table, and
    /// both statuses.
    #[must_use]
    pub fn show_all(table: &AnnotationTable) -> Self {
        Self {
            query: String::new(),
            selected_models: table.model_names.clone(),
            show_validated: true,
            show_unvalidated: true,
        }
    }
}

/// A filtered, projected view of the annotation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    /// Model columns present in the view, in display order.
    pub models: Vec<String>,
    /// Surviving rows, in table order.
    pub rows: Vec<AnnotationRow>,
}

impl TableView {
    /// Returns the view row with the given note id.
    ///
    /// `None` is the normal not-found outcome, distinct from an empty
    /// filter result; callers render it as an informational message.
    #[must_use]
    pub fn lookup(&self, note_id: u64) -> Option<&AnnotationRow> {
        self.rows.iter().find(|row| row.note_id == note_id)
    }
}

/// The pair of tables produced by [`apply_view`]: the full view used for
/// detail display and persistence, and its truncated twin for the overview
/// grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedView {
    /// Full note text and filtered item lists.
    pub view: TableView,
    /// Identical to `view` except the note text is truncated to
    /// [`OVERVIEW_PREVIEW_CHARS`] characters.
    pub preview: TableView,
}

/// Applies the four-way status filter to an item list.
///
/// Both toggles on returns the list unchanged; validated-only keeps
/// ✅-prefixed items; unvalidated-only keeps ❌-prefixed items; both
/// toggles off returns an empty list (a deliberate outcome, not a bug).
/// The filter is stable: output order equals input order.
#[must_use]
pub fn filter_by_status(
    items: &[AnnotationItem],
    show_validated: bool,
    show_unvalidated: bool,
) -> Vec<AnnotationItem> {
    match (show_validated, show_unvalidated) {
        (true, true) => items.to_vec(),
        (true, false) => keep_status(items, ValidationStatus::Validated),
        (false, true) => keep_status(items, ValidationStatus::Unvalidated),
        (false, false) => Vec::new(),
    }
}

fn keep_status(items: &[AnnotationItem], wanted: ValidationStatus) -> Vec<AnnotationItem> {
    items
        .iter()
        .filter(|item| item.status() == wanted)
        .cloned()
        .collect()
}

/// Produces the filtered view and its preview twin from the normalized
/// table and the current parameters.
///
/// Rows are kept when the note text contains the query as a
/// case-insensitive substring (blank query keeps all). Whitespace inside a
/// non-blank query is matched literally. Columns are
/// projected to exactly `selected_models`, in selection order. Each
/// retained cell is passed through [`filter_by_status`]. The preview twin
/// replaces the note text with a 200-character truncation.
#[must_use]
pub fn apply_view(table: &AnnotationTable, params: &ViewParams) -> AppliedView {
    let blank = params.query.trim().is_empty();
    let query = params.query.to_lowercase();
    let rows: Vec<AnnotationRow> = table
        .rows
        .iter()
        .filter(|row| blank || row.note_text.to_lowercase().contains(&query))
        .map(|row| project_row(row, params))
        .collect();

    let preview_rows = rows
        .iter()
        .map(|row| AnnotationRow {
            note_id: row.note_id,
            note_text: truncate(&row.note_text, OVERVIEW_PREVIEW_CHARS),
            models: row.models.clone(),
        })
        .collect();

    tracing::debug!(
        rows = rows.len(),
        models = params.selected_models.len(),
        "view applied"
    );

    AppliedView {
        view: TableView {
            models: params.selected_models.clone(),
            rows,
        },
        preview: TableView {
            models: params.selected_models.clone(),
            rows: preview_rows,
        },
    }
}

/// Projects one row onto the selected model columns, filtering each cell by
/// status. A selected model absent from the row projects to an empty cell.
fn project_row(row: &AnnotationRow, params: &ViewParams) -> AnnotationRow {
    let models = params
        .selected_models
        .iter()
        .map(|model| ModelItems {
            model: model.clone(),
            items: row
                .items_for(model)
                .map(|items| {
                    filter_by_status(items, params.show_validated, params.show_unvalidated)
                })
                .unwrap_or_default(),
        })
        .collect();
    AnnotationRow {
        note_id: row.note_id,
        note_text: row.note_text.clone(),
        models,
    }
}

/// Truncates text to at most `max_len` characters, appending a single
/// ellipsis when anything was cut. A hard character cut, with no
/// word-boundary awareness.
#[must_use]
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        text.to_owned()
    } else {
        let mut cut: String = text.chars().take(max_len).collect();
        cut.push('…');
        cut
    }
}
