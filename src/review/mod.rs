//! Review record construction for the persistence sink.
//!
//! A [`ReviewRecord`] is built only on explicit submission and is write-once:
//! it is appended to the sink and never updated or deleted. The items
//! snapshot captures exactly what the analyst was looking at, i.e. the
//! filtered item lists of the view row, not the unfiltered originals.

use chrono::{DateTime, Local};
use serde_json::{Map, Value};

use crate::filter::truncate;
use crate::table::AnnotationRow;

/// Character budget for the persisted note preview.
pub const RECORD_PREVIEW_CHARS: usize = 240;

/// The seven sink fields, in append order. Sinks that create their target
/// collection use these as the header row.
pub const RECORD_FIELDS: [&str; 7] = [
    "timestamp",
    "note_id",
    "analyst_name",
    "note_preview",
    "review_text",
    "models_shown",
    "items_shown_snapshot",
];

/// One analyst submission, ready for the persistence sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRecord {
    /// Submission time, ISO-8601 with second precision.
    pub timestamp: String,
    /// Identifier of the reviewed note.
    pub note_id: u64,
    /// Analyst name; may be empty.
    pub analyst_name: String,
    /// Note text truncated to [`RECORD_PREVIEW_CHARS`] characters.
    pub note_preview: String,
    /// Free-text review written by the analyst.
    pub review_text: String,
    /// Comma-space-joined list of the models shown.
    pub models_shown: String,
    /// JSON object mapping each shown model to its filtered item list, in
    /// display order.
    pub items_shown_snapshot: String,
}

impl ReviewRecord {
    /// Returns the record as an ordered row matching [`RECORD_FIELDS`].
    #[must_use]
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.timestamp.clone(),
            self.note_id.to_string(),
            self.analyst_name.clone(),
            self.note_preview.clone(),
            self.review_text.clone(),
            self.models_shown.clone(),
            self.items_shown_snapshot.clone(),
        ]
    }
}

/// Builds the record for one submission.
///
/// `row` must be the row of the *filtered* view, so the snapshot reflects
/// the item lists actually visible at submission time. `selected_models`
/// gives the display order; a model missing from the row snapshots as an
/// empty list.
#[must_use]
pub fn build_review_record(
    row: &AnnotationRow,
    selected_models: &[String],
    analyst_name: &str,
    review_text: &str,
    now: DateTime<Local>,
) -> ReviewRecord {
    ReviewRecord {
        timestamp: now.format("%Y-%m-%dT%H:%M:%S").to_string(),
        note_id: row.note_id,
        analyst_name: analyst_name.to_owned(),
        note_preview: truncate(&row.note_text, RECORD_PREVIEW_CHARS),
        review_text: review_text.to_owned(),
        models_shown: selected_models.join(", "),
        items_shown_snapshot: snapshot_items(row, selected_models),
    }
}

/// Serializes the shown items as a JSON object preserving model order.
fn snapshot_items(row: &AnnotationRow, selected_models: &[String]) -> String {
    let mut snapshot = Map::new();
    for model in selected_models {
        let texts: Vec<Value> = row
            .items_for(model)
            .unwrap_or_default()
            .iter()
            .map(|item| Value::String(item.text().to_owned()))
            .collect();
        snapshot.insert(model.clone(), Value::Array(texts));
    }
    Value::Object(snapshot).to_string()
}
