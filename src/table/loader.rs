//! JSON table loading and cell normalization.

use std::collections::HashSet;
use std::fs;

use camino::Utf8Path;
use serde_json::{Map, Value};

use super::error::LoadError;
use super::{
    AnnotationItem, AnnotationRow, AnnotationTable, ModelItems, NOTE_ID_COLUMN, NOTE_TEXT_COLUMN,
};

/// Loads and normalizes an annotation table from a JSON file.
///
/// The file must contain a JSON array of objects, each with `note_id`,
/// `note_text`, and zero or more model columns.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read,
/// [`LoadError::Json`] when it is not an array of objects, and the
/// normalization errors described on
/// [`AnnotationTable::from_json_rows`].
pub fn load_table(path: &Utf8Path) -> Result<AnnotationTable, LoadError> {
    let contents = fs::read_to_string(path).map_err(|error| LoadError::Io {
        message: format!("{path}: {error}"),
    })?;
    let raw_rows: Vec<Map<String, Value>> =
        serde_json::from_str(&contents).map_err(|error| LoadError::Json {
            message: error.to_string(),
        })?;
    let table = normalize(&raw_rows)?;
    tracing::debug!(path = %path, rows = table.len(), "annotation table loaded");
    Ok(table)
}

/// Normalizes raw JSON rows into an [`AnnotationTable`].
pub(super) fn normalize(
    raw_rows: &[Map<String, Value>],
) -> Result<AnnotationTable, LoadError> {
    let model_names = collect_model_names(raw_rows);
    let mut rows = Vec::with_capacity(raw_rows.len());
    let mut seen_ids = HashSet::new();

    for (row_index, raw_row) in raw_rows.iter().enumerate() {
        let note_id = coerce_note_id(raw_row, row_index)?;
        if !seen_ids.insert(note_id) {
            return Err(LoadError::DuplicateNoteId { note_id });
        }
        let note_text = require_note_text(raw_row, row_index)?;
        let models = model_names
            .iter()
            .map(|model| ModelItems {
                model: model.clone(),
                items: normalize_cell(raw_row.get(model)),
            })
            .collect();
        rows.push(AnnotationRow {
            note_id,
            note_text,
            models,
        });
    }

    Ok(AnnotationTable { model_names, rows })
}

/// Collects model column names in first-seen order across all rows.
fn collect_model_names(raw_rows: &[Map<String, Value>]) -> Vec<String> {
    let mut names = Vec::new();
    for raw_row in raw_rows {
        for key in raw_row.keys() {
            if key != NOTE_ID_COLUMN && key != NOTE_TEXT_COLUMN && !names.iter().any(|n| n == key)
            {
                names.push(key.clone());
            }
        }
    }
    names
}

fn coerce_note_id(raw_row: &Map<String, Value>, row_index: usize) -> Result<u64, LoadError> {
    let value = raw_row
        .get(NOTE_ID_COLUMN)
        .ok_or_else(|| LoadError::MissingColumn {
            column: NOTE_ID_COLUMN.to_owned(),
            row_index,
        })?;
    let coerced = match value {
        Value::Number(number) => number.as_u64(),
        Value::String(text) => text.trim().parse::<u64>().ok(),
        _ => None,
    };
    coerced.ok_or_else(|| LoadError::InvalidNoteId {
        value: value.to_string(),
        row_index,
    })
}

fn require_note_text(raw_row: &Map<String, Value>, row_index: usize) -> Result<String, LoadError> {
    let value = raw_row
        .get(NOTE_TEXT_COLUMN)
        .ok_or_else(|| LoadError::MissingColumn {
            column: NOTE_TEXT_COLUMN.to_owned(),
            row_index,
        })?;
    Ok(scalar_to_text(value))
}

/// Coerces a raw model cell to an ordered item list.
///
/// Arrays pass through element-wise; null or empty-string cells become empty
/// lists; any other scalar becomes a one-element list of its string form.
/// The coercion is idempotent: a cell that is already a list of strings maps
/// to the same item list on every application.
fn normalize_cell(value: Option<&Value>) -> Vec<AnnotationItem> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(text)) if text.is_empty() => Vec::new(),
        Some(Value::Array(elements)) => elements
            .iter()
            .map(|element| AnnotationItem::new(scalar_to_text(element)))
            .collect(),
        Some(scalar) => vec![AnnotationItem::new(scalar_to_text(scalar))],
    }
}

/// Renders a JSON scalar as plain text, without quoting strings.
fn scalar_to_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
