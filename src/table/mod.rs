//! Annotation table data model and normalization.
//!
//! The table is loaded once per session from a JSON file and is read-only
//! thereafter. Normalization coerces note identifiers to integers and every
//! model cell to a sequence of [`AnnotationItem`] values, so downstream
//! filtering never has to distinguish scalars from lists.
//!
//! Each item keeps its raw text byte-for-byte; the validation status is
//! derived once from the ✅/❌ prefix and carried alongside, so status
//! filtering does not re-scan prefixes and display output stays identical to
//! the source data.

mod error;
mod loader;

use std::fmt;

use serde::Serialize;

pub use error::LoadError;
pub use loader::load_table;

/// Column name holding the note identifier.
pub const NOTE_ID_COLUMN: &str = "note_id";
/// Column name holding the full clinical note text.
pub const NOTE_TEXT_COLUMN: &str = "note_text";

/// Prefix marking an item as validated.
pub const VALIDATED_MARKER: &str = "✅";
/// Prefix marking an item as not validated.
pub const UNVALIDATED_MARKER: &str = "❌";

/// Validation status derived from an item's status prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStatus {
    /// The item text starts with the validated marker.
    Validated,
    /// The item text starts with the unvalidated marker.
    Unvalidated,
    /// The item text carries neither marker.
    Unmarked,
}

/// One annotation item: a CID with its status prefix.
///
/// The raw text is preserved exactly as loaded; the status is derived from
/// the prefix (leading whitespace ignored) at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnnotationItem {
    text: String,
    #[serde(skip)]
    status: ValidationStatus,
}

impl AnnotationItem {
    /// Creates an item from its raw text, deriving the validation status.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        let raw = text.into();
        let status = derive_status(&raw);
        Self { text: raw, status }
    }

    /// Returns the raw item text, unchanged from the source table.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the validation status derived from the status prefix.
    #[must_use]
    pub const fn status(&self) -> ValidationStatus {
        self.status
    }
}

impl fmt::Display for AnnotationItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn derive_status(text: &str) -> ValidationStatus {
    let trimmed = text.trim_start();
    if trimmed.starts_with(VALIDATED_MARKER) {
        ValidationStatus::Validated
    } else if trimmed.starts_with(UNVALIDATED_MARKER) {
        ValidationStatus::Unvalidated
    } else {
        ValidationStatus::Unmarked
    }
}

/// One model column of a row: the model name and its ordered item list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelItems {
    /// Model column name (the sentinel "Ouro" names the gold standard).
    pub model: String,
    /// Ordered annotation items predicted by the model for this note.
    pub items: Vec<AnnotationItem>,
}

/// One clinical note with its per-model annotation lists.
///
/// Model columns keep the table's column order; every model column present
/// in the table is present in every row after normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationRow {
    /// Unique, immutable note identifier.
    pub note_id: u64,
    /// Full clinical note text.
    pub note_text: String,
    /// Ordered model columns for this note.
    pub models: Vec<ModelItems>,
}

impl AnnotationRow {
    /// Returns the item list for a model column, or `None` when the row does
    /// not carry that column.
    #[must_use]
    pub fn items_for(&self, model: &str) -> Option<&[AnnotationItem]> {
        self.models
            .iter()
            .find(|cell| cell.model == model)
            .map(|cell| cell.items.as_slice())
    }
}

/// The normalized, read-only annotation table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotationTable {
    /// Model column names in table order.
    pub model_names: Vec<String>,
    /// Table rows in load order.
    pub rows: Vec<AnnotationRow>,
}

impl AnnotationTable {
    /// Builds a normalized table from raw JSON rows.
    ///
    /// Note ids are coerced to integers (JSON numbers or numeric strings).
    /// Every other column's cell is coerced to a sequence: arrays pass
    /// through, null or empty-string cells become empty lists, any other
    /// scalar becomes a one-element list of its string form. Model columns
    /// absent from a row are filled with empty lists so every row carries
    /// every column.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::MissingColumn`] when a row lacks `note_id` or
    /// `note_text`, [`LoadError::InvalidNoteId`] when an id cannot be
    /// coerced, and [`LoadError::DuplicateNoteId`] when ids repeat.
    pub fn from_json_rows(
        raw_rows: &[serde_json::Map<String, serde_json::Value>],
    ) -> Result<Self, LoadError> {
        loader::normalize(raw_rows)
    }

    /// Returns the row with the given note id, if present.
    #[must_use]
    pub fn row(&self, note_id: u64) -> Option<&AnnotationRow> {
        self.rows.iter().find(|row| row.note_id == note_id)
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
