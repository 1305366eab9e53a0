//! Save-review mode: build the record and append it to the sink.

use chrono::Local;

use crate::config::CidviewConfig;
use crate::filter::TableView;
use crate::review::build_review_record;
use crate::telemetry::{TelemetryEvent, TelemetrySink};

use super::CliError;
use super::output::write_line;

/// Builds a review record for the configured note and appends it to the
/// configured sink.
///
/// The record snapshots the filtered view row, so it reflects exactly the
/// items visible at submission time. On failure the record is discarded;
/// nothing is retried.
///
/// # Errors
///
/// Returns [`CliError::Config`] when the note id or review text is missing,
/// and [`CliError::Sink`] when the sink is unconfigured or the append fails.
pub fn run(
    view: &TableView,
    config: &CidviewConfig,
    telemetry: &dyn TelemetrySink,
) -> Result<(), CliError> {
    let note_id = config.require_note()?;
    let Some(row) = view.lookup(note_id) else {
        return write_line(&format!(
            "note_id {note_id} not found in the current filter; nothing saved"
        ));
    };

    let analyst = config.analyst.as_deref().unwrap_or_default();
    let review_text = config.review.as_deref().unwrap_or_default();
    let record = build_review_record(row, &view.models, analyst, review_text, Local::now());

    let sink = config.review_sink()?;
    sink.append(&record)?;
    telemetry.record(TelemetryEvent::ReviewRecorded { note_id });
    write_line(&format!("review for note_id {note_id} saved"))
}
