//! Application telemetry events and sinks.
//!
//! Cidview is a local-first tool, but lightweight telemetry helps with
//! debugging and captures operational signals such as how large the loaded
//! table is and which notes get reviewed.

use std::io;

use serde::{Deserialize, Serialize};

/// A structured telemetry event emitted by cidview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TelemetryEvent {
    /// Records the size of the annotation table after loading.
    TableLoaded {
        /// Number of rows in the normalized table.
        rows: usize,
        /// Number of model columns in the normalized table.
        models: usize,
    },
    /// Records a successful review append.
    ReviewRecorded {
        /// Identifier of the reviewed note.
        note_id: u64,
    },
}

/// A sink that can record telemetry events.
pub trait TelemetrySink {
    /// Records a telemetry event.
    fn record(&self, event: TelemetryEvent);
}

/// Telemetry sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTelemetrySink;

impl TelemetrySink for NoopTelemetrySink {
    fn record(&self, _event: TelemetryEvent) {}
}

/// Records telemetry events to stderr as JSON lines (JSONL).
///
/// This is intended for local debugging and is not transmitted anywhere.
#[derive(Debug, Default)]
pub struct StderrJsonlTelemetrySink;

impl TelemetrySink for StderrJsonlTelemetrySink {
    fn record(&self, event: TelemetryEvent) {
        let Ok(serialised) = serde_json::to_string(&event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")
}
