//! Cidview library crate for reviewing clinical-note CID annotations.
//!
//! The library loads a pre-computed annotation table (gold-standard and
//! per-model CID lists, each item marked ✅ validated or ❌ not validated),
//! filters it into the view an analyst asked for, renders overview and
//! detail text, exports the view as CSV, and appends free-text reviews to
//! an append-only persistence sink.

pub mod cli;
pub mod config;
pub mod export;
pub mod filter;
pub mod render;
pub mod review;
pub mod sink;
pub mod table;
pub mod telemetry;

pub use cli::CliError;
pub use config::{CidviewConfig, ConfigError, OperationMode};
pub use export::{ExportError, write_view_csv};
pub use filter::{AppliedView, TableView, ViewParams, apply_view, filter_by_status, truncate};
pub use review::{RECORD_FIELDS, ReviewRecord, build_review_record};
pub use sink::{CsvFileSink, ReviewSink, SheetsSink, SinkError};
pub use table::{
    AnnotationItem, AnnotationRow, AnnotationTable, LoadError, ValidationStatus, load_table,
};
