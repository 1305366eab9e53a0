//! CLI operation mode handlers.
//!
//! This module contains the implementations for the operation modes:
//! - [`overview`]: Print the filtered overview grid
//! - [`detail`]: Print the detail view for one note
//! - [`export_view`]: Export the filtered view as CSV
//! - [`save_review`]: Append a review record to the persistence sink
//!
//! Output helpers are in [`output`].

pub mod detail;
pub mod export_view;
pub mod output;
pub mod overview;
pub mod save_review;

use thiserror::Error;

use crate::config::{CidviewConfig, ConfigError, OperationMode};
use crate::export::ExportError;
use crate::filter::apply_view;
use crate::sink::SinkError;
use crate::table::{LoadError, load_table};
use crate::telemetry::TelemetryEvent;

/// Errors surfaced by the CLI, aggregating every layer.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CliError {
    /// Loading or normalizing the annotation table failed.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Configuration was missing or inconsistent.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The persistence sink rejected the append.
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// Writing the export failed.
    #[error(transparent)]
    Export(#[from] ExportError),

    /// Writing to the terminal failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying write.
        message: String,
    },
}

/// Loads the table, applies the configured view, and dispatches to the
/// selected operation mode.
///
/// # Errors
///
/// Returns a [`CliError`] when loading, configuration, export, or the
/// persistence append fails. A note id absent from the filtered view is
/// not an error; the handlers print an informational message instead.
pub fn run(config: &CidviewConfig) -> Result<(), CliError> {
    let telemetry = config.telemetry_sink();
    let table = load_table(&config.resolve_table_path())?;
    telemetry.record(TelemetryEvent::TableLoaded {
        rows: table.len(),
        models: table.model_names.len(),
    });

    let params = config.view_params(&table)?;
    let applied = apply_view(&table, &params);

    match config.operation_mode() {
        OperationMode::Overview => overview::run(&applied.preview),
        OperationMode::Detail => detail::run(&applied.view, config.note),
        OperationMode::Export => export_view::run(&applied.view, config),
        OperationMode::SaveReview => save_review::run(&applied.view, config, telemetry.as_ref()),
    }
}
