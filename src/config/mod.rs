//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.cidview.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `CIDVIEW_TABLE_PATH`, `CIDVIEW_SHEET_ID`,
//!    and friends
//! 4. **Command-line arguments** – `--table-path`/`-f`, `--query`/`-q`, …
//!
//! # Configuration File
//!
//! Place `.cidview.toml` in the current directory, home directory, or XDG
//! config directory with:
//!
//! ```toml
//! table_path = "notes.json"
//! sheet_id = "1aBcD..."
//! sheet_tab = "Analises"
//! review_log = "reviews.csv"
//! ```

use std::env;

use camino::Utf8PathBuf;
use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::filter::ViewParams;
use crate::sink::{CsvFileSink, ReviewSink, SheetsSink};
use crate::table::AnnotationTable;
use crate::telemetry::{NoopTelemetrySink, StderrJsonlTelemetrySink, TelemetrySink};

/// Table file used when none is configured.
pub const DEFAULT_TABLE_PATH: &str = "notes.json";
/// Sheet service endpoint used when none is configured.
pub const DEFAULT_SHEET_ENDPOINT: &str = "https://sheets.googleapis.com";

/// Errors surfaced while loading or interpreting configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Configuration could not be loaded or merged.
    #[error("configuration error: {message}")]
    Load {
        /// Details about the configuration failure.
        message: String,
    },

    /// The requested action needs a note id and none was configured.
    #[error("a note id is required (use --note or -n)")]
    MissingNoteId,

    /// A selected model is not a column of the loaded table.
    #[error("unknown model column '{model}'")]
    UnknownModel {
        /// The model name that matched no table column.
        model: String,
    },
}

/// Operation mode determined by CLI arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Print the filtered overview grid.
    Overview,
    /// Print the detail view for one note.
    Detail,
    /// Export the filtered view as CSV.
    Export,
    /// Append a review record to the persistence sink.
    SaveReview,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `CIDVIEW_TABLE_PATH` or `--table-path`: Annotation table JSON file
/// - `CIDVIEW_QUERY` or `--query`: Note text filter
/// - `CIDVIEW_NOTE` or `--note`: Note id for the detail view
/// - `CIDVIEW_SHEET_ID`, `CIDVIEW_SHEET_TOKEN`, `CIDVIEW_SHEET_TAB`,
///   `CIDVIEW_SHEET_ENDPOINT`: Remote sheet sink settings
/// - `CIDVIEW_REVIEW_LOG` or `--review-log`: Local CSV sink path
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "CIDVIEW",
    discovery(
        dotfile_name = ".cidview.toml",
        config_file_name = "cidview.toml",
        app_name = "cidview"
    )
)]
pub struct CidviewConfig {
    /// Path of the annotation table JSON file.
    ///
    /// Defaults to `notes.json` in the current directory.
    #[ortho_config(cli_short = 'f')]
    pub table_path: Option<Utf8PathBuf>,

    /// Case-insensitive substring to match against the note text.
    #[ortho_config(cli_short = 'q')]
    pub query: Option<String>,

    /// Model columns to show, in display order.
    ///
    /// Empty means every model column of the table, in table order.
    #[ortho_config(cli_short = 'm')]
    pub models: Vec<String>,

    /// Hides ✅-validated items from every model column.
    ///
    /// Note: Environment variable `CIDVIEW_HIDE_VALIDATED` is not supported
    /// because `ortho_config` does not load boolean values from the
    /// environment.
    #[ortho_config()]
    pub hide_validated: bool,

    /// Hides ❌-unvalidated items from every model column.
    #[ortho_config()]
    pub hide_unvalidated: bool,

    /// Note id to detail or to attach a review to.
    #[ortho_config(cli_short = 'n')]
    pub note: Option<u64>,

    /// Shows the detail view without naming a note; the first row of the
    /// filtered view is detailed.
    #[ortho_config(cli_short = 'd')]
    pub detail: bool,

    /// Writes the filtered view as CSV to this path and exits.
    #[ortho_config(cli_short = 'e')]
    pub export: Option<Utf8PathBuf>,

    /// Analyst name recorded with a review; may be omitted.
    #[ortho_config(cli_short = 'a')]
    pub analyst: Option<String>,

    /// Free-text review to append to the persistence sink.
    ///
    /// Providing this selects the save-review operation mode; `--note` is
    /// then required.
    #[ortho_config(cli_short = 'r')]
    pub review: Option<String>,

    /// Path of a local CSV review log. Takes precedence over the remote
    /// sheet sink when both are configured.
    #[ortho_config()]
    pub review_log: Option<Utf8PathBuf>,

    /// Spreadsheet id of the remote sheet sink.
    #[ortho_config()]
    pub sheet_id: Option<String>,

    /// Sheet tab receiving review records. Defaults to `Analises`.
    #[ortho_config()]
    pub sheet_tab: Option<String>,

    /// Sheet service endpoint. Defaults to the public Sheets API.
    #[ortho_config()]
    pub sheet_endpoint: Option<String>,

    /// Bearer token for the sheet service.
    ///
    /// For compatibility with earlier deployments, the legacy `GSHEET_TOKEN`
    /// environment variable is read when no value is configured.
    #[ortho_config()]
    pub sheet_token: Option<String>,

    /// Emits telemetry events to stderr as JSON lines.
    #[ortho_config()]
    pub telemetry: bool,
}

impl CidviewConfig {
    /// Returns the configured table path or the default.
    #[must_use]
    pub fn resolve_table_path(&self) -> Utf8PathBuf {
        self.table_path
            .clone()
            .unwrap_or_else(|| Utf8PathBuf::from(DEFAULT_TABLE_PATH))
    }

    /// Determines the operation mode based on provided configuration.
    ///
    /// Returns `SaveReview` when a review text is present, `Export` when an
    /// export path is present, `Detail` when a note id or the detail flag is
    /// present, and `Overview` otherwise.
    #[must_use]
    pub const fn operation_mode(&self) -> OperationMode {
        if self.review.is_some() {
            OperationMode::SaveReview
        } else if self.export.is_some() {
            OperationMode::Export
        } else if self.note.is_some() || self.detail {
            OperationMode::Detail
        } else {
            OperationMode::Overview
        }
    }

    /// Builds the view parameters for the loaded table.
    ///
    /// An empty model selection expands to every model column of the table,
    /// in table order, mirroring the "all models" default of the original
    /// workflow.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownModel`] when a selected model is not a
    /// column of the table.
    pub fn view_params(&self, table: &AnnotationTable) -> Result<ViewParams, ConfigError> {
        for model in &self.models {
            if !table.model_names.iter().any(|name| name == model) {
                return Err(ConfigError::UnknownModel {
                    model: model.clone(),
                });
            }
        }
        let selected_models = if self.models.is_empty() {
            table.model_names.clone()
        } else {
            self.models.clone()
        };
        Ok(ViewParams {
            query: self.query.clone().unwrap_or_default(),
            selected_models,
            show_validated: !self.hide_validated,
            show_unvalidated: !self.hide_unvalidated,
        })
    }

    /// Returns the note id or an error if missing.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingNoteId`] when no note id is configured.
    pub const fn require_note(&self) -> Result<u64, ConfigError> {
        match self.note {
            Some(note_id) => Ok(note_id),
            None => Err(ConfigError::MissingNoteId),
        }
    }

    /// Resolves the sheet token from configuration or the legacy
    /// `GSHEET_TOKEN` environment variable.
    #[must_use]
    pub fn resolve_sheet_token(&self) -> Option<String> {
        self.sheet_token
            .clone()
            .or_else(|| env::var("GSHEET_TOKEN").ok())
    }

    /// Builds the configured review sink.
    ///
    /// A local CSV review log takes precedence; otherwise the remote sheet
    /// sink is built from the sheet settings.
    ///
    /// # Errors
    ///
    /// Returns [`crate::sink::SinkError::Configuration`] when neither a
    /// review log nor a complete sheet configuration is present.
    pub fn review_sink(&self) -> Result<Box<dyn ReviewSink>, crate::sink::SinkError> {
        if let Some(path) = &self.review_log {
            return Ok(Box::new(CsvFileSink::new(path.clone())));
        }
        let Some(sheet_id) = self.sheet_id.as_deref() else {
            return Err(crate::sink::SinkError::Configuration {
                message:
                    "no review sink configured (set --review-log or --sheet-id and a sheet token)"
                        .to_owned(),
            });
        };
        let token = self
            .resolve_sheet_token()
            .ok_or_else(|| crate::sink::SinkError::Configuration {
                message: "sheet token is required (use --sheet-token or GSHEET_TOKEN)".to_owned(),
            })?;
        let endpoint = self
            .sheet_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_SHEET_ENDPOINT);
        let tab = self
            .sheet_tab
            .as_deref()
            .unwrap_or(crate::sink::DEFAULT_SHEET_TAB);
        let sink = SheetsSink::new(endpoint, sheet_id, tab, token)?;
        Ok(Box::new(sink))
    }

    /// Builds the configured telemetry sink.
    #[must_use]
    pub fn telemetry_sink(&self) -> Box<dyn TelemetrySink> {
        if self.telemetry {
            Box::new(StderrJsonlTelemetrySink)
        } else {
            Box::new(NoopTelemetrySink)
        }
    }
}
