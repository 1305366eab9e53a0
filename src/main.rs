//! Cidview CLI entrypoint for reviewing clinical-note CID annotations.

use std::io::{self, Write};
use std::process::ExitCode;

use cidview::{CidviewConfig, CliError, ConfigError};
use ortho_config::OrthoConfig;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            if writeln!(io::stderr().lock(), "{error}").is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), CliError> {
    let config = load_config()?;
    cidview::cli::run(&config)
}

/// Loads configuration from CLI, environment, and files.
///
/// # Errors
///
/// Returns [`ConfigError::Load`] when ortho-config fails to parse arguments
/// or load configuration files.
fn load_config() -> Result<CidviewConfig, ConfigError> {
    CidviewConfig::load().map_err(|error| ConfigError::Load {
        message: error.to_string(),
    })
}
