//! Terminal output helpers shared by the operation mode handlers.

use std::io::{self, Write};

use super::CliError;

/// Writes one line to stdout.
///
/// # Errors
///
/// Returns [`CliError::Io`] when the write fails.
pub fn write_line(message: &str) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{message}").map_err(io_error)
}

/// Writes a sequence of lines to stdout.
///
/// # Errors
///
/// Returns [`CliError::Io`] when a write fails.
pub fn write_lines<S: AsRef<str>>(lines: &[S]) -> Result<(), CliError> {
    let mut stdout = io::stdout().lock();
    for line in lines {
        writeln!(stdout, "{}", line.as_ref()).map_err(io_error)?;
    }
    Ok(())
}

fn io_error(error: io::Error) -> CliError {
    CliError::Io {
        message: error.to_string(),
    }
}
