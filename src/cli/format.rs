//! Output formatting utilities for CLI commands.
//!
//! Provides a unified `OutputFormat` enum and a helper that prints a
//! store result either as colored text or as the `{ success, error? }`
//! JSON report.

use anyhow::{bail, Result};
use clap::ValueEnum;
use serde::Serialize;

use session_aliases::aliases::OperationReport;
use session_aliases::AliasError;

/// Output format options for CLI commands.
///
/// - `Text` for human-readable terminal output (default)
/// - `Json` for machine-readable output and scripting
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output (default).
    #[default]
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Prints the outcome of a mutating operation.
///
/// In JSON mode the report is printed for both success and failure, and a
/// failure still returns an error so the exit status is non-zero.
pub fn emit<T: Serialize>(
    format: OutputFormat,
    result: Result<T, AliasError>,
    on_success: impl FnOnce(&T),
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            let failure = result.as_ref().err().map(ToString::to_string);
            let report = OperationReport::from(result);
            print_json(&report)?;
            if let Some(error) = failure {
                bail!("{error}");
            }
            Ok(())
        }
        OutputFormat::Text => {
            let value = result?;
            on_success(&value);
            Ok(())
        }
    }
}

/// Prints any serializable value as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
