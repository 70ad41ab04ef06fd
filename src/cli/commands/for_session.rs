//! For-session command - reverse lookup from a session path to its aliases.

use anyhow::Result;
use colored::Colorize;

use super::list::print_table;
use crate::cli::format::print_json;
use crate::cli::OutputFormat;
use session_aliases::AliasStore;

/// Arguments for the for-session command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    session-aliases for-session ~/.claude/sessions/2025-01-15-abc.tmp")]
pub struct Args {
    /// Session path to look up (exact match)
    #[arg(value_name = "SESSION_PATH")]
    pub session_path: String,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the for-session command.
pub fn run(args: Args) -> Result<()> {
    let store = AliasStore::open_default()?;
    let entries = store.get_aliases_for_session(&args.session_path);

    match args.format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Text if entries.is_empty() => {
            println!(
                "{}",
                format!("No aliases point at {}", args.session_path).dimmed()
            );
        }
        OutputFormat::Text => print_table(&entries),
    }

    Ok(())
}
