//! Show command - display one alias record.

use anyhow::{bail, Result};
use colored::Colorize;

use crate::cli::format::print_json;
use crate::cli::OutputFormat;
use session_aliases::AliasStore;

/// Arguments for the show command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    session-aliases show auth\n    \
    session-aliases show auth --format json")]
pub struct Args {
    /// Alias to display
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the show command.
pub fn run(args: Args) -> Result<()> {
    let store = AliasStore::open_default()?;

    let Some(entry) = store.resolve_alias(&args.name) else {
        bail!(
            "Alias '{}' not found. Run 'session-aliases list' to see available aliases.",
            args.name
        );
    };

    match args.format {
        OutputFormat::Json => print_json(&entry)?,
        OutputFormat::Text => {
            println!("{} {}", "Alias".bold(), entry.name.cyan());
            println!("  {}  {}", "Session:".dimmed(), entry.session_path);
            if let Some(ref title) = entry.title {
                println!("  {}    {}", "Title:".dimmed(), title);
            }
            if let Some(created) = entry.created_at {
                println!(
                    "  {}  {}",
                    "Created:".dimmed(),
                    created.format("%Y-%m-%d %H:%M:%S")
                );
            }
            if let Some(updated) = entry.updated_at {
                println!(
                    "  {}  {}",
                    "Updated:".dimmed(),
                    updated.format("%Y-%m-%d %H:%M:%S")
                );
            }
        }
    }

    Ok(())
}
