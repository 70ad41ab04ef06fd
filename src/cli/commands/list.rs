//! List command - list and search aliases.
//!
//! Aliases are shown most recently updated first. A search term filters
//! by alias name or title, ignoring case.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::print_json;
use crate::cli::OutputFormat;
use session_aliases::config::Config;
use session_aliases::storage::AliasEntry;
use session_aliases::{AliasStore, ListOptions};

/// Arguments for the list command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    session-aliases list                   List recent aliases\n    \
    session-aliases list --search auth     Filter by name or title\n    \
    session-aliases list --limit 0         Show every alias\n    \
    session-aliases list --format json     Output as JSON")]
pub struct Args {
    /// Case-insensitive filter on alias name or title
    #[arg(short, long, value_name = "TEXT")]
    pub search: Option<String>,

    /// Maximum number of aliases to display (0 for all)
    #[arg(short, long, value_name = "N")]
    pub limit: Option<usize>,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the list command.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let store = AliasStore::from_config(&config)?;

    let options = ListOptions {
        search: args.search,
        limit: Some(args.limit.unwrap_or_else(|| config.list_limit())),
    };
    let entries = store.list_aliases(&options);

    match args.format {
        OutputFormat::Json => print_json(&entries)?,
        OutputFormat::Text => {
            if entries.is_empty() {
                println!("{}", "No aliases found.".dimmed());
                println!();
                println!("Run 'session-aliases set <NAME> <SESSION_PATH>' to create one.");
                return Ok(());
            }
            print_table(&entries);
        }
    }

    Ok(())
}

/// Prints entries as an aligned table.
pub(crate) fn print_table(entries: &[AliasEntry]) {
    const NAME_WIDTH: usize = 24;
    const UPDATED_WIDTH: usize = 16;
    const TITLE_WIDTH: usize = 28;

    println!(
        "{}",
        format!(
            "{:<NAME_WIDTH$}  {:<UPDATED_WIDTH$}  {:<TITLE_WIDTH$}  {}",
            "ALIAS", "UPDATED", "TITLE", "SESSION"
        )
        .bold()
    );

    for entry in entries {
        let updated = entry
            .recency()
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());
        let title = truncate(entry.title.as_deref().unwrap_or("-"), TITLE_WIDTH);

        println!(
            "{}  {:<UPDATED_WIDTH$}  {:<TITLE_WIDTH$}  {}",
            format!("{:<NAME_WIDTH$}", entry.name).cyan(),
            updated,
            title,
            entry.session_path.dimmed()
        );
    }
}

/// Shortens `text` to at most `max` characters, marking the cut with "...".
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        format!("{}...", text.chars().take(max - 3).collect::<String>())
    }
}
