//! Cleanup command - drop aliases whose session no longer exists.
//!
//! A session exists if its path exists on disk. Relative session paths
//! are checked against the sessions directory next to the alias file.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;

use crate::cli::format::print_json;
use crate::cli::OutputFormat;
use session_aliases::config::Config;
use session_aliases::{AliasStore, ListOptions};

/// Arguments for the cleanup command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    session-aliases cleanup              Remove aliases to missing sessions\n    \
    session-aliases cleanup --dry-run    Show what would be removed")]
pub struct Args {
    /// Report stale aliases without removing them
    #[arg(long)]
    pub dry_run: bool,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the cleanup command.
pub fn run(args: Args) -> Result<()> {
    let config = Config::load()?;
    let store = AliasStore::from_config(&config)?;
    let sessions_dir = config.sessions_dir()?;

    if args.dry_run {
        return dry_run(&store, &sessions_dir, args.format);
    }

    let report = store
        .cleanup_aliases(|session_path| session_exists(&sessions_dir, session_path))
        .context("Failed to check session paths")?;

    if args.format == OutputFormat::Json {
        print_json(&report)?;
    } else if let Some(ref error) = report.error {
        println!("{}", error.red());
    } else if report.removed == 0 {
        println!(
            "{}",
            format!("All {} aliases point at existing sessions.", report.total_checked).dimmed()
        );
    } else {
        for removed in &report.removed_aliases {
            println!(
                "  {} {} ({})",
                "-".red(),
                removed.name.cyan(),
                removed.session_path.dimmed()
            );
        }
        println!(
            "{} {} of {} aliases",
            "Removed".green(),
            report.removed,
            report.total_checked
        );
    }

    if let Some(error) = report.error {
        anyhow::bail!(error);
    }
    Ok(())
}

fn dry_run(store: &AliasStore, sessions_dir: &Path, format: OutputFormat) -> Result<()> {
    let mut stale = Vec::new();
    for entry in store.list_aliases(&ListOptions::default()) {
        if !session_exists(sessions_dir, &entry.session_path)
            .with_context(|| format!("Failed to check {}", entry.session_path))?
        {
            stale.push(entry);
        }
    }

    match format {
        OutputFormat::Json => print_json(&stale)?,
        OutputFormat::Text if stale.is_empty() => {
            println!("{}", "No stale aliases.".dimmed());
        }
        OutputFormat::Text => {
            println!("{}", "Would remove:".bold());
            for entry in &stale {
                println!("  {} ({})", entry.name.cyan(), entry.session_path.dimmed());
            }
        }
    }

    Ok(())
}

/// Checks whether a session path exists, resolving relative paths against
/// `sessions_dir`.
fn session_exists(sessions_dir: &Path, session_path: &str) -> std::io::Result<bool> {
    resolve_session_path(sessions_dir, session_path).try_exists()
}

fn resolve_session_path(sessions_dir: &Path, session_path: &str) -> PathBuf {
    let path = Path::new(session_path);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        sessions_dir.join(path)
    }
}
