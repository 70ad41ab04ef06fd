//! Set command - create an alias or repoint an existing one.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::emit;
use crate::cli::OutputFormat;
use session_aliases::AliasStore;

/// Arguments for the set command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    session-aliases set auth ~/.claude/sessions/2025-01-15-abc.tmp\n    \
    session-aliases set auth /s/1 --title \"OAuth refactor\"")]
pub struct Args {
    /// Alias name (letters, digits, '-' and '_')
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Session path the alias points at
    #[arg(value_name = "SESSION_PATH")]
    pub session_path: String,

    /// Optional human-readable title
    #[arg(short, long)]
    pub title: Option<String>,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the set command.
pub fn run(args: Args) -> Result<()> {
    let store = AliasStore::open_default()?;
    let result = store.set_alias(&args.name, &args.session_path, args.title.as_deref());

    emit(args.format, result, |outcome| {
        let verb = if outcome.is_new { "Created" } else { "Updated" };
        println!(
            "{} alias {} -> {}",
            verb.green(),
            outcome.alias.cyan(),
            outcome.session_path
        );
    })
}
