//! Delete command - remove an alias.
//!
//! Only the alias is removed; the session it pointed at is untouched.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::emit;
use crate::cli::OutputFormat;
use session_aliases::AliasStore;

/// Arguments for the delete command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    session-aliases delete auth")]
pub struct Args {
    /// Alias to delete
    #[arg(value_name = "NAME")]
    pub name: String,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the delete command.
pub fn run(args: Args) -> Result<()> {
    let store = AliasStore::open_default()?;
    let result = store.delete_alias(&args.name);

    emit(args.format, result, |outcome| {
        println!(
            "{} alias {} (was {})",
            "Deleted".green(),
            outcome.alias.cyan(),
            outcome.deleted_session_path.dimmed()
        );
    })
}
