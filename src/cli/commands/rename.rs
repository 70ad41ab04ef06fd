//! Rename command - move an alias to a new name.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::emit;
use crate::cli::OutputFormat;
use session_aliases::AliasStore;

/// Arguments for the rename command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    session-aliases rename auth auth-v1")]
pub struct Args {
    /// Current alias name
    #[arg(value_name = "OLD")]
    pub old_name: String,

    /// New alias name
    #[arg(value_name = "NEW")]
    pub new_name: String,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the rename command.
pub fn run(args: Args) -> Result<()> {
    let store = AliasStore::open_default()?;
    let result = store.rename_alias(&args.old_name, &args.new_name);

    emit(args.format, result, |outcome| {
        println!(
            "{} {} -> {}",
            "Renamed".green(),
            outcome.old_alias.dimmed(),
            outcome.new_alias.cyan()
        );
    })
}
