//! Title command - set or clear an alias title.

use anyhow::Result;
use colored::Colorize;

use crate::cli::format::emit;
use crate::cli::OutputFormat;
use session_aliases::AliasStore;

/// Arguments for the title command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    session-aliases title auth \"OAuth refactor\"   Set the title\n    \
    session-aliases title auth                     Clear the title")]
pub struct Args {
    /// Alias to retitle
    #[arg(value_name = "NAME")]
    pub name: String,

    /// New title. Omit or pass an empty string to clear.
    #[arg(value_name = "TITLE")]
    pub title: Option<String>,

    /// Output format: text (default), json
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

/// Executes the title command.
pub fn run(args: Args) -> Result<()> {
    let store = AliasStore::open_default()?;
    let result = store.update_alias_title(&args.name, args.title.as_deref());

    emit(args.format, result, |outcome| match &outcome.title {
        Some(title) => println!("{} {}: {}", "Titled".green(), outcome.alias.cyan(), title),
        None => println!("{} title of {}", "Cleared".green(), outcome.alias.cyan()),
    })
}
