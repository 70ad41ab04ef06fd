//! Resolve command - print the session path behind an alias.
//!
//! Input that is not an alias is printed unchanged, so scripts can pass
//! either an alias or a literal session path.

use anyhow::Result;

use session_aliases::AliasStore;

/// Arguments for the resolve command.
#[derive(clap::Args)]
#[command(after_help = "EXAMPLES:\n    \
    session-aliases resolve auth                 Prints the aliased path\n    \
    session-aliases resolve /s/2025-01-15.tmp    Prints the path unchanged")]
pub struct Args {
    /// Alias name or literal session path
    #[arg(value_name = "NAME_OR_PATH")]
    pub input: String,
}

/// Executes the resolve command.
pub fn run(args: Args) -> Result<()> {
    let store = AliasStore::open_default()?;
    println!("{}", store.resolve_session_alias(&args.input));
    Ok(())
}
