use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;

use cli::commands;

/// The main CLI command line interface.
#[derive(Parser)]
#[command(name = "session-aliases")]
#[command(version)]
#[command(about = "Short names for AI coding sessions")]
#[command(long_about = "Maps short, memorable alias names to session paths.\n\n\
    Aliases are stored in one JSON file (~/.claude/session-aliases.json by\n\
    default) that is written atomically, so an interrupted write never\n\
    corrupts it.")]
#[command(after_help = "EXAMPLES:\n    \
    session-aliases set auth /s/2025-01-15-abc.tmp   Create an alias\n    \
    session-aliases list --search auth               Find aliases\n    \
    session-aliases resolve auth                     Print the session path\n    \
    session-aliases rename auth auth-v1              Rename an alias\n    \
    session-aliases cleanup                          Drop aliases to deleted sessions\n\n\
    For more information about a command, run 'session-aliases <command> --help'.")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Create an alias or point an existing alias at a new session
    #[command(long_about = "Creates an alias for a session path. If the alias already exists,\n\
        its session path and title are replaced and its creation time is kept.")]
    Set(commands::set::Args),

    /// Delete an alias
    Delete(commands::delete::Args),

    /// Rename an alias, keeping its session, title and creation time
    Rename(commands::rename::Args),

    /// Set or clear the title of an alias
    Title(commands::title::Args),

    /// Print the session path for an alias, or echo a literal path
    Resolve(commands::resolve::Args),

    /// Show the full record of one alias
    Show(commands::show::Args),

    /// List aliases, most recently updated first
    #[command(long_about = "Lists aliases sorted by last update, newest first. --search\n\
        filters on alias name or title (case-insensitive).")]
    List(commands::list::Args),

    /// List every alias pointing at a session path
    ForSession(commands::for_session::Args),

    /// Remove aliases whose session no longer exists
    #[command(long_about = "Checks every alias's session path on disk and removes the\n\
        aliases whose session is gone. Relative session paths are checked\n\
        against the sessions directory next to the alias file.")]
    Cleanup(commands::cleanup::Args),

    /// Show resolved configuration
    Config(commands::config::Args),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "session_aliases=debug"
    } else {
        "session_aliases=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match cli.command {
        Commands::Set(args) => commands::set::run(args),
        Commands::Delete(args) => commands::delete::run(args),
        Commands::Rename(args) => commands::rename::run(args),
        Commands::Title(args) => commands::title::run(args),
        Commands::Resolve(args) => commands::resolve::run(args),
        Commands::Show(args) => commands::show::run(args),
        Commands::List(args) => commands::list::run(args),
        Commands::ForSession(args) => commands::for_session::run(args),
        Commands::Cleanup(args) => commands::cleanup::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
