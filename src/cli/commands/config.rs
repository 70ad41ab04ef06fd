//! Config command - show resolved configuration

use anyhow::Result;
use colored::Colorize;

use session_aliases::config::{Config, FILE_ENV, HOME_ENV};

#[derive(clap::Args)]
pub struct Args {}

pub fn run(_args: Args) -> Result<()> {
    let config = Config::load()?;
    let config_path = Config::config_path()?;

    println!("{}", "Session Aliases Configuration".bold());
    println!();
    println!("  {}  {}", "Store dir:".dimmed(), Config::store_dir()?.display());
    println!(
        "  {}     {}{}",
        "Config:".dimmed(),
        config_path.display(),
        if config_path.exists() { "" } else { " (not present)" }
    );
    println!("  {}    {}", "Aliases:".dimmed(), config.aliases_path()?.display());
    println!("  {}   {}", "Sessions:".dimmed(), config.sessions_dir()?.display());
    println!("  {} {}", "List limit:".dimmed(), config.list_limit());

    println!();
    println!("{}", "Environment:".bold());
    for var in [HOME_ENV, FILE_ENV] {
        match std::env::var(var) {
            Ok(value) => println!("  {} {}={}", "✓".green(), var, value),
            Err(_) => println!("  {} {} (unset)", "○".dimmed(), var),
        }
    }

    Ok(())
}
