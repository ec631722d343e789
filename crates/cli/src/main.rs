//! jarlint CLI
//!
//! Command-line front end for the binary-compatibility comparison engine:
//! opens two archive paths from disk and prints either a human-readable
//! table or the engine's wire-shaped JSON.

use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod config;
mod output;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("jarlint={log_level}")))
        .with_target(false)
        .with_level(false)
        .init();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let result = match &cli.command {
        Commands::Compare { .. } => commands::compare::run(&cli),
        Commands::Doctor { .. } => commands::doctor::run(&cli),
    };

    if let Err(ref error) = result {
        if cli.debug {
            eprintln!("{} {:?}", "Error:".red().bold(), error);
        } else {
            eprintln!("{} {}", "Error:".red().bold(), error);
            if !cli.verbose {
                eprintln!("{} Run with {} for more details", "Hint:".yellow().bold(), "--verbose".cyan());
            }
        }
        std::process::exit(1);
    }

    result
}
