//! anchor-patch
//!
//! Replaces anchored, commented-out blocks in a text file with a fixed
//! replacement block.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;
use patch_core::ApplyOptions;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: logging disabled: {}", "warning".yellow().bold(), e);
    }
    tracing::debug!("verbose mode enabled");

    match cli.command {
        Commands::Apply {
            spec,
            dry_run,
            backup,
            strict,
            output,
        } => {
            let options = ApplyOptions {
                dry_run,
                backup,
                strict,
                output,
            };
            commands::run_apply(&spec, &options)
        }
        Commands::Check { spec } => commands::run_check(&spec),
    }
}
