//! Compliance tag injector CLI
//!
//! Adds the required data-governance tags to storage and database
//! resources in CloudFormation and Terraform templates.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use commands::Completion;
use error::Result;

fn main() {
    match run() {
        Ok(Completion::Done) => {}
        Ok(Completion::ChangesPending) => std::process::exit(1),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<Completion> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;
    tracing::debug!("Verbose mode enabled");

    match cli.command {
        Commands::Patch {
            files,
            policy,
            dry_run,
            json,
        } => commands::run_patch(&files, &policy, dry_run, json),
        Commands::Check { files, policy, json } => commands::run_check(&files, &policy, json),
        Commands::Policy { policy } => commands::run_policy(&policy),
    }
}
