//! Aware CLI Binary
//!
//! Command-line interface for the agent catalog.

use anyhow::Context;
use aware::logging::init_logging;
use aware::tooling::cli::{Cli, CliContext};
use clap::Parser;
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let mut config = CliContext::load_config(&cli.workspace, cli.config.as_deref())
        .context("Error loading configuration")?;
    cli.apply_logging_overrides(&mut config);
    init_logging(Some(&config.logging), cli.log_file.clone())
        .context("Error initializing logging")?;

    let context = CliContext::from_config(cli.workspace.clone(), &config)
        .context("Error opening agent store")?;
    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            println!("{}", output);
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
