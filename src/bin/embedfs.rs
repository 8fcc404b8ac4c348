//! embedfs CLI Binary
//!
//! Generates a Rust module that embeds the given files.

use anyhow::Context;
use clap::Parser;
use embedfs::logging::init_logging;
use embedfs::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli).context("loading configuration")?;

    if let Err(e) = init_logging(&context.config().logging) {
        eprintln!("Warning: Failed to initialize logging: {}", e);
    }

    context
        .execute(cli)
        .with_context(|| format!("generating module `{}`", cli.package))
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(report) => {
            if !report.is_empty() {
                eprintln!("{}", report);
            }
        }
        Err(e) => {
            eprintln!("embedfs: {:#}", e);
            process::exit(1);
        }
    }
}
