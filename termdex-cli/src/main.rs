mod cli;
mod commands;
mod encoding;
mod output;

use anyhow::Result;
use clap::Parser;

use crate::cli::{Cli, Command};
use crate::commands::{build, query};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Diagnostics go to stderr; stdout carries query results only.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    match cli.command {
        Command::Build(cmd) => build::run(cmd),
        Command::Query(cmd) => query::run(cmd),
    }
}
