use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::{cli::Cli, config::Config, error::ValidationError};

mod cli;
mod commands;
mod config;
mod date;
mod display;
mod error;
mod fetch;
mod identifier;
mod markdown;
mod record;
mod resolver;
mod store;

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("PAPER_LOG").unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Cli) -> anyhow::Result<()> {
    let config = Config::load(args.config.as_deref())?.with_repo(args.repo);
    commands::dispatch(args.command, &config)
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_tracing(args.verbose);

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            if err.downcast_ref::<ValidationError>().is_some() {
                display::error(&err);
                ExitCode::from(2)
            } else {
                display::error(format!("{err:#}"));
                ExitCode::FAILURE
            }
        }
    }
}
