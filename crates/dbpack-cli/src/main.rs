//! dbpack CLI - build SQLite artifacts from directory trees and export them back

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::common::ExitCode;
use commands::{build, export, gen_config, sync};

fn main() {
    let cli = Cli::parse();
    init_logger(cli.global.verbose);

    if let Err(err) = run(&cli) {
        let code = match err.downcast_ref::<ExitCode>() {
            Some(ExitCode(code)) => *code,
            None => {
                eprintln!("Error: {err:#}");
                1
            }
        };
        std::process::exit(code);
    }
}

fn run(cli: &Cli) -> Result<()> {
    match &cli.command {
        cli::Commands::Build(args) => build::execute(args, &cli.global),
        cli::Commands::Export(args) => export::execute(args, &cli.global),
        cli::Commands::Sync(args) => sync::execute(args, &cli.global),
        cli::Commands::GenConfig(args) => gen_config::execute(args, &cli.global),
    }
}

/// `warn` by default, `debug` with `--verbose`; `RUST_LOG` wins over both
fn init_logger(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .init();
}
