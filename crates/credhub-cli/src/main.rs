//! CredHub CLI entry point.

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use credhub_core::{log, CliConfig, APP_NAME, VERSION};
use credhub_types::CredhubError;

mod cli;
mod commands;
mod ui;

use cli::Cli;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => exit_on_parse_error(e),
    };

    match run(&cli).await {
        Ok(_) => Ok(()),
        Err(e) => {
            report(&e);
            std::process::exit(exit_code(&e));
        }
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = CliConfig::load()?;
    log::init(&config.log, cli.debug)?;
    tracing::debug!(version = VERSION, "{} starting", APP_NAME);

    cli.execute(&config).await
}

/// Usage errors exit with 1 like every other failure; help and version
/// requests keep clap's own behaviour.
fn exit_on_parse_error(e: clap::Error) -> ! {
    if e.use_stderr() {
        let _ = e.print();
        std::process::exit(1);
    }
    e.exit()
}

fn report(e: &anyhow::Error) {
    match e.downcast_ref::<CredhubError>() {
        Some(err) if err.is_server_message() => eprintln!("{}", err),
        _ => eprintln!("{} {:#}", "Error:".red().bold(), e),
    }
}

fn exit_code(e: &anyhow::Error) -> i32 {
    e.downcast_ref::<CredhubError>()
        .map(CredhubError::exit_code)
        .unwrap_or(1)
}
