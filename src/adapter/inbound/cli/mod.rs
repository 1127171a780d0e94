//! CLI module graph.

pub mod check;
pub mod command;
pub mod output;
pub mod run;

use self::command::{CheckCommand, Cli, Commands};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Dispatch a parsed command line.
pub async fn execute(cli: &Cli) -> Result<()> {
    output::configure(output::OutputConfig {
        json: cli.json,
        quiet: cli.quiet,
    });

    match &cli.command {
        Commands::Check(CheckCommand::Config) => check::execute_config(&cli.config),
        Commands::Serve(args) => run::execute_serve(&load(cli)?, args).await,
        Commands::Relay => run::execute_relay(&load(cli)?).await,
        Commands::Broadcast => run::execute_broadcast(&load(cli)?).await,
    }
}

fn load(cli: &Cli) -> Result<Config> {
    let config = Config::load(&cli.config)?;
    config.init_logging();
    Ok(config)
}
