//! Command-line interface definitions.
//!
//! Defines the CLI structure for the carstream application using `clap`.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Vehicle feed relay with interchangeable document backends
#[derive(Parser, Debug)]
#[command(name = "carstream")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the carstream CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP API until interrupted
    Serve(ServeArgs),

    /// Fetch the vehicle feed once and write every vehicle to the backend
    Relay,

    /// Fetch the vehicle feed once and send every vehicle to the broker
    Broadcast,

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),
}

/// Subcommands for `carstream check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config,
}

/// Arguments for the `serve` subcommand.
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Override `[server] bind`
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["carstream", "relay", "--config", "other.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(cli.command, Commands::Relay));
    }

    #[test]
    fn serve_accepts_bind_override() {
        let cli = Cli::try_parse_from(["carstream", "serve", "--bind", "0.0.0.0:9000"]).unwrap();
        let Commands::Serve(args) = cli.command else {
            panic!("expected serve");
        };
        assert_eq!(args.bind, Some("0.0.0.0:9000".parse().unwrap()));
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn check_requires_a_target() {
        assert!(Cli::try_parse_from(["carstream", "check"]).is_err());
        assert!(Cli::try_parse_from(["carstream", "check", "config"]).is_ok());
    }
}
