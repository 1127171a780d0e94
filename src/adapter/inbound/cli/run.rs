//! Handlers for `serve`, `relay` and `broadcast`.

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::ServeArgs;
use crate::adapter::inbound::cli::output;
use crate::adapter::inbound::http::{self, AppState};
use crate::application::RelayOutcome;
use crate::error::Result;
use crate::infrastructure::bootstrap::Services;
use crate::infrastructure::config::settings::Config;

/// Run the HTTP API until ctrl-c.
pub async fn execute_serve(config: &Config, args: &ServeArgs) -> Result<()> {
    let services = Services::build(config)?;
    let bind = args.bind.unwrap_or(config.server.bind);
    let listener = TcpListener::bind(bind).await?;

    output::field("Listening", listener.local_addr()?);
    output::field("Backend", services.data.backend_name());

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Shutdown signal received");
        }
        signal.cancel();
    });

    let result = http::serve(listener, AppState::new(&services, shutdown)).await;
    services.shutdown().await;
    result
}

/// Run fetch-and-relay once.
pub async fn execute_relay(config: &Config) -> Result<()> {
    let services = Services::build(config)?;
    let result = services.relay.run().await;
    services.shutdown().await;

    match result? {
        RelayOutcome::Completed { relayed } => {
            output::success("Relay complete");
            output::field("Relayed", relayed);
        }
        RelayOutcome::FeedUnavailable { relayed, reason } => {
            output::warning("Vehicle feed unavailable, relay stopped early");
            output::field("Relayed", relayed);
            output::field("Reason", reason);
        }
    }
    Ok(())
}

/// Run the broker relay once, in the foreground.
pub async fn execute_broadcast(config: &Config) -> Result<()> {
    let services = Services::build(config)?;
    let report = services.broadcaster.broadcast().await;
    services.shutdown().await;

    output::field("Attempted", report.attempted);
    output::field("Failed", report.failed);
    if report.failed > 0 {
        warn!(failed = report.failed, "Some broker sends failed");
        output::warning("Some broker sends failed");
    } else {
        output::success("Broadcast complete");
    }
    Ok(())
}
