//! Pub/sub topic port.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::error::Result;

/// Publisher handle bound to one pub/sub topic.
///
/// Created once at startup and shared by every request. `shutdown` stops
/// new publishes and waits up to `timeout` for in-flight ones to drain.
#[async_trait]
pub trait TopicPublisher: Send + Sync {
    /// Publish one message and return the server-assigned message ID.
    async fn publish(&self, data: Vec<u8>) -> Result<String>;

    async fn shutdown(&self, timeout: Duration) -> Result<()>;
}

/// A publisher that only logs, for running without a pub/sub service.
pub struct LogPublisher;

#[async_trait]
impl TopicPublisher for LogPublisher {
    async fn publish(&self, data: Vec<u8>) -> Result<String> {
        info!(bytes = data.len(), "Pub/sub message");
        Ok(String::new())
    }

    async fn shutdown(&self, _timeout: Duration) -> Result<()> {
        Ok(())
    }
}
