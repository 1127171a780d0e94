//! Message broker port.
//!
//! The broker path runs beside the storage path: feed records are wrapped
//! into [`BrokerMessage`]s and handed to a [`BrokerProducer`] one at a time.

use async_trait::async_trait;
use tracing::info;

use crate::domain::VehicleRecord;
use crate::error::Result;

/// Topic every vehicle record is sent to.
pub const VEHICLE_TOPIC: &str = "myeventhub";

/// A record addressed to a broker topic.
#[derive(Debug, Clone, PartialEq)]
pub struct BrokerMessage {
    /// Topic header.
    pub topic: String,
    pub payload: VehicleRecord,
}

impl BrokerMessage {
    pub fn new(topic: impl Into<String>, payload: VehicleRecord) -> Self {
        Self {
            topic: topic.into(),
            payload,
        }
    }
}

/// Sends messages to the broker.
///
/// Implementations must be thread-safe and are shared for the lifetime of
/// the process. A failed send returns
/// [`Error::PublishFailure`](crate::error::Error::PublishFailure); callers
/// decide whether to continue.
#[async_trait]
pub trait BrokerProducer: Send + Sync {
    async fn send(&self, message: &BrokerMessage) -> Result<()>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// A producer that only logs, for running without a broker.
pub struct LogProducer;

#[async_trait]
impl BrokerProducer for LogProducer {
    async fn send(&self, message: &BrokerMessage) -> Result<()> {
        info!(
            topic = %message.topic,
            id = message.payload.id,
            brand = %message.payload.brand,
            "Broker message"
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn log_producer_accepts_every_message() {
        let message = BrokerMessage::new(
            VEHICLE_TOPIC,
            VehicleRecord {
                id: 1,
                brand: "Fiat".into(),
                model: "Panda".into(),
                manufacture_year: 2012,
                color: "White".into(),
                mileage: 90000.0,
                price: 3500.0,
            },
        );
        assert!(LogProducer.send(&message).await.is_ok());
        assert_eq!(message.topic, "myeventhub");
    }
}
