//! Broker relay: forward feed vehicles onto the broker topic.

use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use serde::Serialize;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::domain::stream::RecordStream;
use crate::domain::VehicleRecord;
use crate::port::{BrokerMessage, BrokerProducer, VehicleFeed, VEHICLE_TOPIC};

/// Default pause between successive broker messages.
pub const DEFAULT_DELAY: Duration = Duration::from_secs(1);

/// Tally of one broker relay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BroadcastReport {
    pub attempted: usize,
    pub failed: usize,
}

/// Sends feed vehicles to the broker one at a time, `delay` apart.
///
/// A failed send is logged and counted; the next vehicle is still sent.
/// Nothing is retried.
pub struct VehicleBroadcaster {
    feed: Arc<dyn VehicleFeed>,
    producer: Arc<dyn BrokerProducer>,
    topic: String,
    delay: Duration,
}

impl VehicleBroadcaster {
    pub fn new(feed: Arc<dyn VehicleFeed>, producer: Arc<dyn BrokerProducer>) -> Self {
        Self {
            feed,
            producer,
            topic: VEHICLE_TOPIC.into(),
            delay: DEFAULT_DELAY,
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    #[must_use]
    pub fn with_topic(mut self, topic: impl Into<String>) -> Self {
        self.topic = topic.into();
        self
    }

    /// Fetch the feed and relay it.
    pub async fn broadcast(&self) -> BroadcastReport {
        self.relay(self.feed.fetch()).await
    }

    /// Run [`broadcast`](Self::broadcast) on its own task.
    ///
    /// The handle may be dropped; the task keeps running.
    pub fn spawn(self: Arc<Self>) -> JoinHandle<BroadcastReport> {
        tokio::spawn(async move { self.broadcast().await })
    }

    /// Send every vehicle of `vehicles`. The first one goes out at once;
    /// each later one waits `delay` after the previous send. A feed error
    /// ends the relay.
    pub async fn relay(&self, mut vehicles: RecordStream<VehicleRecord>) -> BroadcastReport {
        let mut report = BroadcastReport::default();

        while let Some(item) = vehicles.next().await {
            let vehicle = match item {
                Ok(vehicle) => vehicle,
                Err(err) => {
                    error!(error = %err, "Vehicle feed failed, broker relay stopped");
                    break;
                }
            };

            if report.attempted > 0 {
                tokio::time::sleep(self.delay).await;
            }

            report.attempted += 1;
            let message = BrokerMessage::new(self.topic.clone(), vehicle);
            if let Err(err) = self.producer.send(&message).await {
                report.failed += 1;
                warn!(
                    error = %err,
                    id = message.payload.id,
                    producer = self.producer.name(),
                    "Broker send failed"
                );
            }
        }

        info!(
            attempted = report.attempted,
            failed = report.failed,
            topic = %self.topic,
            "Broker relay finished"
        );
        report
    }
}
