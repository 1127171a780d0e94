//! Fetch-and-relay: copy every feed vehicle into the active backend.

use std::sync::Arc;

use futures_util::StreamExt;
use serde::Serialize;
use tracing::{info, warn};

use super::data::CloudData;
use crate::domain::CarRecord;
use crate::error::{Error, Result};
use crate::port::VehicleFeed;

/// How a relay run ended, when no write failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RelayOutcome {
    /// The feed was drained and every vehicle was written.
    Completed { relayed: usize },
    /// The feed failed after `relayed` vehicles were written.
    FeedUnavailable { relayed: usize, reason: String },
}

impl RelayOutcome {
    #[must_use]
    pub fn relayed(&self) -> usize {
        match self {
            Self::Completed { relayed } | Self::FeedUnavailable { relayed, .. } => *relayed,
        }
    }
}

pub struct FetchAndRelay {
    feed: Arc<dyn VehicleFeed>,
    data: Arc<CloudData>,
}

impl FetchAndRelay {
    #[must_use]
    pub fn new(feed: Arc<dyn VehicleFeed>, data: Arc<CloudData>) -> Self {
        Self { feed, data }
    }

    /// Pull the feed and push each vehicle, one at a time, in feed order.
    ///
    /// # Errors
    ///
    /// The first failed write stops the run with [`Error::RelayAborted`];
    /// later vehicles are not attempted. A feed failure is not an error:
    /// it ends the run as [`RelayOutcome::FeedUnavailable`].
    pub async fn run(&self) -> Result<RelayOutcome> {
        let mut vehicles = self.feed.fetch();
        let mut relayed = 0;

        while let Some(item) = vehicles.next().await {
            let vehicle = match item {
                Ok(vehicle) => vehicle,
                Err(err) => {
                    warn!(error = %err, relayed, "Vehicle feed failed, relay stopped");
                    return Ok(RelayOutcome::FeedUnavailable {
                        relayed,
                        reason: err.to_string(),
                    });
                }
            };

            let car = CarRecord::from(vehicle);
            let car_id = car.car_id;
            self.data
                .push_data(&car)
                .await
                .map_err(|source| Error::RelayAborted {
                    car_id,
                    source: Box::new(source),
                })?;
            relayed += 1;
        }

        info!(relayed, backend = self.data.backend_name(), "Relay complete");
        Ok(RelayOutcome::Completed { relayed })
    }
}
