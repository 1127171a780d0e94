//! Scripted vehicle feed.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::stream::{self, StreamExt};

use crate::domain::stream::{error_if_empty, RecordStream};
use crate::domain::VehicleRecord;
use crate::error::{Error, Result};
use crate::port::VehicleFeed;

#[derive(Debug, Clone)]
enum Step {
    Vehicle(VehicleRecord),
    Fail(String),
}

/// A feed that replays the same script on every fetch.
///
/// Like the HTTP client, an empty script fails with
/// [`Error::FeedUnavailable`]. A `fail` step ends the script.
#[derive(Clone, Default)]
pub struct ScriptedFeed {
    steps: Vec<Step>,
    fetches: Arc<AtomicUsize>,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(vehicles: impl IntoIterator<Item = VehicleRecord>) -> Self {
        let mut feed = Self::new();
        feed.steps = vehicles.into_iter().map(Step::Vehicle).collect();
        feed
    }

    pub fn then_vehicle(mut self, vehicle: VehicleRecord) -> Self {
        self.steps.push(Step::Vehicle(vehicle));
        self
    }

    pub fn then_fail(mut self, reason: &str) -> Self {
        self.steps.push(Step::Fail(reason.to_string()));
        self
    }

    /// Number of times `fetch` was called.
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

impl VehicleFeed for ScriptedFeed {
    fn fetch(&self) -> RecordStream<VehicleRecord> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        let mut items: Vec<Result<VehicleRecord>> = Vec::new();
        for step in &self.steps {
            match step {
                Step::Vehicle(vehicle) => items.push(Ok(vehicle.clone())),
                Step::Fail(reason) => {
                    items.push(Err(Error::FeedUnavailable(reason.clone())));
                    break;
                }
            }
        }

        error_if_empty(stream::iter(items).boxed(), || {
            Error::FeedUnavailable("feed returned no vehicles".into())
        })
    }
}
