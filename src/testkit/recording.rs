//! Recording collaborators with scripted failures.
//!
//! Attempts are numbered from 1. `failing_on(&[2])` fails the second call
//! and lets every other call through.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::time::Instant;

use crate::domain::{CarRecord, DocumentId, StoredCar};
use crate::error::{Error, Result};
use crate::port::{BrokerMessage, BrokerProducer, CarRepository, TopicPublisher};

fn failing_set(attempts: &[usize]) -> HashSet<usize> {
    attempts.iter().copied().collect()
}

/// Broker producer that records every send with its (tokio) timestamp.
#[derive(Clone, Default)]
pub struct RecordingProducer {
    sent: Arc<Mutex<Vec<(Instant, BrokerMessage)>>>,
    attempts: Arc<AtomicUsize>,
    fail_on: HashSet<usize>,
}

impl RecordingProducer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            fail_on: failing_set(attempts),
            ..Self::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    /// Every attempted message, failed ones included.
    pub fn messages(&self) -> Vec<BrokerMessage> {
        self.sent.lock().iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn timestamps(&self) -> Vec<Instant> {
        self.sent.lock().iter().map(|(at, _)| *at).collect()
    }
}

#[async_trait]
impl BrokerProducer for RecordingProducer {
    async fn send(&self, message: &BrokerMessage) -> Result<()> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().push((Instant::now(), message.clone()));
        if self.fail_on.contains(&attempt) {
            return Err(Error::PublishFailure(format!("scripted failure on attempt {attempt}")));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Topic publisher that keeps every published payload.
#[derive(Clone, Default)]
pub struct RecordingPublisher {
    published: Arc<Mutex<Vec<Vec<u8>>>>,
    attempts: Arc<AtomicUsize>,
    shutdowns: Arc<AtomicUsize>,
    fail_on: HashSet<usize>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            fail_on: failing_set(attempts),
            ..Self::default()
        }
    }

    /// Successfully published payloads.
    pub fn published(&self) -> Vec<Vec<u8>> {
        self.published.lock().clone()
    }

    pub fn shutdowns(&self) -> usize {
        self.shutdowns.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TopicPublisher for RecordingPublisher {
    async fn publish(&self, data: Vec<u8>) -> Result<String> {
        let attempt = self.attempts.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_on.contains(&attempt) {
            return Err(Error::PublishFailure(format!("scripted failure on publish {attempt}")));
        }
        self.published.lock().push(data);
        Ok(format!("message-{attempt}"))
    }

    async fn shutdown(&self, _timeout: Duration) -> Result<()> {
        self.shutdowns.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Versioned in-memory [`CarRepository`].
///
/// Records the car ID of every write attempt.
#[derive(Clone, Default)]
pub struct MemoryRepository {
    docs: Arc<Mutex<HashMap<String, StoredCar>>>,
    writes: Arc<Mutex<Vec<i64>>>,
    versions: Arc<AtomicUsize>,
    fail_on: HashSet<usize>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_on(attempts: &[usize]) -> Self {
        Self {
            fail_on: failing_set(attempts),
            ..Self::default()
        }
    }

    /// Car IDs of every write attempt, in order.
    pub fn write_attempts(&self) -> Vec<i64> {
        self.writes.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.docs.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.lock().is_empty()
    }
}

#[async_trait]
impl CarRepository for MemoryRepository {
    async fn distinct_brands(&self) -> Result<Vec<String>> {
        let mut brands: Vec<String> = self
            .docs
            .lock()
            .values()
            .map(|doc| doc.car.brand.clone())
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        brands.sort();
        Ok(brands)
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<StoredCar>> {
        let mut cars: Vec<StoredCar> = self
            .docs
            .lock()
            .values()
            .filter(|doc| doc.car.brand == brand)
            .cloned()
            .collect();
        cars.sort_by_key(|doc| doc.car.car_id);
        Ok(cars)
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<StoredCar>> {
        Ok(self.docs.lock().get(id.as_str()).cloned())
    }

    async fn write(&self, car: &CarRecord, expected_etag: Option<&str>) -> Result<StoredCar> {
        let attempt = {
            let mut writes = self.writes.lock();
            writes.push(car.car_id);
            writes.len()
        };
        if self.fail_on.contains(&attempt) {
            return Err(Error::DataUnavailable(format!("scripted failure on write {attempt}")));
        }

        let id = DocumentId::for_car(car.car_id);
        let mut docs = self.docs.lock();
        let current = docs.get(id.as_str()).map(|doc| doc.etag.as_str());
        if current != expected_etag {
            return Err(Error::VersionConflict { id: id.to_string() });
        }

        let version = self.versions.fetch_add(1, Ordering::SeqCst) + 1;
        let stored = StoredCar {
            id: id.clone(),
            car: car.clone(),
            etag: format!("v{version}"),
        };
        docs.insert(id.to_string(), stored.clone());
        Ok(stored)
    }
}
