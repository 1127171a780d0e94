//! Car store backed by a versioned document database.
//!
//! Reads delegate straight to repository queries; the only transformation
//! is the uniform distinctness filter. Writes go through the document's
//! version token, and a conflict is reported, never retried.

use std::sync::Arc;

use futures_util::{StreamExt, TryStreamExt};
use tracing::{debug, info};

use crate::domain::stream::{deferred, distinct, distinct_by, error_if_empty, RecordStream};
use crate::domain::{BrandSummary, CarRecord, DocumentId, StoredCar};
use crate::error::{Error, Result};
use crate::port::{CarRepository, CarStore};

/// Database every car document lives in.
pub const DATABASE_NAME: &str = "CarFactory";

/// [`CarStore`] over a [`CarRepository`].
pub struct CosmosStore {
    repository: Arc<dyn CarRepository>,
}

impl CosmosStore {
    #[must_use]
    pub fn new(repository: Arc<dyn CarRepository>) -> Self {
        Self { repository }
    }

    /// Write `car`, creating or replacing its document.
    ///
    /// Reads the current version token and writes conditionally on it, so
    /// a concurrent writer that lands in between makes this call fail with
    /// [`Error::VersionConflict`].
    pub async fn push(&self, car: &CarRecord) -> Result<StoredCar> {
        let id = DocumentId::for_car(car.car_id);
        let current = self.repository.get(&id).await?;
        let expected = current.as_ref().map(|doc| doc.etag.as_str());
        let stored = self.repository.write(car, expected).await?;
        debug!(id = %stored.id, brand = %car.brand, "Pushed car document");
        Ok(stored)
    }

    /// Replace `car` only if its document still carries `expected_etag`.
    pub async fn replace(&self, car: &CarRecord, expected_etag: &str) -> Result<StoredCar> {
        self.repository.write(car, Some(expected_etag)).await
    }

    /// Current document for `car_id`, if any.
    pub async fn get(&self, car_id: i64) -> Result<Option<StoredCar>> {
        self.repository.get(&DocumentId::for_car(car_id)).await
    }
}

impl CarStore for CosmosStore {
    fn find_all_brands(&self) -> RecordStream<BrandSummary> {
        let repository = self.repository.clone();
        let brands = deferred(async move {
            let brands = repository.distinct_brands().await?;
            info!(count = brands.len(), database = DATABASE_NAME, "Loaded distinct brands");
            Ok(brands.into_iter().map(BrandSummary::new).collect())
        });
        let brands = distinct(brands)
            .inspect_ok(|summary| debug!(brand = %summary.brand, "Distinct brand"))
            .boxed();

        error_if_empty(brands, || Error::NotFound("no car brands stored".into()))
    }

    fn find_by_brand(&self, brand: &str) -> RecordStream<CarRecord> {
        let repository = self.repository.clone();
        let brand = brand.to_string();
        let missing = brand.clone();
        let cars = deferred(async move {
            let docs = repository.find_by_brand(&brand).await?;
            info!(brand = %brand, count = docs.len(), "Received cars by brand");
            Ok(docs.into_iter().map(|doc| doc.car).collect())
        });

        error_if_empty(distinct_by(cars, CarRecord::key), move || {
            Error::NotFound(format!("no cars of brand {missing}"))
        })
    }
}
