//! Cloud data orchestrator.
//!
//! [`CloudData`] is the one entry point the rest of the service uses for
//! car data. It wraps exactly one [`Backend`], chosen at startup, and
//! forwards to it. Capabilities only one backend has are reported as
//! [`Error::Unsupported`] on the other.

use tracing::{debug, info};

use crate::adapter::outbound::cosmos::CosmosStore;
use crate::adapter::outbound::firestore::FirestoreStore;
use crate::domain::stream::{error_if_empty, RecordStream};
use crate::domain::{BrandSummary, CarRecord};
use crate::error::{Error, Result};
use crate::port::CarStore;

/// The active document backend.
pub enum Backend {
    /// Versioned document database.
    Cosmos(CosmosStore),
    /// Document store with live change notifications and pub/sub push.
    Firestore(FirestoreStore),
}

impl Backend {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cosmos(_) => "cosmos",
            Self::Firestore(_) => "firestore",
        }
    }

    fn store(&self) -> &dyn CarStore {
        match self {
            Self::Cosmos(store) => store,
            Self::Firestore(store) => store,
        }
    }
}

pub struct CloudData {
    backend: Backend,
}

impl CloudData {
    #[must_use]
    pub fn new(backend: Backend) -> Self {
        info!(backend = backend.name(), "Cloud data backend selected");
        Self { backend }
    }

    #[must_use]
    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Every stored brand once. Empty is [`Error::NotFound`].
    pub fn get_all_brands(&self) -> RecordStream<BrandSummary> {
        error_if_empty(self.backend.store().find_all_brands(), || {
            Error::NotFound("no car brands stored".into())
        })
    }

    /// Every car of `brand` once. Empty is [`Error::NotFound`].
    pub fn get_cars_by_brand(&self, brand: &str) -> RecordStream<CarRecord> {
        let missing = brand.to_string();
        error_if_empty(self.backend.store().find_by_brand(brand), move || {
            Error::NotFound(format!("no cars of brand {missing}"))
        })
    }

    /// Write one car through the active backend.
    ///
    /// The Cosmos backend stores it under version control; the Firestore
    /// backend publishes it to the pub/sub topic.
    pub async fn push_data(&self, car: &CarRecord) -> Result<()> {
        match &self.backend {
            Backend::Cosmos(store) => {
                store.push(car).await?;
            }
            Backend::Firestore(store) => store.push(car).await?,
        }
        debug!(car_id = car.car_id, backend = self.backend.name(), "Car pushed");
        Ok(())
    }

    /// Live stream of first-seen brands.
    ///
    /// # Errors
    ///
    /// [`Error::Unsupported`] unless the backend has change notifications.
    pub fn stream_brand_events(&self) -> Result<RecordStream<BrandSummary>> {
        match &self.backend {
            Backend::Firestore(store) => Ok(store.stream_brand_events()),
            Backend::Cosmos(_) => Err(Error::Unsupported {
                backend: "cosmos",
                operation: "stream_brand_events",
            }),
        }
    }
}
