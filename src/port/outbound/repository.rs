//! Persistence port for the Cosmos-style document database.

use async_trait::async_trait;

use crate::domain::{CarRecord, DocumentId, StoredCar};
use crate::error::Result;

/// Document database holding [`StoredCar`]s with version tokens.
#[async_trait]
pub trait CarRepository: Send + Sync {
    /// Distinct brand values across all documents.
    async fn distinct_brands(&self) -> Result<Vec<String>>;

    /// All documents whose brand equals `brand`.
    async fn find_by_brand(&self, brand: &str) -> Result<Vec<StoredCar>>;

    /// Get a document by key.
    async fn get(&self, id: &DocumentId) -> Result<Option<StoredCar>>;

    /// Conditionally write `car` under its key.
    ///
    /// With `expected_etag == None` the document must not exist yet; with
    /// `Some(tag)` the stored token must still equal `tag`. Either mismatch
    /// fails with [`Error::VersionConflict`](crate::error::Error::VersionConflict).
    /// Returns the document as stored, carrying its new token.
    async fn write(&self, car: &CarRecord, expected_etag: Option<&str>) -> Result<StoredCar>;
}
