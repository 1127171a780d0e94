//! Uniform read contract shared by both document backends.

use crate::domain::stream::RecordStream;
use crate::domain::{BrandSummary, CarRecord};

/// Read operations every car store offers.
///
/// Both sequences are lazy and distinct. A backend failure is yielded as
/// [`Error::DataUnavailable`](crate::error::Error::DataUnavailable); a
/// query that matches nothing yields
/// [`Error::NotFound`](crate::error::Error::NotFound).
pub trait CarStore: Send + Sync {
    /// Every brand present among stored cars, each exactly once.
    fn find_all_brands(&self) -> RecordStream<BrandSummary>;

    /// Every stored car whose brand equals `brand`, without duplicates.
    fn find_by_brand(&self, brand: &str) -> RecordStream<CarRecord>;
}
