//! Record shapes and sequence semantics shared by every layer.

mod car;
mod document;
mod id;
mod vehicle;

pub mod stream;

pub use car::{BrandSummary, CarKey, CarRecord};
pub use document::{CarDocument, StoredCar};
pub use id::DocumentId;
pub use vehicle::VehicleRecord;
