//! Normalized car records and the brand projection over them.

use serde::{Deserialize, Serialize};

use super::vehicle::VehicleRecord;

/// A car as the orchestration layer sees it, independent of backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarRecord {
    pub car_id: i64,
    pub brand: String,
    pub model: String,
    pub year: i64,
    pub color: String,
    pub mileage: f64,
    pub price: f64,
}

/// Hashable identity of every field of a [`CarRecord`].
///
/// Floats compare by bit pattern, so two records are duplicates only when
/// each field is identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CarKey {
    car_id: i64,
    brand: String,
    model: String,
    year: i64,
    color: String,
    mileage: u64,
    price: u64,
}

impl CarRecord {
    #[must_use]
    pub fn key(&self) -> CarKey {
        CarKey {
            car_id: self.car_id,
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            color: self.color.clone(),
            mileage: self.mileage.to_bits(),
            price: self.price.to_bits(),
        }
    }
}

impl From<VehicleRecord> for CarRecord {
    fn from(v: VehicleRecord) -> Self {
        Self {
            car_id: v.id,
            brand: v.brand,
            model: v.model,
            year: v.manufacture_year,
            color: v.color,
            mileage: v.mileage,
            price: v.price,
        }
    }
}

/// A single distinct brand. Also the payload of live brand events.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BrandSummary {
    pub brand: String,
}

impl BrandSummary {
    pub fn new(brand: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
        }
    }
}
