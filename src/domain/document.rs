//! Backend-specific stored shapes and their mapping onto [`CarRecord`].

use serde::{Deserialize, Serialize};

use super::car::CarRecord;
use super::id::DocumentId;

/// A car document held by the Cosmos-style document database.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredCar {
    pub id: DocumentId,
    pub car: CarRecord,
    /// Optimistic-concurrency token; changes on every successful write.
    pub etag: String,
}

/// Native Firestore-style document. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CarDocument {
    #[serde(skip)]
    pub document_id: String,
    pub car_id: Option<i64>,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i64>,
    pub color: Option<String>,
    pub mileage: Option<f64>,
    pub price: Option<f64>,
}

impl CarDocument {
    /// Build the native document for a car, keyed by its ID.
    #[must_use]
    pub fn from_car(car: &CarRecord) -> Self {
        Self {
            document_id: car.car_id.to_string(),
            car_id: Some(car.car_id),
            brand: Some(car.brand.clone()),
            model: Some(car.model.clone()),
            year: Some(car.year),
            color: Some(car.color.clone()),
            mileage: Some(car.mileage),
            price: Some(car.price),
        }
    }

    /// Field-by-field mapping; absent fields take their zero value.
    #[must_use]
    pub fn to_car(&self) -> CarRecord {
        CarRecord {
            car_id: self.car_id.unwrap_or_default(),
            brand: self.brand.clone().unwrap_or_default(),
            model: self.model.clone().unwrap_or_default(),
            year: self.year.unwrap_or_default(),
            color: self.color.clone().unwrap_or_default(),
            mileage: self.mileage.unwrap_or_default(),
            price: self.price.unwrap_or_default(),
        }
    }
}
