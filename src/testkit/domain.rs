//! Builders for domain records used across tests.

use crate::domain::{CarDocument, CarRecord, VehicleRecord};

/// A vehicle with fixed model details.
pub fn vehicle(id: i64, brand: &str) -> VehicleRecord {
    VehicleRecord {
        id,
        brand: brand.to_string(),
        model: format!("{brand} model {id}"),
        manufacture_year: 2015,
        color: "Black".into(),
        mileage: 42_000.0,
        price: 8_500.0,
    }
}

/// The car `vehicle(id, brand)` maps to.
pub fn car(id: i64, brand: &str) -> CarRecord {
    CarRecord::from(vehicle(id, brand))
}

/// A stored document for `car(id, brand)`.
pub fn document(id: i64, brand: &str) -> CarDocument {
    CarDocument::from_car(&car(id, brand))
}

/// The feed's JSON shape for `vehicle(id, brand)`.
pub fn vehicle_json(id: i64, brand: &str) -> String {
    serde_json::json!({
        "id": id,
        "brand": brand,
        "model": format!("{brand} model {id}"),
        "manufactureYear": 2015,
        "color": "Black",
        "mileage": 42_000.0,
        "price": 8_500.0,
    })
    .to_string()
}
