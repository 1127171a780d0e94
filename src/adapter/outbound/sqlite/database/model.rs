//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::cars;
use crate::domain::{CarRecord, DocumentId, StoredCar};

/// Database row for a stored car document.
#[derive(Queryable, Selectable, Insertable, AsChangeset, Debug, Clone)]
#[diesel(table_name = cars)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CarRow {
    pub id: String,
    pub car_id: i64,
    pub brand: String,
    pub model: String,
    pub year: i64,
    pub color: String,
    pub mileage: f64,
    pub price: f64,
    pub etag: String,
}

impl CarRow {
    #[must_use]
    pub fn new(id: &DocumentId, car: &CarRecord, etag: &str) -> Self {
        Self {
            id: id.to_string(),
            car_id: car.car_id,
            brand: car.brand.clone(),
            model: car.model.clone(),
            year: car.year,
            color: car.color.clone(),
            mileage: car.mileage,
            price: car.price,
            etag: etag.to_string(),
        }
    }
}

impl From<CarRow> for StoredCar {
    fn from(row: CarRow) -> Self {
        Self {
            id: DocumentId::from(row.id),
            car: CarRecord {
                car_id: row.car_id,
                brand: row.brand,
                model: row.model,
                year: row.year,
                color: row.color,
                mileage: row.mileage,
                price: row.price,
            },
            etag: row.etag,
        }
    }
}
