//! SQLite car repository implementation.
//!
//! Provides versioned document storage for cars using SQLite and Diesel
//! ORM. Every successful write stamps a fresh `etag`; conditional writes
//! compare it inside the `UPDATE` so concurrent writers cannot both win.
//!
//! Diesel is synchronous, so every query, pool checkout included, runs on
//! tokio's blocking pool.

use async_trait::async_trait;
use diesel::prelude::*;
use tracing::debug;
use uuid::Uuid;

use super::database::connection::DbPool;
use super::database::model::CarRow;
use super::database::schema::cars;
use crate::domain::{CarRecord, DocumentId, StoredCar};
use crate::error::{Error, Result};
use crate::port::CarRepository;

/// SQLite-backed car repository.
pub struct SqliteCarRepository {
    pool: DbPool,
}

impl SqliteCarRepository {
    /// Create a new repository over an already-migrated pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Run `query` with a pooled connection on the blocking pool.
    async fn with_conn<T, F>(&self, query: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool
                .get()
                .map_err(|e| Error::DataUnavailable(e.to_string()))?;
            query(&mut *conn)
        })
        .await
        .map_err(|e| Error::DataUnavailable(format!("database task failed: {e}")))?
    }
}

fn query_failed(err: diesel::result::Error) -> Error {
    Error::DataUnavailable(err.to_string())
}

#[async_trait]
impl CarRepository for SqliteCarRepository {
    async fn distinct_brands(&self) -> Result<Vec<String>> {
        self.with_conn(|conn| {
            cars::table
                .select(cars::brand)
                .distinct()
                .order(cars::brand.asc())
                .load(conn)
                .map_err(query_failed)
        })
        .await
    }

    async fn find_by_brand(&self, brand: &str) -> Result<Vec<StoredCar>> {
        let brand = brand.to_string();
        let rows: Vec<CarRow> = self
            .with_conn(move |conn| {
                cars::table
                    .filter(cars::brand.eq(brand))
                    .order(cars::car_id.asc())
                    .select(CarRow::as_select())
                    .load(conn)
                    .map_err(query_failed)
            })
            .await?;

        Ok(rows.into_iter().map(StoredCar::from).collect())
    }

    async fn get(&self, id: &DocumentId) -> Result<Option<StoredCar>> {
        let key = id.to_string();
        let row: Option<CarRow> = self
            .with_conn(move |conn| {
                cars::table
                    .find(key)
                    .select(CarRow::as_select())
                    .first(conn)
                    .optional()
                    .map_err(query_failed)
            })
            .await?;

        Ok(row.map(StoredCar::from))
    }

    async fn write(&self, car: &CarRecord, expected_etag: Option<&str>) -> Result<StoredCar> {
        let id = DocumentId::for_car(car.car_id);
        let etag = Uuid::new_v4().to_string();
        let row = CarRow::new(&id, car, &etag);
        let key = id.to_string();
        let expected = expected_etag.map(str::to_string);

        let written = self
            .with_conn(move |conn| {
                let result = match expected {
                    None => diesel::insert_into(cars::table)
                        .values(&row)
                        .on_conflict_do_nothing()
                        .execute(conn),
                    Some(expected) => diesel::update(
                        cars::table
                            .filter(cars::id.eq(key))
                            .filter(cars::etag.eq(expected)),
                    )
                    .set(&row)
                    .execute(conn),
                };
                result.map_err(query_failed)
            })
            .await?;

        if written == 0 {
            return Err(Error::VersionConflict { id: id.to_string() });
        }

        debug!(id = %id, etag = %etag, "Stored car document");
        Ok(StoredCar {
            id,
            car: car.clone(),
            etag,
        })
    }
}
