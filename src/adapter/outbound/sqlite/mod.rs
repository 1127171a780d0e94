//! SQLite persistence adapter.
//!
//! Stands in for the Cosmos-style document database: a `cars` table keyed
//! by document ID, with an `etag` column for optimistic concurrency.

pub mod database;
pub mod repository;

pub use repository::SqliteCarRepository;
