//! Cosmos-style document database adapter.

mod store;

pub use store::{CosmosStore, DATABASE_NAME};
