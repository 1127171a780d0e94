//! Outbound adapters (driven side).

pub mod cosmos;
pub mod eventhub;
pub mod feed;
pub mod firestore;
pub mod pubsub;
pub mod sqlite;
