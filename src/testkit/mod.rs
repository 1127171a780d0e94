//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`feed`]: `ScriptedFeed`, a [`VehicleFeed`](crate::port::VehicleFeed)
//!   replaying a fixed script.
//! - [`recording`]: `RecordingProducer`, `RecordingPublisher` and
//!   `MemoryRepository`, collaborators that record calls and fail on
//!   chosen attempts.
//! - [`domain`]: builders for vehicles, cars and documents.

pub mod domain;
pub mod feed;
pub mod recording;
