//! External vehicle feed adapter.
//!
//! [`VehicleFeedClient`] issues one GET against the feed provider and
//! decodes the JSON array body progressively with [`JsonArrayDecoder`], so
//! each vehicle reaches downstream consumers as soon as its bytes arrive.

mod client;
mod decoder;

pub use client::VehicleFeedClient;
pub use decoder::JsonArrayDecoder;
