//! Pub/sub topic publisher over the REST publish endpoint.

mod publisher;

pub use publisher::PubSubPublisher;
