//! Event Hubs broker producer over the REST send endpoint.

mod producer;

pub use producer::EventHubProducer;
