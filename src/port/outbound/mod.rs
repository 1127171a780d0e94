//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the external collaborators: the vehicle feed,
//! the two document backends, the message broker, and the pub/sub service.

pub mod broker;
pub mod collection;
pub mod feed;
pub mod repository;
pub mod store;
pub mod topic;
