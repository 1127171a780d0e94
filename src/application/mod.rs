//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters
//! to implement the application's use cases.

pub mod broadcast;
pub mod data;
pub mod relay;

pub use broadcast::{BroadcastReport, VehicleBroadcaster};
pub use data::{Backend, CloudData};
pub use relay::{FetchAndRelay, RelayOutcome};
