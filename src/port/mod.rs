//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Every managed service this crate talks to sits behind one of these
//! traits, so the application layer never names a concrete backend.
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  CloudData + Relay      ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │  Feed   │            │  Car store  │              │  Broker / │
//! │ Adapter │            │  Adapters   │              │  Pub/Sub  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`VehicleFeed`] - External vehicle feed
//! - [`CarStore`] - Uniform read contract of both document backends
//! - [`CarRepository`] - Cosmos-style versioned document database
//! - [`CarCollection`] - Firestore-style collection with change listeners
//! - [`BrokerProducer`] - Message broker sends
//! - [`TopicPublisher`] - Pub/sub publishes with drain-on-shutdown

pub mod outbound;

pub use outbound::broker::{BrokerMessage, BrokerProducer, LogProducer, VEHICLE_TOPIC};
pub use outbound::collection::{CarCollection, ChangeListener, ListenerRegistration};
pub use outbound::feed::VehicleFeed;
pub use outbound::repository::CarRepository;
pub use outbound::store::CarStore;
pub use outbound::topic::{LogPublisher, TopicPublisher};
