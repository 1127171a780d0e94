//! Carstream - vehicle feed relay with interchangeable document backends.
//!
//! Fetches vehicle records from an external HTTP feed and moves them into
//! one of two document backends, onto a message broker topic, or out to an
//! HTTP API that reads them back.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - **`domain`** - Record shapes and lazy sequence rules
//! - **`port`** - Traits every external collaborator sits behind
//! - **`adapter::outbound`** - Feed client, Cosmos-style and Firestore-style
//!   stores, Event Hubs producer, pub/sub publisher, SQLite repository
//! - **`adapter::inbound`** - HTTP API (axum) and CLI (clap)
//! - **`application`** - `CloudData` orchestrator, fetch-and-relay, broker
//!   relay
//! - **`infrastructure`** - Configuration and the composition root
//!
//! # Backends
//!
//! Exactly one backend is active, chosen by `[backend] type`:
//!
//! - `cosmos` - versioned document database; writes are conditional on the
//!   document's version token
//! - `firestore` - document collection with live change notifications;
//!   writes are published to a pub/sub topic
//!
//! # Example
//!
//! ```no_run
//! use carstream::infrastructure::bootstrap::Services;
//! use carstream::infrastructure::config::settings::Config;
//!
//! # async fn run() -> carstream::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let services = Services::build(&config)?;
//! let outcome = services.relay.run().await?;
//! println!("relayed {}", outcome.relayed());
//! services.shutdown().await;
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
