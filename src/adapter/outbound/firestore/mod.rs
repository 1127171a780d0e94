//! Firestore-style document store adapter.
//!
//! [`FirestoreStore`] reads from a [`CarCollection`](crate::port::CarCollection),
//! streams first-seen brands from its change listener, and pushes cars to a
//! pub/sub topic. [`MemoryCollection`] is the bundled collection.

mod memory;
mod store;

pub use memory::MemoryCollection;
pub use store::FirestoreStore;
