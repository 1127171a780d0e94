//! Infrastructure configuration modules.

pub mod backend;
pub mod broker;
pub mod feed;
pub mod logging;
pub mod server;
pub mod settings;
