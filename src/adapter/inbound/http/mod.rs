//! Inbound HTTP API.
//!
//! | Method | Path             | Answer                                   |
//! |--------|------------------|------------------------------------------|
//! | GET    | `/brands`        | JSON array of brands                     |
//! | GET    | `/cars?brand=X`  | JSON array of cars of brand `X`          |
//! | GET    | `/brands/stream` | server-sent events, one per new brand    |
//! | POST   | `/relay`         | runs fetch-and-relay, returns the outcome |
//! | POST   | `/broadcast`     | starts the broker relay, `202 Accepted`  |
//! | GET    | `/health`        | `ok`                                     |

mod error;
mod handler;
mod server;

pub use error::{status_for, ApiError};
pub use server::{router, serve, AppState};
