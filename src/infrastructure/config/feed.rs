//! Vehicle feed configuration.

use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://my.api.mockaroo.com";
pub const DEFAULT_PATH: &str = "/vehicle.json";

/// Where the vehicle feed lives and how long to wait for it.
///
/// `key` is normally supplied through `FEED_API_KEY`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub base_url: String,
    pub path: String,
    pub key: String,
    /// Whole-request timeout in milliseconds.
    pub timeout_ms: u64,
    pub connect_timeout_ms: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            path: DEFAULT_PATH.into(),
            key: String::new(),
            timeout_ms: 30_000,
            connect_timeout_ms: 5_000,
        }
    }
}
