//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file with environment variable overrides
//! for secrets: `FEED_API_KEY`, `EVENTHUB_SAS_TOKEN`, `COSMOS_KEY` and
//! `PUBSUB_ACCESS_TOKEN`.
//!
//! # Example
//!
//! ```no_run
//! use carstream::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::backend::{BackendConfig, PublisherKind};
use super::broker::{BrokerConfig, ProducerKind};
use super::feed::FeedConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use crate::error::{ConfigError, Result};

pub const FEED_API_KEY: &str = "FEED_API_KEY";
pub const EVENTHUB_SAS_TOKEN: &str = "EVENTHUB_SAS_TOKEN";
pub const PUBSUB_ACCESS_TOKEN: &str = "PUBSUB_ACCESS_TOKEN";
pub const COSMOS_KEY: &str = "COSMOS_KEY";

/// Main application configuration.
///
/// Load from a TOML file using [`Config::load`] or parse directly with
/// [`Config::parse_toml`]. Every section is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Inbound HTTP API.
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub feed: FeedConfig,

    #[serde(default)]
    pub broker: BrokerConfig,

    /// The active document backend.
    #[serde(default)]
    pub backend: BackendConfig,
}

impl Config {
    /// Parse configuration from TOML content, applying environment overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        Self::parse_toml_with_env(content, |name| std::env::var(name).ok())
    }

    /// [`Config::parse_toml`] with an explicit environment lookup.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml_with_env(
        content: &str,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_env(env);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Initialize the tracing subscriber from the `[logging]` section.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    fn apply_env(&mut self, env: impl Fn(&str) -> Option<String>) {
        if let Some(key) = env(FEED_API_KEY) {
            self.feed.key = key;
        }
        if let Some(token) = env(EVENTHUB_SAS_TOKEN) {
            self.broker.sas_token = token;
        }
        match &mut self.backend {
            BackendConfig::Cosmos(cosmos) => {
                if let Some(key) = env(COSMOS_KEY) {
                    cosmos.key = Some(key);
                }
            }
            BackendConfig::Firestore(firestore) => {
                if let Some(token) = env(PUBSUB_ACCESS_TOKEN) {
                    firestore.access_token = Some(token);
                }
            }
        }
    }

    #[allow(clippy::result_large_err)]
    fn validate(&self) -> Result<()> {
        if self.feed.base_url.is_empty() {
            return Err(ConfigError::MissingField { field: "base_url" }.into());
        }
        if self.feed.path.is_empty() {
            return Err(ConfigError::MissingField { field: "path" }.into());
        }
        if self.feed.timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_ms",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.broker.topic.is_empty() {
            return Err(ConfigError::MissingField { field: "topic" }.into());
        }
        if self.broker.producer == ProducerKind::Eventhub {
            if self.broker.endpoint.is_empty() {
                return Err(ConfigError::MissingField { field: "endpoint" }.into());
            }
            if self.broker.sas_token.is_empty() {
                return Err(ConfigError::MissingField {
                    field: EVENTHUB_SAS_TOKEN,
                }
                .into());
            }
        }

        match &self.backend {
            BackendConfig::Cosmos(cosmos) => {
                if cosmos.database.is_empty() && cosmos.uri.is_none() {
                    return Err(ConfigError::MissingField { field: "database" }.into());
                }
            }
            BackendConfig::Firestore(firestore) => {
                if firestore.collection.is_empty() {
                    return Err(ConfigError::MissingField { field: "collection" }.into());
                }
                if firestore.shutdown_timeout_secs == 0 {
                    return Err(ConfigError::InvalidValue {
                        field: "shutdown_timeout_secs",
                        reason: "must be greater than 0".to_string(),
                    }
                    .into());
                }
                if firestore.publisher == PublisherKind::Rest {
                    if firestore.project_id.is_empty() {
                        return Err(ConfigError::MissingField { field: "project_id" }.into());
                    }
                    if firestore.topic_id.is_empty() {
                        return Err(ConfigError::MissingField { field: "topic_id" }.into());
                    }
                    if firestore.pubsub_endpoint.is_empty() {
                        return Err(ConfigError::MissingField {
                            field: "pubsub_endpoint",
                        }
                        .into());
                    }
                }
            }
        }

        Ok(())
    }
}
