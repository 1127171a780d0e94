//! Document backend configuration.
//!
//! Exactly one backend is active. The TOML `type` field picks it:
//!
//! ```toml
//! [backend]
//! type = "firestore"
//! project_id = "car-factory"
//! topic_id = "cars"
//! ```

use serde::Deserialize;

use crate::adapter::outbound::cosmos::DATABASE_NAME;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum BackendConfig {
    Cosmos(CosmosConfig),
    Firestore(FirestoreConfig),
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::Cosmos(CosmosConfig::default())
    }
}

impl BackendConfig {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Cosmos(_) => "cosmos",
            Self::Firestore(_) => "firestore",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CosmosConfig {
    pub database: String,
    /// SQLite database URL. Defaults to `{database}.db`.
    pub uri: Option<String>,
    /// Account key for a hosted document database; normally from
    /// `COSMOS_KEY`. The bundled SQLite repository needs none.
    pub key: Option<String>,
}

impl Default for CosmosConfig {
    fn default() -> Self {
        Self {
            database: DATABASE_NAME.into(),
            uri: None,
            key: None,
        }
    }
}

impl CosmosConfig {
    /// The database URL handed to the connection pool.
    #[must_use]
    pub fn database_url(&self) -> String {
        self.uri
            .clone()
            .unwrap_or_else(|| format!("{}.db", self.database))
    }
}

/// Which pub/sub publisher to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublisherKind {
    #[default]
    Log,
    Rest,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FirestoreConfig {
    pub collection: String,
    /// JSON array of car records loaded into the collection at startup.
    pub seed_path: Option<String>,
    pub project_id: String,
    pub topic_id: String,
    pub publisher: PublisherKind,
    pub pubsub_endpoint: String,
    /// Bearer token; normally from `PUBSUB_ACCESS_TOKEN`.
    pub access_token: Option<String>,
    /// Upper bound on the wait for in-flight publishes at shutdown.
    pub shutdown_timeout_secs: u64,
}

impl Default for FirestoreConfig {
    fn default() -> Self {
        Self {
            collection: "Car".into(),
            seed_path: None,
            project_id: String::new(),
            topic_id: String::new(),
            publisher: PublisherKind::default(),
            pubsub_endpoint: "https://pubsub.googleapis.com".into(),
            access_token: None,
            shutdown_timeout_secs: 60,
        }
    }
}
