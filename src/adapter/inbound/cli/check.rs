//! Handler for `check config`.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::backend::{BackendConfig, PublisherKind};
use crate::infrastructure::config::broker::ProducerKind;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration file without starting anything.
pub fn execute_config(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Feed", format!("{}{}", config.feed.base_url, config.feed.path));
    output::field("Bind", config.server.bind);
    output::field("Topic", &config.broker.topic);
    output::field("Backend", config.backend.name());

    if config.feed.key.is_empty() {
        output::warning("Feed key not configured (set FEED_API_KEY)");
    }
    match config.broker.producer {
        ProducerKind::Eventhub => output::field("Broker", &config.broker.endpoint),
        ProducerKind::Log => output::field("Broker", "log only"),
    }
    match &config.backend {
        BackendConfig::Cosmos(cosmos) => {
            output::field("Database", cosmos.database_url());
            output::field("Key", if cosmos.key.is_some() { "set" } else { "not set" });
        }
        BackendConfig::Firestore(firestore) => {
            output::field("Collection", &firestore.collection);
            match firestore.publisher {
                PublisherKind::Rest => output::field(
                    "Pub/Sub",
                    format!("{}/{}", firestore.project_id, firestore.topic_id),
                ),
                PublisherKind::Log => output::field("Pub/Sub", "log only"),
            }
            if firestore.publisher == PublisherKind::Rest && firestore.access_token.is_none() {
                output::warning("Pub/sub token not configured (set PUBSUB_ACCESS_TOKEN)");
            }
        }
    }

    output::success("Configuration check complete");
    Ok(())
}
