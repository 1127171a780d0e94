//! Infrastructure bootstrap helpers for runtime wiring.
//!
//! [`Services`] is the composition root: it turns a [`Config`] into the
//! application services, owns the process-lifetime publisher handle and
//! releases it in [`Services::shutdown`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use tracing::{debug, info, warn};

use crate::adapter::outbound::cosmos::CosmosStore;
use crate::adapter::outbound::eventhub::EventHubProducer;
use crate::adapter::outbound::feed::VehicleFeedClient;
use crate::adapter::outbound::firestore::{FirestoreStore, MemoryCollection};
use crate::adapter::outbound::pubsub::PubSubPublisher;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::SqliteCarRepository;
use crate::application::{Backend, CloudData, FetchAndRelay, VehicleBroadcaster};
use crate::error::Result;
use crate::infrastructure::config::backend::{
    BackendConfig, CosmosConfig, FirestoreConfig, PublisherKind,
};
use crate::infrastructure::config::broker::{BrokerConfig, ProducerKind};
use crate::infrastructure::config::settings::Config;
use crate::port::{BrokerProducer, LogProducer, LogPublisher, TopicPublisher, VehicleFeed};

/// Application services shared by every inbound adapter.
pub struct Services {
    pub data: Arc<CloudData>,
    pub relay: Arc<FetchAndRelay>,
    pub broadcaster: Arc<VehicleBroadcaster>,
    publisher: Option<(Arc<dyn TopicPublisher>, Duration)>,
}

impl Services {
    /// Assemble services from already-built collaborators.
    pub fn new(
        data: Arc<CloudData>,
        feed: Arc<dyn VehicleFeed>,
        broadcaster: VehicleBroadcaster,
    ) -> Self {
        Self {
            relay: Arc::new(FetchAndRelay::new(feed, data.clone())),
            data,
            broadcaster: Arc::new(broadcaster),
            publisher: None,
        }
    }

    /// Hand ownership of the pub/sub publisher to these services.
    #[must_use]
    pub fn with_publisher(mut self, publisher: Arc<dyn TopicPublisher>, drain: Duration) -> Self {
        self.publisher = Some((publisher, drain));
        self
    }

    /// Build every service from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the feed URL is invalid, the database cannot be
    /// opened or migrated, or a seed file cannot be loaded.
    #[allow(clippy::result_large_err)]
    pub fn build(config: &Config) -> Result<Self> {
        let feed: Arc<dyn VehicleFeed> = Arc::new(VehicleFeedClient::from_config(&config.feed)?);
        let broadcaster = VehicleBroadcaster::new(feed.clone(), build_producer(&config.broker))
            .with_topic(config.broker.topic.clone())
            .with_delay(Duration::from_millis(config.broker.delay_ms));

        let services = match &config.backend {
            BackendConfig::Cosmos(cosmos) => {
                let data = Arc::new(CloudData::new(Backend::Cosmos(build_cosmos(cosmos)?)));
                Self::new(data, feed, broadcaster)
            }
            BackendConfig::Firestore(firestore) => {
                let publisher = build_publisher(firestore);
                let store = FirestoreStore::new(
                    Arc::new(build_collection(firestore)?),
                    publisher.clone(),
                );
                let data = Arc::new(CloudData::new(Backend::Firestore(store)));
                Self::new(data, feed, broadcaster).with_publisher(
                    publisher,
                    Duration::from_secs(firestore.shutdown_timeout_secs),
                )
            }
        };

        info!(backend = config.backend.name(), "Services ready");
        Ok(services)
    }

    /// Release process-lifetime resources.
    ///
    /// Waits a bounded time for in-flight publishes. A failed or timed-out
    /// drain is logged and otherwise ignored.
    pub async fn shutdown(&self) {
        let Some((publisher, drain)) = &self.publisher else {
            return;
        };
        info!(drain_secs = drain.as_secs(), "Shutting down pub/sub publisher");
        if let Err(err) = publisher.shutdown(*drain).await {
            warn!(error = %err, "Pub/sub publisher did not shut down cleanly");
        }
    }
}

fn http_client(timeout_ms: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .unwrap_or_else(|err| {
            warn!(error = %err, "Failed to build HTTP client, using defaults");
            Client::new()
        })
}

pub(crate) fn build_producer(config: &BrokerConfig) -> Arc<dyn BrokerProducer> {
    match config.producer {
        ProducerKind::Log => Arc::new(LogProducer),
        ProducerKind::Eventhub => {
            info!(endpoint = %config.endpoint, topic = %config.topic, "Event Hubs producer enabled");
            Arc::new(EventHubProducer::new(
                http_client(config.timeout_ms),
                &config.endpoint,
                config.sas_token.clone(),
            ))
        }
    }
}

pub(crate) fn build_publisher(config: &FirestoreConfig) -> Arc<dyn TopicPublisher> {
    match config.publisher {
        PublisherKind::Log => Arc::new(LogPublisher),
        PublisherKind::Rest => Arc::new(PubSubPublisher::new(
            http_client(30_000),
            &config.pubsub_endpoint,
            &config.project_id,
            &config.topic_id,
            config.access_token.clone(),
        )),
    }
}

#[allow(clippy::result_large_err)]
fn build_cosmos(config: &CosmosConfig) -> Result<CosmosStore> {
    let url = config.database_url();
    let pool = create_pool(&url)?;
    run_migrations(&pool)?;
    info!(database = %config.database, url = %url, "Document database ready");
    if config.key.is_some() {
        debug!("Document database key ignored by the SQLite repository");
    }
    Ok(CosmosStore::new(Arc::new(SqliteCarRepository::new(pool))))
}

#[allow(clippy::result_large_err)]
fn build_collection(config: &FirestoreConfig) -> Result<MemoryCollection> {
    let collection = MemoryCollection::new(config.collection.clone());
    if let Some(path) = &config.seed_path {
        collection.seed_from_file(path)?;
    }
    Ok(collection)
}
