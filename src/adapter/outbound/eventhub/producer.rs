//! REST producer for `POST {endpoint}/{topic}/messages`.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::error::{Error, Result};
use crate::port::{BrokerMessage, BrokerProducer};

/// Sends each message as one JSON event, authorized with a shared access
/// signature.
pub struct EventHubProducer {
    client: Client,
    endpoint: String,
    sas_token: String,
}

impl EventHubProducer {
    pub fn new(client: Client, endpoint: &str, sas_token: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            sas_token: sas_token.into(),
        }
    }

    /// Send URL for `topic`.
    #[must_use]
    pub fn messages_url(&self, topic: &str) -> String {
        format!("{}/{topic}/messages", self.endpoint)
    }
}

#[async_trait]
impl BrokerProducer for EventHubProducer {
    async fn send(&self, message: &BrokerMessage) -> Result<()> {
        let url = self.messages_url(&message.topic);
        let response = self
            .client
            .post(&url)
            .header(reqwest::header::AUTHORIZATION, &self.sas_token)
            .json(&message.payload)
            .send()
            .await
            .map_err(|e| Error::PublishFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::PublishFailure(format!(
                "event hub rejected message {}: {status}",
                message.payload.id
            )));
        }

        debug!(topic = %message.topic, id = message.payload.id, "Event sent");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "eventhub"
    }
}
