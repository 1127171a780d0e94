//! REST client for `POST /v1/projects/{project}/topics/{topic}:publish`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::port::TopicPublisher;

/// Publisher bound to one topic.
///
/// Tracks in-flight publishes so [`TopicPublisher::shutdown`] can wait for
/// them to drain. Publishing after shutdown fails.
pub struct PubSubPublisher {
    client: Client,
    url: String,
    token: Option<String>,
    tracker: Arc<InFlight>,
}

#[derive(Default)]
struct InFlight {
    count: AtomicUsize,
    closed: AtomicBool,
    idle: Notify,
}

struct InFlightGuard(Arc<InFlight>);

impl Drop for InFlightGuard {
    fn drop(&mut self) {
        if self.0.count.fetch_sub(1, Ordering::SeqCst) == 1 {
            self.0.idle.notify_waiters();
        }
    }
}

#[derive(Serialize)]
struct PublishRequest {
    messages: Vec<OutgoingMessage>,
}

#[derive(Serialize)]
struct OutgoingMessage {
    data: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PublishResponse {
    #[serde(default)]
    message_ids: Vec<String>,
}

impl PubSubPublisher {
    pub fn new(
        client: Client,
        endpoint: &str,
        project_id: &str,
        topic_id: &str,
        token: Option<String>,
    ) -> Self {
        let url = format!(
            "{}/v1/projects/{project_id}/topics/{topic_id}:publish",
            endpoint.trim_end_matches('/')
        );
        info!(url = %url, "Pub/sub publisher created");
        Self {
            client,
            url,
            token,
            tracker: Arc::new(InFlight::default()),
        }
    }

    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.tracker.count.load(Ordering::SeqCst)
    }

    fn begin(&self) -> Result<InFlightGuard> {
        self.tracker.count.fetch_add(1, Ordering::SeqCst);
        let guard = InFlightGuard(self.tracker.clone());
        if self.tracker.closed.load(Ordering::SeqCst) {
            return Err(Error::PublishFailure("publisher is shut down".into()));
        }
        Ok(guard)
    }

    async fn drained(&self) {
        loop {
            let idle = self.tracker.idle.notified();
            if self.tracker.count.load(Ordering::SeqCst) == 0 {
                return;
            }
            idle.await;
        }
    }
}

#[async_trait]
impl TopicPublisher for PubSubPublisher {
    async fn publish(&self, data: Vec<u8>) -> Result<String> {
        let _guard = self.begin()?;

        let body = PublishRequest {
            messages: vec![OutgoingMessage {
                data: STANDARD.encode(&data),
            }],
        };

        let mut request = self.client.post(&self.url).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| Error::PublishFailure(e.to_string()))?;
        let parsed: PublishResponse = response
            .json()
            .await
            .map_err(|e| Error::PublishFailure(e.to_string()))?;

        let message_id = parsed
            .message_ids
            .into_iter()
            .next()
            .ok_or_else(|| Error::PublishFailure("publish response carried no message id".into()))?;
        debug!(message_id = %message_id, bytes = data.len(), "Published message");
        Ok(message_id)
    }

    async fn shutdown(&self, timeout: Duration) -> Result<()> {
        self.tracker.closed.store(true, Ordering::SeqCst);
        match tokio::time::timeout(timeout, self.drained()).await {
            Ok(()) => {
                info!("Pub/sub publisher shut down");
                Ok(())
            }
            Err(_) => {
                let pending = self.in_flight();
                warn!(pending, "Pub/sub publisher drain timed out");
                Err(Error::PublishFailure(format!(
                    "{pending} publishes still in flight after {timeout:?}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publisher() -> PubSubPublisher {
        PubSubPublisher::new(
            Client::new(),
            "http://127.0.0.1:9/",
            "car-factory",
            "cars",
            None,
        )
    }

    #[test]
    fn builds_publish_url() {
        assert_eq!(
            publisher().url(),
            "http://127.0.0.1:9/v1/projects/car-factory/topics/cars:publish"
        );
    }

    #[tokio::test]
    async fn shutdown_with_nothing_in_flight_is_immediate() {
        let publisher = publisher();
        publisher.shutdown(Duration::from_millis(10)).await.unwrap();
    }

    #[tokio::test]
    async fn publish_after_shutdown_fails() {
        let publisher = publisher();
        publisher.shutdown(Duration::from_millis(10)).await.unwrap();

        let result = publisher.publish(b"{}".to_vec()).await;
        assert!(matches!(result, Err(Error::PublishFailure(msg)) if msg.contains("shut down")));
        assert_eq!(publisher.in_flight(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_times_out_while_publish_is_pending() {
        let publisher = publisher();
        let guard = publisher.begin().unwrap();

        let result = publisher.shutdown(Duration::from_secs(60)).await;
        assert!(matches!(result, Err(Error::PublishFailure(_))));
        drop(guard);
        assert_eq!(publisher.in_flight(), 0);
    }

    #[tokio::test]
    async fn shutdown_waits_for_in_flight_publish() {
        let publisher = Arc::new(publisher());
        let guard = publisher.begin().unwrap();

        let waiter = {
            let publisher = publisher.clone();
            tokio::spawn(async move { publisher.shutdown(Duration::from_secs(5)).await })
        };
        tokio::task::yield_now().await;
        drop(guard);

        waiter.await.unwrap().unwrap();
    }
}
