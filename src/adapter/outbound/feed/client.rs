//! HTTP client for the vehicle feed provider.

use std::collections::VecDeque;
use std::fmt::Display;
use std::time::Duration;

use futures_util::stream::{self, Stream, StreamExt, TryStreamExt};
use reqwest::Client as HttpClient;
use tracing::{debug, info, warn};
use url::Url;

use super::decoder::JsonArrayDecoder;
use crate::domain::stream::{error_if_empty, RecordStream};
use crate::domain::VehicleRecord;
use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::feed::FeedConfig;
use crate::port::VehicleFeed;

/// Client for `GET {base_url}{path}?key={key}`.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Clone)]
pub struct VehicleFeedClient {
    http: HttpClient,
    url: Url,
}

impl VehicleFeedClient {
    /// Create a client with default HTTP settings.
    pub fn new(base_url: &str, path: &str, key: &str) -> Result<Self> {
        Ok(Self {
            http: HttpClient::new(),
            url: feed_url(base_url, path, key)?,
        })
    }

    pub fn from_config(config: &FeedConfig) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .connect_timeout(Duration::from_millis(config.connect_timeout_ms))
            .build()
            .unwrap_or_else(|err| {
                warn!(error = %err, "Failed to build HTTP client, using defaults");
                HttpClient::new()
            });

        Ok(Self {
            http,
            url: feed_url(&config.base_url, &config.path, &config.key)?,
        })
    }

    /// The full request URL, including the access key.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    async fn open(http: HttpClient, url: Url) -> Result<RecordStream<VehicleRecord>> {
        info!(host = url.host_str().unwrap_or_default(), path = url.path(), "Fetching vehicle feed");

        let response = http.get(url).send().await.map_err(unavailable)?;
        let response = response.error_for_status().map_err(unavailable)?;

        Ok(decode_body(Box::pin(response.bytes_stream())))
    }
}

impl VehicleFeed for VehicleFeedClient {
    fn fetch(&self) -> RecordStream<VehicleRecord> {
        let opened = Self::open(self.http.clone(), self.url.clone());
        let vehicles = stream::once(opened).try_flatten().boxed();
        error_if_empty(vehicles, || {
            Error::FeedUnavailable("feed returned no vehicles".into())
        })
    }
}

fn feed_url(base_url: &str, path: &str, key: &str) -> Result<Url> {
    let base = Url::parse(base_url).map_err(|e| ConfigError::InvalidValue {
        field: "base_url",
        reason: e.to_string(),
    })?;
    let mut url = base.join(path).map_err(|e| ConfigError::InvalidValue {
        field: "path",
        reason: e.to_string(),
    })?;
    url.query_pairs_mut().append_pair("key", key);
    Ok(url)
}

fn unavailable(err: reqwest::Error) -> Error {
    Error::FeedUnavailable(err.to_string())
}

struct BodyState<S> {
    body: S,
    decoder: JsonArrayDecoder,
    pending: VecDeque<Vec<u8>>,
    /// Structural error to yield once `pending` drains.
    failure: Option<Error>,
    decoded: usize,
    done: bool,
}

/// Decode a chunked response body into vehicles, one per array element.
///
/// The first failure (transport, structure, or an element that does not
/// decode) is yielded and ends the stream. Elements that closed before a
/// structural error are yielded first, however the body was chunked.
pub(crate) fn decode_body<S, B, E>(body: S) -> RecordStream<VehicleRecord>
where
    S: Stream<Item = std::result::Result<B, E>> + Send + Unpin + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
{
    let state = BodyState {
        body,
        decoder: JsonArrayDecoder::new(),
        pending: VecDeque::new(),
        failure: None,
        decoded: 0,
        done: false,
    };

    stream::unfold(state, |mut state| async move {
        loop {
            if let Some(raw) = state.pending.pop_front() {
                return match serde_json::from_slice::<VehicleRecord>(&raw) {
                    Ok(vehicle) => {
                        state.decoded += 1;
                        Some((Ok(vehicle), state))
                    }
                    Err(err) => {
                        state.pending.clear();
                        state.failure = None;
                        state.done = true;
                        let err = Error::FeedUnavailable(format!("malformed vehicle record: {err}"));
                        Some((Err(err), state))
                    }
                };
            }
            if state.done {
                let failure = state.failure.take();
                return failure.map(|err| (Err(err), state));
            }

            match state.body.next().await {
                Some(Ok(chunk)) => {
                    let (elements, error) = state.decoder.feed(chunk.as_ref());
                    state.pending.extend(elements);
                    if error.is_some() {
                        state.failure = error;
                        state.done = true;
                    }
                }
                Some(Err(err)) => {
                    state.done = true;
                    return Some((Err(Error::FeedUnavailable(err.to_string())), state));
                }
                None => {
                    state.done = true;
                    debug!(vehicles = state.decoded, "Vehicle feed body complete");
                    if let Err(err) = state.decoder.finish() {
                        return Some((Err(err), state));
                    }
                }
            }
        }
    })
    .boxed()
}
