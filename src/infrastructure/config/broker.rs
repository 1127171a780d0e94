//! Message broker configuration.

use serde::Deserialize;

use crate::port::VEHICLE_TOPIC;

/// Which broker producer to build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProducerKind {
    /// Log every message instead of sending it.
    #[default]
    Log,
    /// Event Hubs REST endpoint.
    Eventhub,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrokerConfig {
    pub producer: ProducerKind,
    pub topic: String,
    /// Event Hubs namespace URL, e.g. `https://ns.servicebus.windows.net`.
    pub endpoint: String,
    /// Shared access signature; normally from `EVENTHUB_SAS_TOKEN`.
    pub sas_token: String,
    /// Pause between successive records.
    pub delay_ms: u64,
    pub timeout_ms: u64,
}

impl Default for BrokerConfig {
    fn default() -> Self {
        Self {
            producer: ProducerKind::default(),
            topic: VEHICLE_TOPIC.into(),
            endpoint: String::new(),
            sas_token: String::new(),
            delay_ms: 1_000,
            timeout_ms: 10_000,
        }
    }
}
