//! Logging configuration and initialization.

use serde::Deserialize;
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// Log line layout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Initialize the tracing subscriber with this logging configuration.
    ///
    /// `RUST_LOG` takes precedence over `level`. Logs go to stderr so that
    /// command output on stdout stays machine readable. A subscriber that is
    /// already installed is kept.
    pub fn init(&self) {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.level));
        let builder = fmt().with_env_filter(filter).with_writer(std::io::stderr);

        let result = match self.format {
            LogFormat::Json => builder.json().try_init(),
            LogFormat::Pretty => builder.try_init(),
        };
        if let Err(err) = result {
            debug!(error = %err, "Tracing subscriber already installed");
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: LogFormat::Pretty,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_init_keeps_first_subscriber() {
        let config = LoggingConfig::default();
        config.init();
        config.init();
    }

    #[test]
    fn unknown_format_is_rejected() {
        let parsed: Result<LoggingConfig, _> = toml::from_str("format = \"xml\"");
        assert!(parsed.is_err());
    }
}
