use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The vehicle feed was unreachable, malformed, or returned nothing.
    #[error("vehicle feed unavailable: {0}")]
    FeedUnavailable(String),

    /// A backend query failed.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),

    /// A read produced zero results.
    #[error("not found: {0}")]
    NotFound(String),

    /// A conditional write carried a stale version token.
    #[error("version conflict on document {id}")]
    VersionConflict { id: String },

    /// A broker or pub/sub send failed.
    #[error("publish failed: {0}")]
    PublishFailure(String),

    /// The active backend does not offer this capability.
    #[error("unsupported by {backend} backend: {operation}")]
    Unsupported {
        backend: &'static str,
        operation: &'static str,
    },

    /// Fetch-and-relay stopped at the first failed write.
    #[error("relay aborted at car {car_id}: {source}")]
    RelayAborted {
        car_id: i64,
        #[source]
        source: Box<Error>,
    },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// True for failures that mean "the query ran and matched nothing".
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}
