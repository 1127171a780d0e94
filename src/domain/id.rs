//! Backend-native document keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of a stored car document.
///
/// Cosmos-style documents are keyed by the decimal car ID; the inner
/// String stays private so every key goes through [`DocumentId::for_car`]
/// or an explicit conversion.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Key used for the document holding car `car_id`.
    #[must_use]
    pub fn for_car(car_id: i64) -> Self {
        Self(car_id.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for DocumentId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for DocumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
