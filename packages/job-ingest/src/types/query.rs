//! Query keys and raw listings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// A single listing exactly as the search API returned it.
pub type RawListing = Map<String, Value>;

/// Identifies one search (a role, a geography, or both).
///
/// Query keys are immutable once issued and double as partition keys
/// in the dataflow.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueryKey(String);

impl QueryKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QueryKey {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for QueryKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for QueryKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_key_serializes_as_string() {
        let key = QueryKey::new("AI Engineer");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"AI Engineer\"");
        assert_eq!(key.to_string(), "AI Engineer");
    }
}
