//! Environment-driven configuration.

use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::time::Duration;

use jsearch_client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};

use crate::error::ConfigError;
use crate::limiters::DEFAULT_COOLDOWN;
use crate::types::query::QueryKey;

/// Env file the ingestion scripts have always read their key from.
pub const ENV_FILE: &str = "source.env";

pub const DEFAULT_QUERY: &str = "AI Engineer";

/// Key variable used by existing `source.env` files; read when `JSEARCH_API_KEY` is unset.
pub const LEGACY_API_KEY_VAR: &str = "api_key";

/// Fetch-side configuration.
///
/// The API key is optional: without one every search is rejected by the
/// API and logged as a request failure, but the flow still runs.
#[derive(Debug)]
pub struct Config {
    pub api_key: Option<SecretString>,
    pub base_url: String,
    pub timeout: Duration,
    pub cooldown: Duration,
    pub queries: Vec<QueryKey>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cooldown: DEFAULT_COOLDOWN,
            queries: vec![QueryKey::new(DEFAULT_QUERY)],
        }
    }
}

impl Config {
    /// Load configuration from `source.env`, `.env`, and the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Both files are optional (development convenience)
        let _ = dotenvy::from_filename(ENV_FILE);
        let _ = dotenvy::dotenv();

        Self::from_lookup(|var| env::var(var).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self {
            api_key: lookup("JSEARCH_API_KEY")
                .filter(|k| !k.trim().is_empty())
                .or_else(|| lookup(LEGACY_API_KEY_VAR).filter(|k| !k.trim().is_empty()))
                .map(SecretString::from),
            ..Self::default()
        };

        if let Some(url) = lookup("JSEARCH_BASE_URL") {
            config.base_url = url;
        }
        if let Some(secs) = lookup("JSEARCH_TIMEOUT_SECS") {
            config.timeout = parse_secs("JSEARCH_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = lookup("JSEARCH_COOLDOWN_SECS") {
            config.cooldown = parse_secs("JSEARCH_COOLDOWN_SECS", &secs)?;
        }
        if let Some(raw) = lookup("JSEARCH_QUERIES") {
            config.queries = parse_queries(&raw)?;
        }

        Ok(config)
    }

    /// Replace the configured queries (e.g. from CLI flags).
    pub fn with_queries(mut self, queries: Vec<QueryKey>) -> Result<Self, ConfigError> {
        if queries.is_empty() {
            return Err(ConfigError::NoQueries);
        }
        self.queries = queries;
        Ok(self)
    }

    /// The API key to send, or an empty string when none is configured.
    pub fn api_key_or_empty(&self) -> &str {
        self.api_key
            .as_ref()
            .map(|k| k.expose_secret())
            .unwrap_or_default()
    }
}

fn parse_secs(var: &'static str, value: &str) -> Result<Duration, ConfigError> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| ConfigError::Invalid {
            var,
            value: value.to_string(),
        })
}

fn parse_queries(raw: &str) -> Result<Vec<QueryKey>, ConfigError> {
    let queries: Vec<QueryKey> = raw
        .split(',')
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .map(QueryKey::new)
        .collect();

    if queries.is_empty() {
        return Err(ConfigError::NoQueries);
    }
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert!(config.api_key.is_none());
        assert_eq!(config.api_key_or_empty(), "");
        assert_eq!(config.timeout, Duration::from_secs(10));
        assert_eq!(config.cooldown, Duration::from_secs(35));
        assert_eq!(config.queries, vec![QueryKey::new("AI Engineer")]);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("JSEARCH_API_KEY", "secret-key"),
            ("JSEARCH_TIMEOUT_SECS", "3"),
            ("JSEARCH_COOLDOWN_SECS", "0"),
            ("JSEARCH_QUERIES", "AI Engineer, ML Engineer ,,"),
        ]))
        .unwrap();

        assert_eq!(config.api_key_or_empty(), "secret-key");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.cooldown, Duration::ZERO);
        assert_eq!(config.queries, vec![QueryKey::new("AI Engineer"), QueryKey::new("ML Engineer")]);
    }

    #[test]
    fn test_api_key_falls_back_to_source_env_name() {
        let config = Config::from_lookup(lookup(&[("api_key", "abc")])).unwrap();
        assert_eq!(config.api_key_or_empty(), "abc");

        let config = Config::from_lookup(lookup(&[
            ("JSEARCH_API_KEY", "preferred"),
            ("api_key", "abc"),
        ]))
        .unwrap();
        assert_eq!(config.api_key_or_empty(), "preferred");

        let config = Config::from_lookup(lookup(&[("JSEARCH_API_KEY", " "), ("api_key", "abc")])).unwrap();
        assert_eq!(config.api_key_or_empty(), "abc");
    }

    #[test]
    fn test_api_key_not_in_debug() {
        let config = Config::from_lookup(lookup(&[("JSEARCH_API_KEY", "sk-super-secret")])).unwrap();
        assert!(!format!("{:?}", config).contains("sk-super-secret"));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            Config::from_lookup(lookup(&[("JSEARCH_TIMEOUT_SECS", "ten")])),
            Err(ConfigError::Invalid { var: "JSEARCH_TIMEOUT_SECS", .. })
        ));
        assert!(matches!(
            Config::from_lookup(lookup(&[("JSEARCH_QUERIES", " , ")])),
            Err(ConfigError::NoQueries)
        ));
        assert!(matches!(
            Config::default().with_queries(vec![]),
            Err(ConfigError::NoQueries)
        ));
    }
}
