//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Default upstream base URL
pub const DEFAULT_API_BASE_URL: &str = "https://pokeapi.co/api/v2";

/// Server configuration parameters.
///
/// Everything except `SECRET_KEY` has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Secret used to sign session cookies
    pub secret_key: String,
    /// Base URL of the upstream REST API
    pub api_base_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// TTL in seconds for individual Pokemon records
    pub record_ttl: u64,
    /// TTL in seconds for the species count
    pub count_ttl: u64,
    /// TTL in seconds for session records
    pub session_ttl: u64,
    /// Maximum number of entries in the upstream cache
    pub max_entries: usize,
    /// Maximum number of live sessions
    pub max_sessions: usize,
    /// Background cleanup task interval in seconds
    pub cleanup_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SECRET_KEY` - Session signing secret (required)
    /// - `POKEAPI_BASE_URL` - Upstream base URL (default: https://pokeapi.co/api/v2)
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `RECORD_TTL` - Record TTL in seconds (default: 3600)
    /// - `COUNT_TTL` - Species count TTL in seconds (default: 86400)
    /// - `SESSION_TTL` - Session TTL in seconds (default: 1800)
    /// - `MAX_ENTRIES` - Maximum upstream cache entries (default: 1000)
    /// - `MAX_SESSIONS` - Maximum live sessions (default: 10000)
    /// - `CLEANUP_INTERVAL` - Cleanup frequency in seconds (default: 60)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let secret_key = lookup("SECRET_KEY")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("SECRET_KEY"))?;

        let api_base_url = lookup("POKEAPI_BASE_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.api_base_url);

        let config = Self {
            secret_key,
            api_base_url,
            server_port: parse_var(&lookup, "SERVER_PORT", defaults.server_port)?,
            record_ttl: parse_var(&lookup, "RECORD_TTL", defaults.record_ttl)?,
            count_ttl: parse_var(&lookup, "COUNT_TTL", defaults.count_ttl)?,
            session_ttl: parse_var(&lookup, "SESSION_TTL", defaults.session_ttl)?,
            max_entries: parse_var(&lookup, "MAX_ENTRIES", defaults.max_entries)?,
            max_sessions: parse_var(&lookup, "MAX_SESSIONS", defaults.max_sessions)?,
            cleanup_interval: parse_var(&lookup, "CLEANUP_INTERVAL", defaults.cleanup_interval)?,
        };

        if config.count_ttl <= config.record_ttl {
            return Err(ConfigError::TtlOrdering {
                record_ttl: config.record_ttl,
                count_ttl: config.count_ttl,
            });
        }

        Ok(config)
    }

    pub fn record_ttl(&self) -> Duration {
        Duration::from_secs(self.record_ttl)
    }

    pub fn count_ttl(&self) -> Duration {
        Duration::from_secs(self.count_ttl)
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl)
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
        None => Ok(default),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            server_port: 3000,
            record_ttl: 3600,
            count_ttl: 86400,
            session_ttl: 1800,
            max_entries: 1000,
            max_sessions: 10_000,
            cleanup_interval: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.record_ttl, 3600);
        assert_eq!(config.count_ttl, 86400);
        assert!(config.count_ttl > config.record_ttl);
    }

    #[test]
    fn test_config_defaults_with_secret() {
        let config = Config::from_lookup(lookup_from(&[("SECRET_KEY", "s3cret")])).unwrap();
        assert_eq!(config.secret_key, "s3cret");
        assert_eq!(config.max_entries, 1000);
        assert_eq!(config.max_sessions, 10_000);
        assert_eq!(config.session_ttl, 1800);
        assert_eq!(config.cleanup_interval, 60);
    }

    #[test]
    fn test_config_missing_secret() {
        let result = Config::from_lookup(lookup_from(&[]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("SECRET_KEY"));

        let result = Config::from_lookup(lookup_from(&[("SECRET_KEY", "   ")]));
        assert_eq!(result.unwrap_err(), ConfigError::Missing("SECRET_KEY"));
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("SECRET_KEY", "k"),
            ("POKEAPI_BASE_URL", "http://localhost:9000/api"),
            ("SERVER_PORT", "8080"),
            ("RECORD_TTL", "60"),
            ("COUNT_TTL", "120"),
            ("MAX_SESSIONS", "50"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://localhost:9000/api");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.record_ttl(), Duration::from_secs(60));
        assert_eq!(config.count_ttl(), Duration::from_secs(120));
        assert_eq!(config.max_sessions, 50);
    }

    #[test]
    fn test_config_invalid_number() {
        let result = Config::from_lookup(lookup_from(&[
            ("SECRET_KEY", "k"),
            ("SERVER_PORT", "not-a-port"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { name: "SERVER_PORT", .. })
        ));
    }

    #[test]
    fn test_config_count_ttl_must_exceed_record_ttl() {
        let result = Config::from_lookup(lookup_from(&[
            ("SECRET_KEY", "k"),
            ("RECORD_TTL", "600"),
            ("COUNT_TTL", "600"),
        ]));
        assert!(matches!(result, Err(ConfigError::TtlOrdering { .. })));
    }
}
