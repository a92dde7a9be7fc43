//! Process configuration.
//!
//! Loaded from environment variables (and a `.env` file when present) with
//! defaults suitable for local development.

use anyhow::{bail, Context, Result};

pub use tarragona_observability::LogFormat;

/// Which record store backs the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    InMemory,
    Postgres { database_url: String },
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bind host.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Postgres connection string. In-memory storage when unset.
    pub database_url: Option<String>,

    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            database_url: None,
            log_format: LogFormat::Json,
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        // Load .env file if it exists (for local development)
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("Invalid PORT: {raw:?}"))?,
            None => defaults.port,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("json") => LogFormat::Json,
            Some("pretty") => LogFormat::Pretty,
            Some(other) => bail!("Invalid LOG_FORMAT: {other:?} (expected \"json\" or \"pretty\")"),
        };

        let config = Self {
            host: lookup("HOST")
                .filter(|h| !h.trim().is_empty())
                .unwrap_or(defaults.host),
            port,
            database_url: lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()),
            log_format,
        };

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("PORT must be greater than 0");
        }
        Ok(())
    }

    /// Socket address to bind, e.g. `0.0.0.0:4000`.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn store_backend(&self) -> StoreBackend {
        match &self.database_url {
            Some(url) => StoreBackend::Postgres {
                database_url: url.clone(),
            },
            None => StoreBackend::InMemory,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_address(), "0.0.0.0:4000");
        assert_eq!(config.store_backend(), StoreBackend::InMemory);
    }

    #[test]
    fn reads_every_variable() {
        let config = Config::from_lookup(lookup(&[
            ("HOST", "127.0.0.1"),
            ("PORT", "8081"),
            ("DATABASE_URL", "postgres://localhost/tarragona"),
            ("LOG_FORMAT", "pretty"),
        ]))
        .unwrap();

        assert_eq!(config.bind_address(), "127.0.0.1:8081");
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(
            config.store_backend(),
            StoreBackend::Postgres {
                database_url: "postgres://localhost/tarragona".to_string()
            }
        );
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let config = Config::from_lookup(lookup(&[("DATABASE_URL", "  ")])).unwrap();
        assert_eq!(config.store_backend(), StoreBackend::InMemory);
    }

    #[test]
    fn rejects_bad_values() {
        let err = Config::from_lookup(lookup(&[("PORT", "0")])).unwrap_err();
        assert!(err.to_string().contains("PORT must be greater than 0"));

        let err = Config::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().contains("Invalid PORT"));

        let err = Config::from_lookup(lookup(&[("LOG_FORMAT", "xml")])).unwrap_err();
        assert!(err.to_string().contains("Invalid LOG_FORMAT"));
    }
}
