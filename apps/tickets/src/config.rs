//! Configuration management for the ticket list.
//!
//! Loads configuration from environment variables with sensible defaults.
//! The binary loads a `.env` file first, so the same keys can live there.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use std::time::Duration;
use ticket_desk_runtime::StoreConfig;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Start with the example tickets (`TICKETS_SEED`, default `true`)
    pub seed: bool,
    /// Default log directive when `RUST_LOG` is unset (`TICKETS_LOG_LEVEL`, default `info`)
    pub log_level: String,
    /// Effect action broadcast capacity (`TICKETS_BROADCAST_CAPACITY`, default 16)
    pub broadcast_capacity: usize,
    /// Graceful shutdown timeout in seconds (`TICKETS_SHUTDOWN_TIMEOUT_SECS`, default 5)
    pub shutdown_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: true,
            log_level: "info".to_string(),
            broadcast_capacity: 16,
            shutdown_timeout: 5,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable values fall back to the defaults.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    #[must_use]
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            seed: lookup("TICKETS_SEED")
                .and_then(|s| parse_flag(&s))
                .unwrap_or(defaults.seed),
            log_level: lookup("TICKETS_LOG_LEVEL")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or(defaults.log_level),
            broadcast_capacity: parse_or(
                &lookup,
                "TICKETS_BROADCAST_CAPACITY",
                defaults.broadcast_capacity,
            ),
            shutdown_timeout: parse_or(
                &lookup,
                "TICKETS_SHUTDOWN_TIMEOUT_SECS",
                defaults.shutdown_timeout,
            ),
        }
    }

    /// Store settings derived from this configuration
    #[must_use]
    pub const fn store_config(&self) -> StoreConfig {
        StoreConfig::new(
            self.broadcast_capacity,
            Duration::from_secs(self.shutdown_timeout),
        )
        .with_broadcast_capacity(self.broadcast_capacity)
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    lookup(key)
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
