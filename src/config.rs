//! Shop configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SWEET_SHOP_INVENTORY_LATENCY_MS` - Artificial delay per inventory call (default: 500)
//! - `SWEET_SHOP_AUTH_LATENCY_MS` - Artificial delay per auth call (default: 1000)
//! - `SWEET_SHOP_SESSION_DIR` - Directory holding the persisted session (default: .sweet-shop)
//! - `SWEET_SHOP_CHANNEL_CAPACITY` - Mailbox size of every actor (default: 32)
//! - `SWEET_SHOP_SEED_CATALOG` - Start with the demo sweets (default: true)

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_INVENTORY_LATENCY_MS: &str = "500";
const DEFAULT_AUTH_LATENCY_MS: &str = "1000";
const DEFAULT_SESSION_DIR: &str = ".sweet-shop";
const DEFAULT_CHANNEL_CAPACITY: &str = "32";
const DEFAULT_SEED_CATALOG: &str = "true";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where each storefront keeps its session record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionBackend {
    File(PathBuf),
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShopConfig {
    pub inventory_latency: Duration,
    pub auth_latency: Duration,
    pub session: SessionBackend,
    pub channel_capacity: usize,
    pub seed_catalog: bool,
}

impl ShopConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let inventory_latency = Duration::from_millis(parse_var(
            "SWEET_SHOP_INVENTORY_LATENCY_MS",
            &get("SWEET_SHOP_INVENTORY_LATENCY_MS", DEFAULT_INVENTORY_LATENCY_MS),
        )?);
        let auth_latency = Duration::from_millis(parse_var(
            "SWEET_SHOP_AUTH_LATENCY_MS",
            &get("SWEET_SHOP_AUTH_LATENCY_MS", DEFAULT_AUTH_LATENCY_MS),
        )?);
        let session = SessionBackend::File(PathBuf::from(get("SWEET_SHOP_SESSION_DIR", DEFAULT_SESSION_DIR)));

        let channel_capacity: usize = parse_var(
            "SWEET_SHOP_CHANNEL_CAPACITY",
            &get("SWEET_SHOP_CHANNEL_CAPACITY", DEFAULT_CHANNEL_CAPACITY),
        )?;
        // tokio::sync::mpsc::channel panics on zero capacity
        if channel_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SWEET_SHOP_CHANNEL_CAPACITY".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        let seed_catalog = parse_var(
            "SWEET_SHOP_SEED_CATALOG",
            &get("SWEET_SHOP_SEED_CATALOG", DEFAULT_SEED_CATALOG).to_lowercase(),
        )?;

        Ok(Self {
            inventory_latency,
            auth_latency,
            session,
            channel_capacity,
            seed_catalog,
        })
    }

    /// No latency, in-memory sessions, seeded catalog.
    pub fn for_tests() -> Self {
        Self {
            inventory_latency: Duration::ZERO,
            auth_latency: Duration::ZERO,
            session: SessionBackend::Memory,
            channel_capacity: 32,
            seed_catalog: true,
        }
    }
}

fn parse_var<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}
