//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `ROCKETSHOES_HOST` - Bind address (default: 127.0.0.1)
//! - `ROCKETSHOES_PORT` - Listen port (default: 3000)
//! - `CATALOG_API_URL` - Base URL of the products/stock API (default: <http://localhost:3333>)
//! - `CATALOG_API_TOKEN` - Bearer token sent to the catalog API
//! - `CATALOG_FIXTURE_PATH` - Serve the catalog from a JSON fixture instead of the API
//! - `CATALOG_CACHE_TTL_SECS` - Product cache TTL in seconds (default: 300)
//! - `CART_STORAGE_PATH` - Cart storage file (default: .rocketshoes/storage.json)
//! - `CART_STORAGE_KEY` - Key of the cart blob (default: @RocketShoes:cart)
//! - `CART_ADD_POLICY` - `increment` or `reject` (default: increment)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::services::cart::{AddPolicy, CartOptions};
use crate::storage::CART_KEY;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Product catalog configuration
    pub catalog: CatalogConfig,
    /// Cart storage and behaviour
    pub cart: CartConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production")
    pub sentry_environment: Option<String>,
}

/// Product catalog configuration.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL of the products/stock API
    pub api_url: Url,
    /// Optional bearer token for the API
    pub api_token: Option<SecretString>,
    /// Fixture file to serve instead of calling the API
    pub fixture_path: Option<PathBuf>,
    /// How long product records stay cached
    pub cache_ttl: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("api_url", &self.api_url.as_str())
            .field("api_token", &self.api_token.as_ref().map(|_| "[REDACTED]"))
            .field("fixture_path", &self.fixture_path)
            .field("cache_ttl", &self.cache_ttl)
            .finish()
    }
}

/// Cart storage and behaviour.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// File holding the stored cart
    pub storage_path: PathBuf,
    /// Key of the cart blob inside the storage file
    pub storage_key: String,
    /// What adding an already-present product does
    pub add_policy: AddPolicy,
}

impl CartConfig {
    /// Store options derived from this configuration.
    #[must_use]
    pub fn options(&self) -> CartOptions {
        CartOptions {
            storage_key: self.storage_key.clone(),
            add_policy: self.add_policy,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("ROCKETSHOES_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ROCKETSHOES_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("ROCKETSHOES_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("ROCKETSHOES_PORT".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            catalog: CatalogConfig::from_env()?,
            cart: CartConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl CatalogConfig {
    /// Load the catalog settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for an unparsable URL or TTL.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_url = parse_url(
            "CATALOG_API_URL",
            &get_env_or_default("CATALOG_API_URL", "http://localhost:3333"),
        )?;
        let cache_ttl = get_env_or_default("CATALOG_CACHE_TTL_SECS", "300")
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("CATALOG_CACHE_TTL_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            api_url,
            api_token: get_optional_env("CATALOG_API_TOKEN").map(SecretString::from),
            fixture_path: get_optional_env("CATALOG_FIXTURE_PATH").map(PathBuf::from),
            cache_ttl,
        })
    }
}

impl CartConfig {
    /// Load the cart settings from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` for an unknown add policy or an
    /// empty storage key.
    pub fn from_env() -> Result<Self, ConfigError> {
        let storage_key = get_env_or_default("CART_STORAGE_KEY", CART_KEY);
        if storage_key.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar(
                "CART_STORAGE_KEY".to_string(),
                "must not be empty".to_string(),
            ));
        }

        let add_policy = get_env_or_default("CART_ADD_POLICY", "increment")
            .parse::<AddPolicy>()
            .map_err(|e| ConfigError::InvalidEnvVar("CART_ADD_POLICY".to_string(), e))?;

        Ok(Self {
            storage_path: PathBuf::from(get_env_or_default(
                "CART_STORAGE_PATH",
                ".rocketshoes/storage.json",
            )),
            storage_key,
            add_policy,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an absolute http(s) URL.
fn parse_url(key: &str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }

    Ok(url)
}
