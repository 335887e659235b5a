//! Cart configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `CART_API_URL` - Base URL of the catalog API (default: `http://localhost:3333`)
//! - `CART_API_TOKEN` - Bearer token sent with catalog requests
//! - `CART_STORAGE_PATH` - Storage file (default: `storage.json` in the platform data dir)
//! - `CART_STORAGE_KEY` - Key the cart list is stored under (default: `@RocketShoes:cart`)
//! - `CART_LOCALE` - Price display locale, `pt-BR` or `en-US` (default: `pt-BR`)
//! - `CART_REQUEST_TIMEOUT_SECS` - Catalog request timeout (default: 10)
//! - `CART_PRODUCT_CACHE_TTL_SECS` - Product details cache TTL (default: 300)

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use secrecy::SecretString;
use shoe_shop_core::Locale;
use thiserror::Error;
use url::Url;

/// Storage key the cart list is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

const DEFAULT_API_URL: &str = "http://localhost:3333";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PRODUCT_CACHE_TTL_SECS: u64 = 300;
const STORAGE_FILE_NAME: &str = "storage.json";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart application configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// Catalog API settings
    pub api: CatalogConfig,
    /// File holding the persisted key/value storage
    pub storage_path: PathBuf,
    /// Key the cart list is stored under
    pub storage_key: String,
    /// Price display locale
    pub locale: Locale,
}

/// Catalog API configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    /// Base URL, e.g. `http://localhost:3333`
    pub base_url: Url,
    /// Optional bearer token
    pub token: Option<SecretString>,
    /// Per-request timeout
    pub request_timeout: Duration,
    /// How long product details stay cached
    pub product_cache_ttl: Duration,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout", &self.request_timeout)
            .field("product_cache_ttl", &self.product_cache_ttl)
            .finish()
    }
}

impl CatalogConfig {
    /// Catalog settings for `base_url` with default timeout and cache TTL.
    #[must_use]
    pub const fn new(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            product_cache_ttl: Duration::from_secs(DEFAULT_PRODUCT_CACHE_TTL_SECS),
        }
    }

    fn from_env() -> Result<Self, ConfigError> {
        let raw_url = get_env_or_default("CART_API_URL", DEFAULT_API_URL);
        let base_url = Url::parse(&raw_url)
            .map_err(|e| ConfigError::InvalidEnvVar("CART_API_URL".to_string(), e.to_string()))?;

        Ok(Self {
            base_url,
            token: get_optional_env("CART_API_TOKEN").map(SecretString::from),
            request_timeout: Duration::from_secs(get_parsed_env_or_default(
                "CART_REQUEST_TIMEOUT_SECS",
                DEFAULT_REQUEST_TIMEOUT_SECS,
            )?),
            product_cache_ttl: Duration::from_secs(get_parsed_env_or_default(
                "CART_PRODUCT_CACHE_TTL_SECS",
                DEFAULT_PRODUCT_CACHE_TTL_SECS,
            )?),
        })
    }
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed, or if
    /// no storage path is given and the platform data directory is unknown.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api = CatalogConfig::from_env()?;
        let storage_path = match get_optional_env("CART_STORAGE_PATH") {
            Some(path) => PathBuf::from(path),
            None => default_storage_path()?,
        };
        let storage_key = get_env_or_default("CART_STORAGE_KEY", DEFAULT_STORAGE_KEY);
        let locale = get_env_or_default("CART_LOCALE", Locale::default().tag())
            .parse::<Locale>()
            .map_err(|e| ConfigError::InvalidEnvVar("CART_LOCALE".to_string(), e.to_string()))?;

        Ok(Self {
            api,
            storage_path,
            storage_key,
            locale,
        })
    }
}

/// `storage.json` inside the platform data directory.
fn default_storage_path() -> Result<PathBuf, ConfigError> {
    ProjectDirs::from("com", "shoe-shop", "shoe-cart")
        .map(|dirs| dirs.data_dir().join(STORAGE_FILE_NAME))
        .ok_or_else(|| ConfigError::MissingEnvVar("CART_STORAGE_PATH".to_string()))
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

/// Get an environment variable parsed as `u64`, with a default value.
fn get_parsed_env_or_default(key: &str, default: u64) -> Result<u64, ConfigError> {
    get_optional_env(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
