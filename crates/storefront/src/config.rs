//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `GALLERY_HOST` - Bind address (default: 127.0.0.1)
//! - `GALLERY_PORT` - Listen port (default: 3000)
//! - `CATALOG_API_URL` - Base URL of the product catalog API
//!   (default: <https://fakestoreapi.com>)
//! - `GALLERY_CART_PATH` - JSON file holding the durable cart
//!   (default: .product-gallery/cart.json)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default catalog API.
pub const DEFAULT_CATALOG_API_URL: &str = "https://fakestoreapi.com";

/// Default location of the durable cart slot.
pub const DEFAULT_CART_PATH: &str = ".product-gallery/cart.json";

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
    /// Catalog API configuration
    pub catalog: CatalogConfig,
    /// Path of the durable cart slot
    pub cart_path: PathBuf,
    /// Sentry error tracking configuration
    pub sentry: SentryConfig,
}

/// Product catalog API configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL, e.g. `https://fakestoreapi.com`
    pub base_url: Url,
}

impl CatalogConfig {
    /// Create a catalog configuration from a base URL string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if the URL does not parse.
    pub fn parse(base_url: &str) -> Result<Self, ConfigError> {
        let base_url = Url::parse(base_url).map_err(|e| {
            ConfigError::InvalidEnvVar("CATALOG_API_URL".to_string(), e.to_string())
        })?;
        Ok(Self { base_url })
    }

    fn from_env() -> Result<Self, ConfigError> {
        Self::parse(&get_env_or_default(
            "CATALOG_API_URL",
            DEFAULT_CATALOG_API_URL,
        ))
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_CATALOG_API_URL).expect("default catalog URL is valid"),
        }
    }
}

/// Sentry configuration.
///
/// Implements `Debug` manually to redact the DSN.
#[derive(Clone, Default)]
pub struct SentryConfig {
    /// Sentry DSN; Sentry is disabled when absent
    pub dsn: Option<SecretString>,
    /// Environment name reported with events
    pub environment: Option<String>,
    /// Error event sample rate
    pub sample_rate: f32,
    /// Performance transaction sample rate
    pub traces_sample_rate: f32,
}

impl std::fmt::Debug for SentryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentryConfig")
            .field("dsn", &self.dsn.as_ref().map(|_| "[REDACTED]"))
            .field("environment", &self.environment)
            .field("sample_rate", &self.sample_rate)
            .field("traces_sample_rate", &self.traces_sample_rate)
            .finish()
    }
}

impl SentryConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            dsn: get_optional_env("SENTRY_DSN").map(SecretString::from),
            environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sample_rate: parse_env_or_default("SENTRY_SAMPLE_RATE", 1.0)?,
            traces_sample_rate: parse_env_or_default("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env_or_default("GALLERY_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_env_or_default("GALLERY_PORT", 3000_u16)?;
        let catalog = CatalogConfig::from_env()?;
        let cart_path = PathBuf::from(get_env_or_default("GALLERY_CART_PATH", DEFAULT_CART_PATH));
        let sentry = SentryConfig::from_env()?;

        Ok(Self {
            host,
            port,
            catalog,
            cart_path,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating blank values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_config_parse() {
        let config = CatalogConfig::parse("http://127.0.0.1:8080").unwrap();
        assert_eq!(config.base_url.as_str(), "http://127.0.0.1:8080/");
    }

    #[test]
    fn test_catalog_config_rejects_invalid_url() {
        let err = CatalogConfig::parse("not a url").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CATALOG_API_URL"));
    }

    #[test]
    fn test_default_catalog_url() {
        assert_eq!(
            CatalogConfig::default().base_url.as_str(),
            "https://fakestoreapi.com/"
        );
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            catalog: CatalogConfig::default(),
            cart_path: PathBuf::from(DEFAULT_CART_PATH),
            sentry: SentryConfig::default(),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_sentry_config_debug_redacts_dsn() {
        let config = SentryConfig {
            dsn: Some(SecretString::from("https://super_secret_key@sentry.example/1")),
            environment: Some("local".to_string()),
            sample_rate: 1.0,
            traces_sample_rate: 0.0,
        };

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("local"));
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super_secret_key"));
    }
}
