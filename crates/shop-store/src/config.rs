//! Service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `SHOP_ENV` - Profile: `development`, `production` or `test` (default: development)
//! - `SHOP_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOP_PORT` - Listen port (default: 8080)
//! - `SHOP_PRODUCTS_FILE` - Product collection file (default: data/products.json)
//! - `SHOP_CARTS_FILE` - Cart collection file (default: data/carts.json)
//! - `SHOP_CHANNEL_CAPACITY` - Mailbox size of each actor (default: 32)
//!
//! A `.env` file in the working directory is loaded first when present.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_CHANNEL_CAPACITY: usize = 32;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Deployment profile. Selects the default log level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    /// The `tracing` directive used when `RUST_LOG` is not set.
    pub fn default_log_directive(self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Production => "error",
            Environment::Test => "error",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "production" | "prod" => Ok(Environment::Production),
            "test" => Ok(Environment::Test),
            other => Err(format!("unknown environment {other:?}")),
        }
    }
}

/// Store application configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub environment: Environment,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    pub products_file: PathBuf,
    pub carts_file: PathBuf,
    /// Capacity of each actor's request channel
    pub channel_capacity: usize,
}

impl StoreConfig {
    /// Builds a configuration around the two collection files, with defaults for
    /// everything else.
    pub fn new(products_file: impl Into<PathBuf>, carts_file: impl Into<PathBuf>) -> Self {
        Self {
            environment: Environment::Development,
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            products_file: products_file.into(),
            carts_file: carts_file.into(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set to a value that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::new("data/products.json", "data/carts.json");

        let channel_capacity = parse_or(&lookup, "SHOP_CHANNEL_CAPACITY", defaults.channel_capacity)?;
        if channel_capacity == 0 {
            return Err(ConfigError::InvalidEnvVar(
                "SHOP_CHANNEL_CAPACITY".to_string(),
                "must be at least 1".to_string(),
            ));
        }

        Ok(Self {
            environment: parse_or(&lookup, "SHOP_ENV", defaults.environment)?,
            host: parse_or(&lookup, "SHOP_HOST", defaults.host)?,
            port: parse_or(&lookup, "SHOP_PORT", defaults.port)?,
            products_file: lookup("SHOP_PRODUCTS_FILE")
                .map_or(defaults.products_file, PathBuf::from),
            carts_file: lookup("SHOP_CARTS_FILE").map_or(defaults.carts_file, PathBuf::from),
            channel_capacity,
        })
    }

    /// Returns the socket address to bind to.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<StoreConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        StoreConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:8080");
        assert_eq!(config.products_file, PathBuf::from("data/products.json"));
        assert_eq!(config.carts_file, PathBuf::from("data/carts.json"));
        assert_eq!(config.channel_capacity, 32);
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            ("SHOP_ENV", "production"),
            ("SHOP_HOST", "0.0.0.0"),
            ("SHOP_PORT", "9000"),
            ("SHOP_PRODUCTS_FILE", "/tmp/p.json"),
            ("SHOP_CHANNEL_CAPACITY", "4"),
        ])
        .unwrap();
        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.socket_addr().to_string(), "0.0.0.0:9000");
        assert_eq!(config.products_file, PathBuf::from("/tmp/p.json"));
        assert_eq!(config.channel_capacity, 4);
    }

    #[test]
    fn test_invalid_values_name_the_variable() {
        let err = load(&[("SHOP_PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("SHOP_PORT"));

        let err = load(&[("SHOP_CHANNEL_CAPACITY", "0")]).unwrap_err();
        assert!(err.to_string().contains("SHOP_CHANNEL_CAPACITY"));

        assert!(load(&[("SHOP_ENV", "staging")]).is_err());
    }

    #[test]
    fn test_log_directive_per_environment() {
        assert_eq!(Environment::Development.default_log_directive(), "debug");
        assert_eq!(Environment::Production.default_log_directive(), "error");
        assert_eq!(Environment::Test.default_log_directive(), "error");
    }
}
