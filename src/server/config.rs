//! Environment-driven server configuration.

use std::{net::SocketAddr, path::PathBuf};

use crate::server::error::config::ConfigError;

static DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:8080";
static DEFAULT_OUTPUT_DIR: &str = "output_files";

/// Runtime configuration read from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection string, `postgres://...` or `sqlite://...`
    pub database_url: String,
    /// Address the HTTP server listens on
    pub bind_address: SocketAddr,
    /// Root of the per-work output folders holding Excel masterfiles
    pub output_dir: PathBuf,
    /// Whether session cookies are flagged `Secure`
    pub secure_cookies: bool,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// `.env` files should be loaded with `dotenvy` before calling this.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// # Returns
    /// - `Ok(Config)` - All required variables present and valid
    /// - `Err(ConfigError::MissingEnvVar)` - `DATABASE_URL` is not set
    /// - `Err(ConfigError::InvalidEnvValue)` - `BIND_ADDRESS` or `SECURE_COOKIES` failed to parse
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string())
            .parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: "BIND_ADDRESS".to_string(),
                reason: e.to_string(),
            })?;

        let output_dir = lookup("OUTPUT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR));

        // Development builds serve over plain HTTP
        let secure_cookies = match lookup("SECURE_COOKIES") {
            Some(value) => value
                .parse::<bool>()
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: "SECURE_COOKIES".to_string(),
                    reason: e.to_string(),
                })?,
            None => !cfg!(debug_assertions),
        };

        Ok(Self {
            database_url,
            bind_address,
            output_dir,
            secure_cookies,
        })
    }
}
