//! Gateway configuration.
//!
//! The service API key is deployment configuration, never a source literal.
//! Priority: ~/.config/holidaze/secret.toml > environment variables.

use crate::gateway::DEFAULT_BASE_URL;
use holidaze_core::{HolidazeError, Result};
use holidaze_infrastructure::SecretStorage;
use std::env;

/// Environment variable holding the service API key.
pub const API_KEY_ENV: &str = "HOLIDAZE_API_KEY";

/// Environment variable overriding the service base URL.
pub const BASE_URL_ENV: &str = "HOLIDAZE_API_URL";

/// Connection settings for the remote booking service.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    pub base_url: String,
    pub api_key: String,
}

impl GatewayConfig {
    /// Creates a config against the default deployment of the service.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
        }
    }

    /// Overrides the base URL after construction.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Loads configuration from the secret file or environment variables.
    ///
    /// # Errors
    ///
    /// Returns a `Config` error when no API key can be found in either
    /// location, or when a secret file exists but cannot be parsed. A
    /// malformed file is never silently treated as an absent key.
    pub fn from_env() -> Result<Self> {
        if let Ok(storage) = SecretStorage::default_location() {
            if let Some(config) = Self::from_secret_file(&storage)? {
                return Ok(config);
            }
        }

        let api_key = env::var(API_KEY_ENV).map_err(|_| {
            HolidazeError::config(format!(
                "service API key not found in ~/.config/holidaze/secret.toml or ${API_KEY_ENV}"
            ))
        })?;

        let mut config = Self::new(api_key);
        if let Ok(base_url) = env::var(BASE_URL_ENV) {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }

    /// Loads configuration from an explicit secret file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(config))`: file present and parsed
    /// - `Ok(None)`: no file at this location
    /// - `Err(_)`: file present but unreadable or malformed
    pub fn from_secret_file(storage: &SecretStorage) -> Result<Option<Self>> {
        let secret = storage
            .load()
            .map_err(|err| HolidazeError::config(format!("failed to load secret file: {err:#}")))?;

        Ok(secret.map(|secret| {
            let mut config = Self::new(secret.api_key);
            if let Some(base_url) = secret.base_url {
                config = config.with_base_url(base_url);
            }
            config
        }))
    }
}
