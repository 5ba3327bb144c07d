//! Secret storage for the service API key.
//!
//! The remote service requires a per-deployment API key on every call. The
//! key is deployment configuration: it lives in `secret.toml` under the
//! config directory (or an environment variable, handled by the gateway
//! config) and never appears as a source literal.

use crate::paths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SECRET_FILE: &str = "secret.toml";

/// Credentials for the remote booking service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSecret {
    /// Per-deployment service API key
    pub api_key: String,
    /// Optional override of the service base URL
    #[serde(default)]
    pub base_url: Option<String>,
}

/// Reads and writes `secret.toml`.
pub struct SecretStorage {
    path: PathBuf,
}

impl SecretStorage {
    /// Creates a storage at an explicit file path.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a storage at the default location
    /// (`~/.config/holidaze/secret.toml`).
    pub fn default_location() -> Result<Self> {
        Ok(Self::new(paths::config_dir()?.join(SECRET_FILE)))
    }

    /// Loads the secret file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ApiSecret))`: file present and parsed
    /// - `Ok(None)`: no secret file at this location
    /// - `Err(_)`: file present but unreadable or malformed
    pub fn load(&self) -> Result<Option<ApiSecret>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read secret file: {:?}", self.path))?;
        let secret = toml::from_str(&content)
            .with_context(|| format!("failed to parse secret file: {:?}", self.path))?;

        Ok(Some(secret))
    }

    /// Writes the secret file, creating the config directory if needed.
    pub fn save(&self, secret: &ApiSecret) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create config directory: {parent:?}"))?;
        }

        let content =
            toml::to_string_pretty(secret).context("failed to serialize secret to TOML")?;
        fs::write(&self.path, content)
            .with_context(|| format!("failed to write secret file: {:?}", self.path))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn save_and_load_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = SecretStorage::new(dir.path().join("secret.toml"));

        assert!(storage.load().unwrap().is_none());

        storage
            .save(&ApiSecret {
                api_key: "key-123".into(),
                base_url: None,
            })
            .unwrap();

        let secret = storage.load().unwrap().unwrap();
        assert_eq!(secret.api_key, "key-123");
        assert!(secret.base_url.is_none());
    }

    #[test]
    fn malformed_file_is_an_error_not_none() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.toml");
        std::fs::write(&path, "api_key = [not toml").unwrap();

        assert!(SecretStorage::new(&path).load().is_err());
    }
}
