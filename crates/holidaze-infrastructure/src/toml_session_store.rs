//! TOML-based SessionStore implementation.
//!
//! Two durable keys, mirroring what the interface needs at startup:
//! - `session.toml` — the schema-versioned session record
//! - `token.txt` — the raw bearer token, duplicated for convenience
//!
//! Loading falls back from the current schema to the legacy unversioned
//! shape (which stored the avatar as a bare URL string) and migrates it.

use crate::paths;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use holidaze_core::{Media, Session, SessionStore};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const SESSION_FILE: &str = "session.toml";
const TOKEN_FILE: &str = "token.txt";

/// Current persisted-session schema version.
pub const SESSION_SCHEMA_VERSION: &str = "1.0.0";

/// Persisted session record, schema V1.0.0.
#[derive(Debug, Serialize, Deserialize)]
struct SessionRecordV1 {
    schema_version: String,
    name: String,
    email: String,
    #[serde(default)]
    venue_manager: bool,
    access_token: String,
    #[serde(default)]
    avatar_url: Option<String>,
    #[serde(default)]
    avatar_alt: Option<String>,
}

/// Just the version field, read first to pick the parse path.
#[derive(Debug, Deserialize)]
struct RecordHeader {
    #[serde(default)]
    schema_version: Option<String>,
}

/// Pre-versioning record shape: no schema field, avatar as a bare URL.
#[derive(Debug, Deserialize)]
struct LegacySessionRecord {
    name: String,
    email: String,
    #[serde(default)]
    venue_manager: bool,
    access_token: String,
    #[serde(default)]
    avatar: Option<String>,
}

impl SessionRecordV1 {
    fn from_session(session: &Session) -> Self {
        Self {
            schema_version: SESSION_SCHEMA_VERSION.to_string(),
            name: session.name.clone(),
            email: session.email.clone(),
            venue_manager: session.venue_manager,
            access_token: session.access_token.clone(),
            avatar_url: session.avatar.as_ref().map(|media| media.url.clone()),
            avatar_alt: session.avatar.as_ref().and_then(|media| media.alt.clone()),
        }
    }

    fn into_session(self) -> Session {
        Session {
            name: self.name,
            email: self.email,
            venue_manager: self.venue_manager,
            access_token: self.access_token,
            avatar: self.avatar_url.map(|url| Media {
                url,
                alt: self.avatar_alt,
            }),
        }
    }
}

impl LegacySessionRecord {
    fn migrate(self) -> SessionRecordV1 {
        SessionRecordV1 {
            schema_version: SESSION_SCHEMA_VERSION.to_string(),
            name: self.name,
            email: self.email,
            venue_manager: self.venue_manager,
            access_token: self.access_token,
            avatar_url: self.avatar,
            avatar_alt: None,
        }
    }
}

/// Session store keeping its records in TOML files under a base directory.
pub struct TomlSessionStore {
    base_dir: PathBuf,
}

impl TomlSessionStore {
    /// Creates a store under the given directory, creating it if needed.
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("failed to create session directory: {base_dir:?}"))?;
        Ok(Self { base_dir })
    }

    /// Creates a store at the default location (`~/.config/holidaze`).
    pub fn default_location() -> Result<Self> {
        Self::new(paths::config_dir()?)
    }

    fn session_path(&self) -> PathBuf {
        self.base_dir.join(SESSION_FILE)
    }

    fn token_path(&self) -> PathBuf {
        self.base_dir.join(TOKEN_FILE)
    }

    // The version field decides the parse path up front; the legacy
    // fallback is only for records that carry no version at all. A record
    // claiming an unknown version is an error, never a silent downgrade.
    fn parse_record(&self, content: &str) -> Result<SessionRecordV1> {
        let header: RecordHeader = toml::from_str(content)
            .with_context(|| format!("failed to parse session file: {:?}", self.session_path()))?;

        match header.schema_version.as_deref() {
            Some(SESSION_SCHEMA_VERSION) => toml::from_str::<SessionRecordV1>(content)
                .with_context(|| {
                    format!("failed to parse session file: {:?}", self.session_path())
                }),
            Some(other) => Err(anyhow!(
                "unsupported session schema version {other:?} in {:?}",
                self.session_path()
            )),
            None => {
                let legacy: LegacySessionRecord =
                    toml::from_str(content).with_context(|| {
                        format!(
                            "failed to parse legacy session file: {:?}",
                            self.session_path()
                        )
                    })?;
                info!("migrating persisted session from legacy schema");
                Ok(legacy.migrate())
            }
        }
    }
}

#[async_trait]
impl SessionStore for TomlSessionStore {
    async fn load(&self) -> Result<Option<Session>> {
        let path = self.session_path();
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("failed to read session file: {path:?}"))?;
        let record = self.parse_record(&content)?;

        debug!(name = %record.name, "restored persisted session");
        Ok(Some(record.into_session()))
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let record = SessionRecordV1::from_session(session);
        let content =
            toml::to_string_pretty(&record).context("failed to serialize session to TOML")?;

        fs::write(self.session_path(), content)
            .with_context(|| format!("failed to write session file: {:?}", self.session_path()))?;
        fs::write(self.token_path(), &session.access_token)
            .with_context(|| format!("failed to write token file: {:?}", self.token_path()))?;

        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        for path in [self.session_path(), self.token_path()] {
            if path.exists() {
                fs::remove_file(&path)
                    .with_context(|| format!("failed to remove session file: {path:?}"))?;
            }
        }
        Ok(())
    }
}
