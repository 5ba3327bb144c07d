//! Session store trait.
//!
//! Defines the interface for session persistence across restarts,
//! decoupling the session manager from the storage mechanism.

use super::model::Session;
use anyhow::Result;
use async_trait::async_trait;

/// An abstract store for the single persisted session.
///
/// Implementations should handle schema versioning and migration of the
/// persisted record. There is exactly one writer (the session manager), so
/// no coordination between concurrent writers is required.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the persisted session.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: a session was persisted by a prior login
    /// - `Ok(None)`: no persisted session, the user is anonymous
    /// - `Err(_)`: the store exists but could not be read
    async fn load(&self) -> Result<Option<Session>>;

    /// Persists the session, replacing any previous record.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Removes the persisted session and token. Succeeds when nothing was
    /// persisted.
    async fn clear(&self) -> Result<()>;
}
