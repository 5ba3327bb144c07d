//! Session domain model.
//!
//! The single record representing the currently authenticated user. A
//! session exists if and only if a non-empty access token was produced by a
//! prior login; absence of persisted data on startup means anonymous.

use crate::venue::Media;
use serde::{Deserialize, Serialize};

/// The authenticated-user record, kept in memory and mirrored to durable
/// storage by the session manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Display identifier, unique per account
    pub name: String,
    pub email: String,
    /// Grants access to management screens and disables booking for the
    /// same account
    #[serde(default)]
    pub venue_manager: bool,
    /// Opaque bearer credential; empty means unauthenticated
    pub access_token: String,
    /// Unset until explicitly updated from the profile screen
    #[serde(default)]
    pub avatar: Option<Media>,
}

impl Session {
    /// True when the session carries a usable bearer token.
    pub fn is_authenticated(&self) -> bool {
        !self.access_token.is_empty()
    }
}
