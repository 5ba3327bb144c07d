//! Authentication seam and registration rules.
//!
//! `AuthApi` is the narrow interface through which the session manager talks
//! to the remote service, so tests can substitute a mock without any HTTP.

use crate::error::{HolidazeError, Result};
use crate::session::Session;
use crate::venue::Media;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Email domain required for registration.
const REQUIRED_EMAIL_SUFFIX: &str = "stud.noroff.no";

/// Minimum password length accepted at registration.
const MIN_PASSWORD_LEN: usize = 8;

/// The authentication operations of the remote service.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for an authenticated session record.
    async fn login(&self, email: &str, password: &str) -> Result<Session>;

    /// Creates an account. Registration alone yields no token; callers log
    /// in afterwards to obtain one.
    async fn register(&self, registration: &Registration) -> Result<()>;

    /// Replaces the avatar on the given profile, returning the stored media.
    async fn update_avatar(&self, profile_name: &str, url: &str) -> Result<Media>;
}

/// A validated registration request, ready for the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub venue_manager: bool,
}

/// Raw registration form input, validated locally before any network call.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub venue_manager: bool,
}

impl RegistrationForm {
    /// Applies the local registration rules in order and produces the wire
    /// request. Any violation fails before registration reaches the
    /// gateway.
    pub fn validate(&self) -> Result<Registration> {
        if self.password != self.confirm_password {
            return Err(HolidazeError::validation("Passwords do not match"));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(HolidazeError::validation(
                "Password must be at least 8 characters",
            ));
        }
        if !self.email.ends_with(REQUIRED_EMAIL_SUFFIX) {
            return Err(HolidazeError::validation(
                "Only stud.noroff.no email addresses are allowed",
            ));
        }

        Ok(Registration {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            venue_manager: self.venue_manager,
        })
    }
}
