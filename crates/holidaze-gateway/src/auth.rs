//! Live implementation of the authentication operations.

use crate::gateway::ApiGateway;
use async_trait::async_trait;
use holidaze_core::auth::{AuthApi, Registration};
use holidaze_core::{Media, Result, Session};
use reqwest::Method;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

const LOGIN_PATH: &str = "/auth/login?_holidaze=true";
const REGISTER_PATH: &str = "/auth/register?_holidaze=true";

/// Profile payload returned by an avatar update.
#[derive(Deserialize)]
struct ProfilePayload {
    #[serde(default)]
    avatar: Option<Media>,
}

#[async_trait]
impl AuthApi for ApiGateway {
    async fn login(&self, email: &str, password: &str) -> Result<Session> {
        debug!(email, "logging in");
        self.request(
            Method::POST,
            LOGIN_PATH,
            Some(json!({ "email": email, "password": password })),
        )
        .await
    }

    async fn register(&self, registration: &Registration) -> Result<()> {
        debug!(email = %registration.email, "registering account");
        let body = serde_json::to_value(registration)?;
        self.request_unit(Method::POST, REGISTER_PATH, Some(body))
            .await
    }

    async fn update_avatar(&self, profile_name: &str, url: &str) -> Result<Media> {
        let path = format!("/holidaze/profiles/{profile_name}");
        let body = json!({ "avatar": { "url": url, "alt": "" } });

        let profile: ProfilePayload = self.request(Method::PUT, &path, Some(body)).await?;
        Ok(profile.avatar.unwrap_or_else(|| Media::new(url)))
    }
}
