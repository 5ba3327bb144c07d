//! The single code path for outbound calls to the booking service.

use crate::config::GatewayConfig;
use holidaze_core::{HolidazeError, Result, SharedToken};
use reqwest::{header, Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Default deployment of the booking service.
pub const DEFAULT_BASE_URL: &str = "https://v2.api.noroff.dev";

/// Per-deployment service key header required on every call.
const API_KEY_HEADER: &str = "X-Noroff-API-Key";

/// Surfaced when a rejection body carries no usable error message.
const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong";

/// HTTP gateway to the remote booking service.
///
/// Every outbound call goes through here: the gateway attaches the JSON
/// content type, the service API key, and a bearer header whenever the
/// shared token cell holds one. Responses are parsed as JSON regardless of
/// status; non-2xx statuses become `Rejected`, transport faults become
/// `Network`. The gateway itself never retries.
pub struct ApiGateway {
    client: Client,
    base_url: String,
    api_key: String,
    token: Arc<SharedToken>,
}

/// The `{ "data": ... }` envelope the service wraps payloads in.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    #[serde(default)]
    errors: Vec<ErrorEntry>,
}

#[derive(Deserialize)]
struct ErrorEntry {
    message: String,
}

impl ApiGateway {
    /// Creates a gateway reading bearer tokens from the given cell.
    pub fn new(config: GatewayConfig, token: Arc<SharedToken>) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
            api_key: config.api_key,
            token,
        }
    }

    /// Issues a request and parses the `data` envelope of a 2xx response.
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let (status, text) = self.dispatch(method, path, body).await?;
        if !status.is_success() {
            return Err(map_rejection(status, &text));
        }
        parse_envelope(&text)
    }

    /// Issues a request where the 2xx response body is irrelevant
    /// (deletions and other empty replies).
    pub async fn request_unit(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<()> {
        let (status, text) = self.dispatch(method, path, body).await?;
        if !status.is_success() {
            return Err(map_rejection(status, &text));
        }
        Ok(())
    }

    /// Convenience for authenticated/keyed GETs.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.request(Method::GET, path, None).await
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<(StatusCode, String)> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "dispatching request");

        let mut request = self
            .client
            .request(method, &url)
            .header(header::CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key);

        if let Some(token) = self.token.get() {
            request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        Ok((status, text))
    }
}

/// Runs a gateway call until it resolves or the token is cancelled,
/// whichever comes first. A cancelled call surfaces as `Cancelled` and the
/// underlying request is dropped, so a stale response can never update state
/// after its originating screen has gone away.
pub async fn abortable<T>(
    cancel: &CancellationToken,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        _ = cancel.cancelled() => Err(HolidazeError::Cancelled),
        result = fut => result,
    }
}

fn map_transport_error(err: reqwest::Error) -> HolidazeError {
    HolidazeError::Network {
        message: err.to_string(),
        retryable: err.is_connect() || err.is_timeout(),
    }
}

/// Normalizes a non-2xx response into `Rejected`, taking the first entry of
/// the body's `errors` array when present.
fn map_rejection(status: StatusCode, body: &str) -> HolidazeError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .ok()
        .and_then(|envelope| envelope.errors.into_iter().next())
        .map(|entry| entry.message)
        .unwrap_or_else(|| FALLBACK_ERROR_MESSAGE.to_string());

    HolidazeError::Rejected {
        status: status.as_u16(),
        message,
    }
}

fn parse_envelope<T: DeserializeOwned>(text: &str) -> Result<T> {
    let envelope: Envelope<T> = serde_json::from_str(text)?;
    Ok(envelope.data)
}
