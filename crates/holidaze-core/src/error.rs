//! Error types for the Holidaze client toolkit.

use thiserror::Error;

/// A shared error type for the entire toolkit.
///
/// Remote failures are split into two kinds so callers can decide retry
/// policy per kind: `Network` (transport never reached an answer) and
/// `Rejected` (the service answered with a non-2xx status). The operation
/// variants (`Authentication`, `Registration`, `ProfileUpdate`) carry the
/// server-supplied message verbatim so the UI can surface it unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HolidazeError {
    /// A local validation rule rejected the input before any network call
    #[error("{0}")]
    Validation(String),

    /// Login was rejected by the service
    #[error("{0}")]
    Authentication(String),

    /// Registration was rejected by the service
    #[error("{0}")]
    Registration(String),

    /// Avatar update was rejected by the service
    #[error("{0}")]
    ProfileUpdate(String),

    /// The service answered with a non-2xx status
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The request never produced a response (connect/timeout/transport)
    #[error("network error: {message}")]
    Network { message: String, retryable: bool },

    /// The operation was aborted before completion
    #[error("operation cancelled")]
    Cancelled,

    /// Entity not found with type information
    #[error("entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("internal error: {0}")]
    Internal(String),
}

impl HolidazeError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a local validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this error originated from the remote service or transport
    pub fn is_remote(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Network { .. })
    }

    /// Check if retrying the operation could plausibly succeed.
    ///
    /// Transport faults are retryable when the connection or timeout failed;
    /// service rejections only for throttling and 5xx statuses. Nothing in
    /// this toolkit retries automatically, callers own that policy.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { retryable, .. } => *retryable,
            Self::Rejected { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            _ => false,
        }
    }
}

impl From<std::io::Error> for HolidazeError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for HolidazeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for HolidazeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for HolidazeError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (infrastructure store boundaries)
impl From<anyhow::Error> for HolidazeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, HolidazeError>`.
pub type Result<T> = std::result::Result<T, HolidazeError>;
