use thiserror::Error;

/// Failures reported by a [`RecordTransport`](crate::transport::RecordTransport).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// Network failure, unexpected status, or an unreadable response body.
    #[error("transport error: {reason}")]
    Transport { reason: String },
    #[error("user not found: {id}")]
    NotFound { id: String },
    /// The service refused the payload (any 4xx on create/update). The body is
    /// kept verbatim and is not mapped back onto form fields.
    #[error("request rejected ({status}): {body}")]
    ValidationRejected { status: u16, body: String },
}

impl ClientError {
    pub fn transport(reason: impl Into<String>) -> Self {
        Self::Transport {
            reason: reason.into(),
        }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::ValidationRejected {
            status,
            body: body.into(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::transport(err.to_string())
    }
}

/// Errors raised while loading or saving [`Config`](crate::config::Config).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Invalid API URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },
}
