use thiserror::Error;

/// Errors returned by the dashboard and event-metrics clients.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    ///
    /// `detail` carries the backend's `{"detail": ...}` message when present.
    #[error("{url} returned HTTP {status}: {}", .detail.as_deref().unwrap_or("no detail"))]
    Status {
        status: u16,
        url: String,
        detail: Option<String>,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Rejected locally before any request was sent.
    #[error("{0}")]
    Validation(String),

    /// The event-metrics service answered 2xx but reported a failure status.
    #[error("event metrics service error: {0}")]
    Remote(String),

    #[error("request cancelled")]
    Cancelled,
}

impl ClientError {
    /// The backend's own explanation, if it sent one.
    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        match self {
            ClientError::Status { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClientError::Status { status: 404, .. })
    }
}

impl From<socialdash_core::CoreError> for ClientError {
    fn from(err: socialdash_core::CoreError) -> Self {
        ClientError::Validation(err.to_string())
    }
}
