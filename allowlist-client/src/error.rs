use serde::{Deserialize, Serialize};

/// Error type for every call against the allow-list control endpoint.
///
/// Each variant records the `server` (`host[:port]`) it was talking to so that
/// callers can name it in user-facing messages. `Display` only renders the
/// detail; the server is left to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// Connection refused, DNS failure, broken body, etc.
    NetworkError {
        /// Server that was contacted.
        server: String,
        /// Error details.
        detail: String,
    },

    /// The request did not complete within the configured timeout.
    Timeout {
        /// Server that was contacted.
        server: String,
        /// Elapsed limit in milliseconds.
        timeout_ms: u64,
    },

    /// The server answered with a non-2xx status.
    ///
    /// The response body is the error message.
    ServerError {
        /// Server that was contacted.
        server: String,
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// The configured address cannot be turned into a request URL.
    InvalidAddress {
        /// Offending address.
        server: String,
        /// Error details.
        detail: String,
    },
}

impl ClientError {
    /// Address of the server the failed request targeted.
    pub fn server(&self) -> &str {
        match self {
            Self::NetworkError { server, .. }
            | Self::Timeout { server, .. }
            | Self::ServerError { server, .. }
            | Self::InvalidAddress { server, .. } => server,
        }
    }

    /// Whether this is expected behaviour (server said no, bad address),
    /// used for log classification.
    ///
    /// `true` should be logged at `warn`, `false` at `error`.
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::ServerError { .. } | Self::InvalidAddress { .. })
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { detail, .. } => write!(f, "Network error: {detail}"),
            Self::Timeout { timeout_ms, .. } => {
                write!(f, "Request timed out after {timeout_ms} ms")
            }
            Self::ServerError {
                status, message, ..
            } => {
                if message.trim().is_empty() {
                    write!(f, "HTTP {status}")
                } else {
                    write!(f, "HTTP {status}: {}", message.trim())
                }
            }
            Self::InvalidAddress { detail, .. } => write!(f, "Invalid server address: {detail}"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
