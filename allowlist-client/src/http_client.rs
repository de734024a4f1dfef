//! Shared HTTP plumbing
//!
//! Sends a prepared `RequestBuilder`, logs the exchange and maps transport
//! failures onto [`ClientError`]. Status interpretation is left to callers:
//! the list/command paths treat non-2xx as an error, the connectivity probe
//! only wants the code.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};

use crate::error::ClientError;

/// Connect timeout for every request.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Maximum number of characters of a response body written to the log.
const LOG_BODY_LIMIT: usize = 256;

/// Build the `reqwest` client used for the control endpoint.
pub(crate) fn create_http_client(request_timeout: Duration) -> Result<Client, ClientError> {
    // The control endpoint lives on the local network; never route it through
    // an environment proxy.
    Client::builder()
        .no_proxy()
        .connect_timeout(CONNECT_TIMEOUT.min(request_timeout))
        .timeout(request_timeout)
        .build()
        .map_err(|e| ClientError::NetworkError {
            server: String::new(),
            detail: format!("Failed to create HTTP client: {e}"),
        })
}

/// HTTP helper functions
pub(crate) struct HttpUtils;

impl HttpUtils {
    /// Sends the request and returns `(status_code, body)`.
    ///
    /// # Arguments
    /// * `request_builder` - fully configured request
    /// * `server` - `host[:port]`, used for logs and error context
    /// * `action` - endpoint action, used for logs
    /// * `timeout` - limit in force for this request, reported on timeout
    pub async fn execute_request(
        request_builder: RequestBuilder,
        server: &str,
        action: &str,
        timeout: Duration,
    ) -> Result<(u16, String), ClientError> {
        log::debug!("[{server}] GET action={action}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| Self::transport_error(&e, server, timeout))?;

        let status_code = response.status().as_u16();
        log::debug!("[{server}] Response Status: {status_code}");

        let body = response
            .text()
            .await
            .map_err(|e| Self::transport_error(&e, server, timeout))?;

        log::debug!("[{server}] Response Body: {}", truncate_for_log(&body));

        Ok((status_code, body))
    }

    fn transport_error(e: &reqwest::Error, server: &str, timeout: Duration) -> ClientError {
        if e.is_timeout() {
            ClientError::Timeout {
                server: server.to_string(),
                timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            }
        } else if e.is_builder() {
            ClientError::InvalidAddress {
                server: server.to_string(),
                detail: e.to_string(),
            }
        } else {
            ClientError::NetworkError {
                server: server.to_string(),
                detail: e.to_string(),
            }
        }
    }
}

/// Truncate a response body for logging, keeping char boundaries intact.
fn truncate_for_log(s: &str) -> String {
    let total = s.chars().count();
    if total <= LOG_BODY_LIMIT {
        s.to_string()
    } else {
        let head: String = s.chars().take(LOG_BODY_LIMIT).collect();
        format!("{head}... [truncated, {total} chars]")
    }
}
