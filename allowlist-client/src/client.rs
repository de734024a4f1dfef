//! CGI control endpoint client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ClientError, Result};
use crate::http_client::{HttpUtils, create_http_client};
use crate::traits::AllowlistServer;
use crate::types::{CommandAction, ServerAddress};

/// Default limit for list and command requests.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Limit for the connectivity probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Client for `GET /cgi-bin/update_domain.sh`.
pub struct CgiAllowlistClient {
    client: Client,
    request_timeout: Duration,
}

impl CgiAllowlistClient {
    /// Client with [`DEFAULT_REQUEST_TIMEOUT`].
    pub fn new() -> Self {
        Self::with_timeout(DEFAULT_REQUEST_TIMEOUT)
    }

    /// Client with a custom request timeout.
    ///
    /// Falls back to a default `reqwest` client if the configured one cannot
    /// be built; the timeout is still applied per request.
    pub fn with_timeout(request_timeout: Duration) -> Self {
        let client = create_http_client(request_timeout).unwrap_or_else(|e| {
            log::error!("{e}, using default HTTP client");
            Client::new()
        });
        Self {
            client,
            request_timeout,
        }
    }

    async fn get(
        &self,
        address: &ServerAddress,
        action: &str,
        query: &str,
        timeout: Duration,
    ) -> Result<(u16, String)> {
        let url = address.endpoint(query);
        let request = self.client.get(&url).timeout(timeout);
        HttpUtils::execute_request(request, &address.to_string(), action, timeout).await
    }

    /// Non-2xx responses carry the error message in the body.
    fn ensure_success(address: &ServerAddress, status: u16, body: String) -> Result<String> {
        if (200..300).contains(&status) {
            Ok(body)
        } else {
            Err(ClientError::ServerError {
                server: address.to_string(),
                status,
                message: body,
            })
        }
    }
}

impl Default for CgiAllowlistClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AllowlistServer for CgiAllowlistClient {
    async fn list_domains(&self, address: &ServerAddress) -> Result<Vec<String>> {
        let (status, body) = self
            .get(address, "list", "action=list", self.request_timeout)
            .await?;
        let body = Self::ensure_success(address, status, body)?;
        Ok(parse_domain_list(&body))
    }

    async fn send_command(
        &self,
        address: &ServerAddress,
        action: CommandAction,
        domain: &str,
    ) -> Result<String> {
        let query = format!(
            "action={}&domain={}",
            action.as_str(),
            urlencoding::encode(domain)
        );
        let (status, body) = self
            .get(address, action.as_str(), &query, self.request_timeout)
            .await?;
        Self::ensure_success(address, status, body)
    }

    async fn probe(&self, address: &ServerAddress) -> Result<u16> {
        let timeout = PROBE_TIMEOUT.min(self.request_timeout);
        let (status, _) = self.get(address, "list", "action=list", timeout).await?;
        Ok(status)
    }
}

/// Split a list response into domains: one per line, surrounding whitespace
/// (including `\r`) trimmed, blank lines dropped, order kept.
pub fn parse_domain_list(body: &str) -> Vec<String> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToString::to_string)
        .collect()
}
