use async_trait::async_trait;

use crate::error::Result;
use crate::types::{CommandAction, ServerAddress};

/// Remote allow-list server.
///
/// The target address is passed on every call: it is resolved from the
/// persisted settings each time, so a settings change takes effect on the
/// next request without rebuilding the client.
#[async_trait]
pub trait AllowlistServer: Send + Sync {
    /// Fetch the full allow-list in server order.
    async fn list_domains(&self, address: &ServerAddress) -> Result<Vec<String>>;

    /// Send an add/remove command and return the server's confirmation text.
    async fn send_command(
        &self,
        address: &ServerAddress,
        action: CommandAction,
        domain: &str,
    ) -> Result<String>;

    /// Connectivity check: issue a list request and return the HTTP status
    /// without interpreting it.
    async fn probe(&self, address: &ServerAddress) -> Result<u16>;
}
