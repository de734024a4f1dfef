use std::fmt;

use serde::{Deserialize, Serialize};

/// Path of the control script on the managed device.
pub const CGI_PATH: &str = "/cgi-bin/update_domain.sh";

/// Address of the allow-list server, rendered as `host` or `host:port`.
///
/// The scheme is always plain HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServerAddress {
    /// IPv4 address or hostname.
    pub host: String,
    /// Optional TCP port; the HTTP default is used when absent.
    pub port: Option<u16>,
}

impl ServerAddress {
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `http://host[:port]`
    pub fn base_url(&self) -> String {
        format!("http://{self}")
    }

    /// Full control endpoint URL with the given (already encoded) query.
    pub fn endpoint(&self, query: &str) -> String {
        format!("{}{CGI_PATH}?{query}", self.base_url())
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.port {
            Some(port) => write!(f, "{}:{port}", self.host),
            None => f.write_str(&self.host),
        }
    }
}

/// Mutating commands understood by the control endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandAction {
    Add,
    Remove,
}

impl CommandAction {
    /// Value of the `action` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

impl fmt::Display for CommandAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
