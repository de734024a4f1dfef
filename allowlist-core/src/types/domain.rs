use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::utils::validation::is_valid_host;

/// A validated allow-list entry: IPv4 dotted quad or hostname.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Domain(String);

impl Domain {
    /// Trim and validate user input.
    pub fn parse(input: &str) -> CoreResult<Self> {
        let value = input.trim();
        if value.is_empty() {
            return Err(CoreError::ValidationError(
                "Domain cannot be empty".to_string(),
            ));
        }
        if !is_valid_host(value) {
            return Err(CoreError::ValidationError(format!(
                "'{value}' is not a valid domain name or IP address"
            )));
        }
        Ok(Self(value.to_string()))
    }

    /// Hostname of a page URL, if it has one.
    pub fn from_page_url(page_url: &str) -> Option<Self> {
        let parsed = url::Url::parse(page_url).ok()?;
        let host = parsed.host_str()?;
        Self::parse(host).ok()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Domain {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
