use allowlist_client::ServerAddress;
use serde::{Deserialize, Deserializer, Serialize};

/// Server used until settings are saved.
pub const DEFAULT_SERVER_HOST: &str = "192.168.10.1";

/// Persisted server settings (`serverSettings` key).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    /// IPv4 address or hostname; never empty once saved.
    #[serde(alias = "url")]
    pub host: String,
    /// Optional port, 1–65535.
    #[serde(default, deserialize_with = "deserialize_port")]
    pub port: Option<u16>,
}

impl ServerSettings {
    pub fn new(host: impl Into<String>, port: Option<u16>) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// Address the client should talk to.
    pub fn address(&self) -> ServerAddress {
        ServerAddress::new(self.host.clone(), self.port)
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_HOST, None)
    }
}

/// Settings as shown by the settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedSettings {
    pub settings: ServerSettings,
    /// `true` when nothing was persisted and defaults are shown.
    pub is_default: bool,
}

/// Accepts a number, a numeric string, an empty string or `null`.
///
/// Older stores kept the port as the raw form string.
fn deserialize_port<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum PortValue {
        Number(u16),
        Text(String),
    }

    match Option::<PortValue>::deserialize(deserializer)? {
        None => Ok(None),
        Some(PortValue::Number(0)) => Err(Error::custom("port must be 1-65535")),
        Some(PortValue::Number(p)) => Ok(Some(p)),
        Some(PortValue::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(PortValue::Text(s)) => s
            .trim()
            .parse::<u16>()
            .ok()
            .filter(|p| *p >= 1)
            .map(Some)
            .ok_or_else(|| Error::custom(format!("invalid port '{s}'"))),
    }
}
