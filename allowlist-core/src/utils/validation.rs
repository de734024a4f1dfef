//! Host, domain and port validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{CoreError, CoreResult};

/// Dotted quad, each octet 0–255.
static IPV4_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)\.){3}(?:25[0-5]|2[0-4][0-9]|[01]?[0-9][0-9]?)$",
    )
    .ok()
});

/// Dot-separated labels of 1–63 alphanumerics/hyphens, no hyphen at either end.
static HOSTNAME_RE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .ok()
});

fn is_match(re: &LazyLock<Option<Regex>>, value: &str) -> bool {
    re.as_ref().is_some_and(|re| re.is_match(value))
}

/// `true` for a dotted-quad IPv4 address.
pub fn is_valid_ipv4(value: &str) -> bool {
    is_match(&IPV4_RE, value)
}

/// `true` for an RFC-1035-like hostname.
pub fn is_valid_hostname(value: &str) -> bool {
    is_match(&HOSTNAME_RE, value)
}

/// `true` for anything usable as a server host or allow-list entry.
pub fn is_valid_host(value: &str) -> bool {
    is_valid_ipv4(value) || is_valid_hostname(value)
}

/// `true` for an integer in 1–65535.
pub fn is_valid_port(value: &str) -> bool {
    port_number(value).is_some()
}

fn port_number(value: &str) -> Option<u16> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u16>().ok().filter(|p| *p >= 1)
}

/// Validate a server host field (already trimmed).
pub fn validate_host(host: &str) -> CoreResult<()> {
    if host.is_empty() {
        return Err(CoreError::ValidationError(
            "Enter the server address".to_string(),
        ));
    }
    if !is_valid_host(host) {
        return Err(CoreError::ValidationError(format!(
            "'{host}' is not a valid IP address or domain name"
        )));
    }
    Ok(())
}

/// Parse an optional port field (already trimmed). Empty means "no port".
pub fn parse_port(port: &str) -> CoreResult<Option<u16>> {
    if port.is_empty() {
        return Ok(None);
    }
    port_number(port).map(Some).ok_or_else(|| {
        CoreError::ValidationError(format!("Invalid port '{port}' (expected 1-65535)"))
    })
}
