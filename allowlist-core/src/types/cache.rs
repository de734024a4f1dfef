/// Staleness window for the cached list: one hour.
pub const CACHE_DURATION_MS: i64 = 60 * 60 * 1000;

/// In-memory copy of the allow-list as last seen by this session.
///
/// `domains == None` means the list was never loaded in this session and
/// nothing was found in storage; optimistic updates do not create a list out
/// of nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedDomainList {
    pub domains: Option<Vec<String>>,
    /// Unix milliseconds of the last full fetch.
    pub fetched_at: Option<i64>,
}

impl CachedDomainList {
    pub fn new(domains: Vec<String>, fetched_at: i64) -> Self {
        Self {
            domains: Some(domains),
            fetched_at: Some(fetched_at),
        }
    }

    /// `true` when a list and a timestamp exist and the timestamp is within
    /// `window_ms` of `now`.
    pub fn is_fresh(&self, now: i64, window_ms: i64) -> bool {
        self.domains.is_some() && is_timestamp_fresh(self.fetched_at, now, window_ms)
    }

    /// Domains to render; empty when never loaded.
    pub fn as_slice(&self) -> &[String] {
        self.domains.as_deref().unwrap_or_default()
    }

    pub fn contains(&self, domain: &str) -> bool {
        self.as_slice().iter().any(|d| d == domain)
    }

    /// Append `domain` unless already present. Returns `true` if the list
    /// changed. A never-loaded list is left alone.
    pub fn append_if_absent(&mut self, domain: &str) -> bool {
        match self.domains.as_mut() {
            Some(list) if !list.iter().any(|d| d == domain) => {
                list.push(domain.to_string());
                true
            }
            _ => false,
        }
    }

    /// Drop every occurrence of `domain`. Returns `true` if the list changed.
    pub fn remove(&mut self, domain: &str) -> bool {
        match self.domains.as_mut() {
            Some(list) => {
                let before = list.len();
                list.retain(|d| d != domain);
                list.len() != before
            }
            None => false,
        }
    }
}

/// Shared staleness rule for persisted and in-memory timestamps.
fn is_timestamp_fresh(fetched_at: Option<i64>, now: i64, window_ms: i64) -> bool {
    fetched_at.is_some_and(|ts| now - ts < window_ms)
}
