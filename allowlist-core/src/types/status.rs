use serde::{Deserialize, Serialize};

/// Kind of a status line, drives colouring in the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
    Loading,
    Info,
}

/// How a list request was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Persisted list was fresh; no network call.
    FromCache,
    /// In-memory list was fresh on a non-forced refresh; no network call.
    UpToDate,
    /// List fetched from the server.
    Refreshed { forced: bool },
}

/// Result of a connectivity check from the settings page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionReport {
    /// Server answered 2xx.
    Reachable,
    /// Server answered with another status.
    Unavailable { status: u16 },
}
