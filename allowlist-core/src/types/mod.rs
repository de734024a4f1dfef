//! Type definition module

mod cache;
mod domain;
mod settings;
mod status;

pub use cache::{CachedDomainList, CACHE_DURATION_MS};
pub use domain::Domain;
pub use settings::{LoadedSettings, ServerSettings, DEFAULT_SERVER_HOST};
pub use status::{ConnectionReport, StatusKind, SyncOutcome};

// Re-export client types
pub use allowlist_client::{CommandAction, ServerAddress};
