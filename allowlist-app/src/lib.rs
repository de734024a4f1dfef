//! Application bootstrap for the domain allow-list keeper.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (adapter
//! injection) and `StoreBackend` (the one store chosen at startup).

pub mod adapters;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use allowlist_client::{CgiAllowlistClient, DEFAULT_REQUEST_TIMEOUT};
use allowlist_core::error::{CoreError, CoreResult};
use allowlist_core::services::{PopupSession, ServiceContext, SettingsService};
use allowlist_core::traits::{
    AllowlistServer, Clock, InMemoryKeyValueStore, KeyValueStore, PopupView, SystemClock,
};
use allowlist_core::types::CACHE_DURATION_MS;

use crate::adapters::JsonFileStore;

const CONFIG_DIR_NAME: &str = "allowlist-keeper";
const STORE_FILE_NAME: &str = "storage.json";

/// Default store file: `<config dir>/allowlist-keeper/storage.json`, or
/// relative to the working directory when no config dir is known.
pub fn default_store_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
        .join(STORE_FILE_NAME)
}

/// Where persisted state lives for this process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    /// One JSON document on disk
    File(PathBuf),
    /// Nothing persisted beyond the process
    Memory,
}

impl StoreBackend {
    pub fn into_store(self) -> Arc<dyn KeyValueStore> {
        match self {
            Self::File(path) => {
                log::debug!("Using JSON file store at {}", path.display());
                Arc::new(JsonFileStore::new(path))
            }
            Self::Memory => {
                log::debug!("Using in-memory store");
                Arc::new(InMemoryKeyValueStore::new())
            }
        }
    }
}

impl Default for StoreBackend {
    fn default() -> Self {
        Self::File(default_store_path())
    }
}

/// Application state.
///
/// Built once at startup; each view gets its own `PopupSession`.
pub struct AppState {
    /// Service context (store, server client, clock)
    pub ctx: Arc<ServiceContext>,
    /// Settings service
    pub settings_service: SettingsService,
    cache_duration_ms: i64,
}

impl AppState {
    /// Start a session for a freshly opened view.
    pub fn open_session(&self, view: Arc<dyn PopupView>) -> PopupSession {
        PopupSession::new(Arc::clone(&self.ctx), view).with_cache_duration(self.cache_duration_ms)
    }

    pub fn cache_duration_ms(&self) -> i64 {
        self.cache_duration_ms
    }
}

/// Builder for `AppState`.
///
/// # Required
/// - `store` (or `store_backend`)
///
/// # Optional
/// - `server`: defaults to `CgiAllowlistClient` with `request_timeout`
/// - `clock`: defaults to `SystemClock`
/// - `cache_duration_ms`: defaults to one hour
pub struct AppStateBuilder {
    store: Option<Arc<dyn KeyValueStore>>,
    server: Option<Arc<dyn AllowlistServer>>,
    clock: Option<Arc<dyn Clock>>,
    request_timeout: Duration,
    cache_duration_ms: i64,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: None,
            server: None,
            clock: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            cache_duration_ms: CACHE_DURATION_MS,
        }
    }

    #[must_use]
    pub fn store(mut self, store: Arc<dyn KeyValueStore>) -> Self {
        self.store = Some(store);
        self
    }

    #[must_use]
    pub fn store_backend(self, backend: StoreBackend) -> Self {
        self.store(backend.into_store())
    }

    #[must_use]
    pub fn server(mut self, server: Arc<dyn AllowlistServer>) -> Self {
        self.server = Some(server);
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Request timeout for the default server client. Ignored when a server
    /// is injected.
    #[must_use]
    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    #[must_use]
    pub fn cache_duration_ms(mut self, cache_duration_ms: i64) -> Self {
        self.cache_duration_ms = cache_duration_ms;
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if no store was given or the
    /// cache duration is not positive.
    pub fn build(self) -> CoreResult<AppState> {
        let store = self
            .store
            .ok_or_else(|| CoreError::ValidationError("store is required".to_string()))?;
        if self.cache_duration_ms <= 0 {
            return Err(CoreError::ValidationError(format!(
                "cache duration must be positive, got {} ms",
                self.cache_duration_ms
            )));
        }

        let request_timeout = self.request_timeout;
        let server = self
            .server
            .unwrap_or_else(|| Arc::new(CgiAllowlistClient::with_timeout(request_timeout)));
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));

        let ctx = Arc::new(ServiceContext::new(store, server, clock));
        let settings_service = SettingsService::new(Arc::clone(&ctx));

        Ok(AppState {
            ctx,
            settings_service,
            cache_duration_ms: self.cache_duration_ms,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
