//! Business logic service layer

mod command_dispatcher;
mod popup_session;
mod presenter;
mod settings_service;
mod storage;
mod synchronizer;

pub use command_dispatcher::CommandDispatcher;
pub use popup_session::PopupSession;
pub use presenter::Presenter;
pub use settings_service::SettingsService;
pub use storage::{AllowlistStorage, CACHE_TIMESTAMP_KEY, DOMAIN_CACHE_KEY, SETTINGS_KEY};
pub use synchronizer::DomainListSynchronizer;

use std::sync::Arc;

use allowlist_client::ServerAddress;

use crate::error::CoreError;
use crate::traits::{AllowlistServer, Clock, KeyValueStore};

/// Service context - holds all dependencies
///
/// The platform layer creates this once and injects its store, server client
/// and clock.
pub struct ServiceContext {
    store: Arc<dyn KeyValueStore>,
    server: Arc<dyn AllowlistServer>,
    clock: Arc<dyn Clock>,
}

impl ServiceContext {
    /// Create the service context
    #[must_use]
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        server: Arc<dyn AllowlistServer>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            server,
            clock,
        }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn KeyValueStore> {
        &self.store
    }

    #[must_use]
    pub fn server(&self) -> &Arc<dyn AllowlistServer> {
        &self.server
    }

    #[must_use]
    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Typed view over the store
    #[must_use]
    pub fn storage(&self) -> AllowlistStorage {
        AllowlistStorage::new(Arc::clone(&self.store))
    }
}

/// Status line for a failed server call.
pub(crate) fn connection_failure_message(address: &ServerAddress, err: &CoreError) -> String {
    format!("Network problem talking to server {address}: {err}")
}
