//! Server settings service

use std::sync::Arc;

use allowlist_client::ServerAddress;

use crate::error::CoreResult;
use crate::services::ServiceContext;
use crate::types::{ConnectionReport, LoadedSettings, ServerSettings};
use crate::utils::validation::{parse_port, validate_host};

/// Server settings service
///
/// Changing the server invalidates the cached list: a list fetched from one
/// server says nothing about another.
pub struct SettingsService {
    ctx: Arc<ServiceContext>,
}

impl SettingsService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// Persisted settings, or the defaults.
    pub async fn load(&self) -> LoadedSettings {
        match self.ctx.storage().load_settings().await {
            Some(settings) => LoadedSettings {
                settings,
                is_default: false,
            },
            None => LoadedSettings {
                settings: ServerSettings::default(),
                is_default: true,
            },
        }
    }

    /// Address for the next request.
    pub async fn resolve(&self) -> ServerAddress {
        self.load().await.settings.address()
    }

    /// Validate and persist new settings, then drop the cached list.
    ///
    /// Nothing is written when validation fails.
    pub async fn save(&self, host: &str, port: &str) -> CoreResult<ServerSettings> {
        let settings = Self::validate(host, port)?;
        let storage = self.ctx.storage();

        storage.save_settings(&settings).await?;
        storage.clear_domain_cache().await?;

        log::info!("Server settings saved: {}", settings.address());
        Ok(settings)
    }

    /// Forget settings and the cached list.
    ///
    /// Also the way out of an unreadable store: nothing is read first.
    pub async fn reset(&self) -> CoreResult<()> {
        self.ctx.storage().clear_all().await?;
        log::info!("Server settings reset to defaults");
        Ok(())
    }

    /// Check that a server answers on the given (unsaved) host/port.
    ///
    /// Nothing is persisted. Transport failures come back as `Err`; any HTTP
    /// answer is a report.
    pub async fn test_connection(&self, host: &str, port: &str) -> CoreResult<ConnectionReport> {
        let address = Self::validate(host, port)?.address();
        let status = self.ctx.server().probe(&address).await?;

        if (200..300).contains(&status) {
            log::info!("Connection check against {address} succeeded");
            Ok(ConnectionReport::Reachable)
        } else {
            log::warn!("Connection check against {address} got HTTP {status}");
            Ok(ConnectionReport::Unavailable { status })
        }
    }

    fn validate(host: &str, port: &str) -> CoreResult<ServerSettings> {
        let host = host.trim();
        validate_host(host)?;
        let port = parse_port(port.trim())?;
        Ok(ServerSettings::new(host, port))
    }
}
