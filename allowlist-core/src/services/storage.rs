//! Typed access to the persisted keys

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::traits::KeyValueStore;
use crate::types::{CachedDomainList, ServerSettings};

/// Server settings key
pub const SETTINGS_KEY: &str = "serverSettings";
/// Cached domain list key
pub const DOMAIN_CACHE_KEY: &str = "domainCache";
/// Cache timestamp key (Unix milliseconds)
pub const CACHE_TIMESTAMP_KEY: &str = "cacheTimestamp";

/// Typed wrapper over the [`KeyValueStore`].
///
/// Reads never fail: a storage or decoding error is logged and read as "no
/// value". Writes surface `StorageError`/`SerializationError`.
#[derive(Clone)]
pub struct AllowlistStorage {
    store: Arc<dyn KeyValueStore>,
}

impl AllowlistStorage {
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    async fn read<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = match self.store.get(key).await {
            Ok(value) => value?,
            Err(e) => {
                log::error!("Failed to read '{key}' from storage: {e}");
                return None;
            }
        };
        match serde_json::from_value(value) {
            Ok(v) => Some(v),
            Err(e) => {
                log::warn!("Ignoring malformed '{key}' in storage: {e}");
                None
            }
        }
    }

    async fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> CoreResult<()> {
        let value =
            serde_json::to_value(value).map_err(|e| CoreError::SerializationError(e.to_string()))?;
        self.store.set(key, value).await
    }

    pub async fn load_settings(&self) -> Option<ServerSettings> {
        self.read(SETTINGS_KEY).await
    }

    pub async fn save_settings(&self, settings: &ServerSettings) -> CoreResult<()> {
        self.write(SETTINGS_KEY, settings).await
    }

    /// Persisted list and timestamp, each independently optional.
    pub async fn load_domain_cache(&self) -> CachedDomainList {
        CachedDomainList {
            domains: self.read(DOMAIN_CACHE_KEY).await,
            fetched_at: self.read(CACHE_TIMESTAMP_KEY).await,
        }
    }

    pub async fn save_domains(&self, domains: &[String]) -> CoreResult<()> {
        self.write(DOMAIN_CACHE_KEY, domains).await
    }

    pub async fn save_timestamp(&self, fetched_at: i64) -> CoreResult<()> {
        self.write(CACHE_TIMESTAMP_KEY, &fetched_at).await
    }

    /// Drop settings and cache together, replacing whatever is stored even
    /// if it cannot be read.
    pub async fn clear_all(&self) -> CoreResult<()> {
        self.store.clear().await
    }

    /// Drop both the list and its timestamp.
    pub async fn clear_domain_cache(&self) -> CoreResult<()> {
        self.store.remove(DOMAIN_CACHE_KEY).await?;
        self.store.remove(CACHE_TIMESTAMP_KEY).await
    }
}
