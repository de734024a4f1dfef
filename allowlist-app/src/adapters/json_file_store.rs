//! Key/value store backed by a single JSON file
//!
//! The whole document is one JSON object keyed by storage key. It is read
//! lazily on first access and rewritten in full on every change, through a
//! sibling temp file renamed over the target.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use allowlist_core::traits::KeyValueStore;
use allowlist_core::{CoreError, CoreResult};
use serde_json::{Map, Value};
use tokio::fs;
use tokio::sync::Mutex;

type Entries = Map<String, Value>;

/// JSON file key/value store
pub struct JsonFileStore {
    path: PathBuf,
    /// In-memory copy of the file, `None` until first loaded
    cache: Mutex<Option<Entries>>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            cache: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load_from_file(&self) -> CoreResult<Entries> {
        if !self.path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| CoreError::StorageError(format!("{}: {e}", self.path.display())))?;

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        match serde_json::from_str(&content)
            .map_err(|e| CoreError::SerializationError(format!("{}: {e}", self.path.display())))?
        {
            Value::Object(entries) => Ok(entries),
            other => Err(CoreError::SerializationError(format!(
                "{}: expected a JSON object, found {}",
                self.path.display(),
                json_kind(&other)
            ))),
        }
    }

    async fn save_to_file(&self, entries: &Entries) -> CoreResult<()> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.exists() {
                fs::create_dir_all(dir)
                    .await
                    .map_err(|e| CoreError::StorageError(format!("{}: {e}", dir.display())))?;
            }
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        let tmp = self.temp_path();
        fs::write(&tmp, content)
            .await
            .map_err(|e| CoreError::StorageError(format!("{}: {e}", tmp.display())))?;
        if let Err(e) = fs::rename(&tmp, &self.path).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                log::debug!("Could not remove {}: {cleanup}", tmp.display());
            }
            return Err(CoreError::StorageError(format!("{}: {e}", self.path.display())));
        }

        log::debug!("Wrote {} keys to {}", entries.len(), self.path.display());
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        match self.path.file_name() {
            Some(name) => {
                let mut tmp = OsString::from(name);
                tmp.push(".tmp");
                self.path.with_file_name(tmp)
            }
            None => self.path.with_extension("tmp"),
        }
    }

    async fn entries<'a>(&self, cache: &'a mut Option<Entries>) -> CoreResult<&'a mut Entries> {
        if cache.is_none() {
            *cache = Some(self.load_from_file().await?);
        }
        Ok(cache.get_or_insert_with(Entries::new))
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> CoreResult<Option<Value>> {
        let mut cache = self.cache.lock().await;
        let entries = self.entries(&mut cache).await?;
        Ok(entries.get(key).filter(|v| !v.is_null()).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> CoreResult<()> {
        let mut cache = self.cache.lock().await;
        let entries = self.entries(&mut cache).await?;

        // the cache only changes once the file write succeeded
        let mut next = entries.clone();
        next.insert(key.to_string(), value);
        self.save_to_file(&next).await?;
        *entries = next;
        Ok(())
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        let mut cache = self.cache.lock().await;
        let entries = self.entries(&mut cache).await?;
        if !entries.contains_key(key) {
            return Ok(());
        }

        let mut next = entries.clone();
        next.remove(key);
        self.save_to_file(&next).await?;
        *entries = next;
        Ok(())
    }

    async fn clear(&self) -> CoreResult<()> {
        let mut cache = self.cache.lock().await;
        // the old document is never read, so a corrupt file is replaced too
        let empty = Entries::new();
        self.save_to_file(&empty).await?;
        *cache = Some(empty);
        log::info!("Cleared {}", self.path.display());
        Ok(())
    }
}
