#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests for `AppStateBuilder` and sessions opened from `AppState`.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use allowlist_app::{AppStateBuilder, StoreBackend};
use allowlist_client::{AllowlistServer, ClientError, CommandAction, ServerAddress};
use allowlist_core::traits::PopupView;
use allowlist_core::types::{StatusKind, SyncOutcome};
use allowlist_core::CoreError;
use async_trait::async_trait;

// ===== Test doubles =====

/// Serves a fixed list and counts list requests.
struct StaticServer {
    domains: Vec<String>,
    list_calls: AtomicUsize,
}

impl StaticServer {
    fn new(domains: &[&str]) -> Self {
        Self {
            domains: domains.iter().map(ToString::to_string).collect(),
            list_calls: AtomicUsize::new(0),
        }
    }

    fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AllowlistServer for StaticServer {
    async fn list_domains(&self, _address: &ServerAddress) -> allowlist_client::Result<Vec<String>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.domains.clone())
    }

    async fn send_command(
        &self,
        _address: &ServerAddress,
        action: CommandAction,
        domain: &str,
    ) -> allowlist_client::Result<String> {
        Ok(format!("{action} {domain}: ok"))
    }

    async fn probe(&self, address: &ServerAddress) -> allowlist_client::Result<u16> {
        Err(ClientError::NetworkError {
            server: address.to_string(),
            detail: "not reachable in tests".to_string(),
        })
    }
}

#[derive(Default)]
struct StatusLog {
    statuses: Mutex<Vec<(StatusKind, String)>>,
}

impl StatusLog {
    fn last(&self) -> Option<(StatusKind, String)> {
        self.statuses.lock().unwrap().last().cloned()
    }
}

impl PopupView for StatusLog {
    fn render_domains(&self, _domains: &[String], _selected: Option<&str>) {}

    fn show_status(&self, kind: StatusKind, text: &str) {
        self.statuses.lock().unwrap().push((kind, text.to_string()));
    }
}

// ===== Tests =====

#[test]
fn build_requires_store() {
    let result = AppStateBuilder::new().build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[test]
fn build_rejects_non_positive_cache_duration() {
    let result = AppStateBuilder::new()
        .store_backend(StoreBackend::Memory)
        .cache_duration_ms(0)
        .build();
    assert!(matches!(result, Err(CoreError::ValidationError(_))));
}

#[tokio::test]
async fn memory_backend_starts_with_defaults() {
    let state = AppStateBuilder::new()
        .store_backend(StoreBackend::Memory)
        .build()
        .unwrap();

    let loaded = state.settings_service.load().await;
    assert!(loaded.is_default);
    assert_eq!(state.settings_service.resolve().await.to_string(), "192.168.10.1");
}

#[tokio::test]
async fn file_backend_cache_outlives_the_process_state() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("storage.json");
    let server = Arc::new(StaticServer::new(&["a.com", "b.com"]));

    {
        let state = AppStateBuilder::new()
            .store_backend(StoreBackend::File(path.clone()))
            .server(server.clone())
            .build()
            .unwrap();
        let mut session = state.open_session(Arc::new(StatusLog::default()));
        assert_eq!(
            session.open().await.unwrap(),
            SyncOutcome::Refreshed { forced: false }
        );
    }

    let state = AppStateBuilder::new()
        .store_backend(StoreBackend::File(path))
        .server(server.clone())
        .build()
        .unwrap();
    let view = Arc::new(StatusLog::default());
    let mut session = state.open_session(view.clone());

    assert_eq!(session.open().await.unwrap(), SyncOutcome::FromCache);
    assert_eq!(session.domains(), ["a.com", "b.com"]);
    assert_eq!(server.list_calls(), 1);
    assert_eq!(view.last().unwrap().0, StatusKind::Success);
}

#[tokio::test]
async fn saving_settings_invalidates_file_cache() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("storage.json");
    let server = Arc::new(StaticServer::new(&["a.com"]));
    let state = AppStateBuilder::new()
        .store_backend(StoreBackend::File(path))
        .server(server.clone())
        .build()
        .unwrap();

    state.open_session(Arc::new(StatusLog::default())).open().await.unwrap();
    state.settings_service.save("10.0.0.2", "8080").await.unwrap();
    state.open_session(Arc::new(StatusLog::default())).open().await.unwrap();

    assert_eq!(server.list_calls(), 2);
}

#[tokio::test]
async fn sessions_share_persisted_state_but_not_selection() {
    let server = Arc::new(StaticServer::new(&["a.com", "b.com"]));
    let state = AppStateBuilder::new()
        .store_backend(StoreBackend::Memory)
        .server(server)
        .build()
        .unwrap();

    let mut first = state.open_session(Arc::new(StatusLog::default()));
    first.open().await.unwrap();
    assert!(first.select("a.com"));
    first.add("c.com").await.unwrap();

    let mut second = state.open_session(Arc::new(StatusLog::default()));
    second.open().await.unwrap();
    assert_eq!(second.domains(), ["a.com", "b.com", "c.com"]);
    assert_eq!(second.selected(), None);
}

#[tokio::test]
async fn reset_recovers_an_unreadable_store_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("storage.json");
    std::fs::write(&path, "{\"serverSettings\": ").unwrap();
    let server = Arc::new(StaticServer::new(&["a.com"]));
    let state = AppStateBuilder::new()
        .store_backend(StoreBackend::File(path.clone()))
        .server(server.clone())
        .build()
        .unwrap();

    assert!(matches!(
        state.settings_service.save("10.0.0.2", "").await,
        Err(CoreError::SerializationError(_))
    ));

    state.settings_service.reset().await.unwrap();
    state.settings_service.save("10.0.0.2", "").await.unwrap();

    assert_eq!(state.settings_service.resolve().await.to_string(), "10.0.0.2");
    let mut session = state.open_session(Arc::new(StatusLog::default()));
    session.open().await.unwrap();
    assert_eq!(session.domains(), ["a.com"]);
    assert!(std::fs::read_to_string(&path).unwrap().contains("10.0.0.2"));
}
