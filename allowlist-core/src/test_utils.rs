//! Test helpers: in-memory doubles for the server, clock, view and a store
//! that always fails.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::Mutex as AsyncMutex;

use allowlist_client::{AllowlistServer, ClientError, CommandAction, ServerAddress};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{Clock, InMemoryKeyValueStore, KeyValueStore, PopupView};
use crate::types::StatusKind;

/// Fixed "now" for tests (Unix milliseconds).
pub const NOW: i64 = 1_700_000_000_000;
pub const MINUTE: i64 = 60_000;

/// One request seen by [`MockAllowlistServer`], with the address rendered as
/// `host[:port]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerCall {
    List(String),
    Command {
        address: String,
        action: CommandAction,
        domain: String,
    },
    Probe(String),
}

/// Scripted server: every call returns the configured response.
pub struct MockAllowlistServer {
    list_response: AsyncMutex<Result<Vec<String>, ClientError>>,
    command_response: AsyncMutex<Result<String, ClientError>>,
    probe_response: AsyncMutex<Result<u16, ClientError>>,
    calls: AsyncMutex<Vec<ServerCall>>,
}

impl MockAllowlistServer {
    pub fn new() -> Self {
        Self {
            list_response: AsyncMutex::new(Ok(Vec::new())),
            command_response: AsyncMutex::new(Ok("OK".to_string())),
            probe_response: AsyncMutex::new(Ok(200)),
            calls: AsyncMutex::new(Vec::new()),
        }
    }

    pub async fn set_list_response(&self, response: Result<Vec<String>, ClientError>) {
        *self.list_response.lock().await = response;
    }

    pub async fn set_command_response(&self, response: Result<String, ClientError>) {
        *self.command_response.lock().await = response;
    }

    pub async fn set_probe_response(&self, response: Result<u16, ClientError>) {
        *self.probe_response.lock().await = response;
    }

    pub async fn calls(&self) -> Vec<ServerCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: ServerCall) {
        self.calls.lock().await.push(call);
    }
}

#[async_trait]
impl AllowlistServer for MockAllowlistServer {
    async fn list_domains(&self, address: &ServerAddress) -> allowlist_client::Result<Vec<String>> {
        self.record(ServerCall::List(address.to_string())).await;
        self.list_response.lock().await.clone()
    }

    async fn send_command(
        &self,
        address: &ServerAddress,
        action: CommandAction,
        domain: &str,
    ) -> allowlist_client::Result<String> {
        self.record(ServerCall::Command {
            address: address.to_string(),
            action,
            domain: domain.to_string(),
        })
        .await;
        self.command_response.lock().await.clone()
    }

    async fn probe(&self, address: &ServerAddress) -> allowlist_client::Result<u16> {
        self.record(ServerCall::Probe(address.to_string())).await;
        self.probe_response.lock().await.clone()
    }
}

/// Settable clock.
pub struct MockClock {
    now: AtomicI64,
}

impl MockClock {
    pub fn new(now: i64) -> Self {
        Self {
            now: AtomicI64::new(now),
        }
    }

    pub fn advance(&self, millis: i64) {
        self.now.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Clock for MockClock {
    fn now_millis(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

/// View that records everything it is asked to show.
#[derive(Default)]
pub struct RecordingView {
    renders: Mutex<Vec<(Vec<String>, Option<String>)>>,
    statuses: Mutex<Vec<(StatusKind, String)>>,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn renders(&self) -> Vec<(Vec<String>, Option<String>)> {
        self.renders.lock().unwrap().clone()
    }

    pub fn statuses(&self) -> Vec<(StatusKind, String)> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn last_render(&self) -> Option<(Vec<String>, Option<String>)> {
        self.renders.lock().unwrap().last().cloned()
    }

    pub fn last_status(&self) -> Option<(StatusKind, String)> {
        self.statuses.lock().unwrap().last().cloned()
    }
}

impl PopupView for RecordingView {
    fn render_domains(&self, domains: &[String], selected: Option<&str>) {
        self.renders
            .lock()
            .unwrap()
            .push((domains.to_vec(), selected.map(str::to_string)));
    }

    fn show_status(&self, kind: StatusKind, text: &str) {
        self.statuses.lock().unwrap().push((kind, text.to_string()));
    }
}

/// Store whose every operation fails.
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, key: &str) -> CoreResult<Option<Value>> {
        Err(CoreError::StorageError(format!("cannot read '{key}'")))
    }

    async fn set(&self, key: &str, _value: Value) -> CoreResult<()> {
        Err(CoreError::StorageError(format!("cannot write '{key}'")))
    }

    async fn remove(&self, key: &str) -> CoreResult<()> {
        Err(CoreError::StorageError(format!("cannot remove '{key}'")))
    }

    async fn clear(&self) -> CoreResult<()> {
        Err(CoreError::StorageError("cannot clear".to_string()))
    }
}

/// Context wired to an in-memory store, a scripted server and a clock at
/// `now`. The doubles are returned alongside for setup and assertions.
pub fn create_test_context(
    now: i64,
) -> (
    Arc<ServiceContext>,
    Arc<InMemoryKeyValueStore>,
    Arc<MockAllowlistServer>,
    Arc<MockClock>,
) {
    let store = Arc::new(InMemoryKeyValueStore::new());
    let server = Arc::new(MockAllowlistServer::new());
    let clock = Arc::new(MockClock::new(now));
    let ctx = Arc::new(ServiceContext::new(
        store.clone(),
        server.clone(),
        clock.clone(),
    ));
    (ctx, store, server, clock)
}

/// Context whose store fails every read and write.
pub fn create_failing_store_context(now: i64) -> (Arc<ServiceContext>, Arc<MockAllowlistServer>) {
    let server = Arc::new(MockAllowlistServer::new());
    let ctx = Arc::new(ServiceContext::new(
        Arc::new(FailingStore),
        server.clone(),
        Arc::new(MockClock::new(now)),
    ));
    (ctx, server)
}
