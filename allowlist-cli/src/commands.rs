//! One-shot subcommands

use std::process::ExitCode;
use std::sync::Arc;

use allowlist_app::AppState;
use allowlist_core::traits::PopupView;
use allowlist_core::types::{ConnectionReport, StatusKind};
use allowlist_core::utils::datetime::{describe_age, format_millis};
use allowlist_core::CoreResult;

use crate::view::ConsoleView;

fn exit_code<T>(result: &CoreResult<T>) -> ExitCode {
    if result.is_ok() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Show the list, fetching only when the cache is missing or stale.
pub async fn list(state: &AppState, view: Arc<ConsoleView>) -> ExitCode {
    let mut session = state.open_session(view);
    exit_code(&session.open().await)
}

pub async fn refresh(state: &AppState, view: Arc<ConsoleView>, force: bool) -> ExitCode {
    let mut session = state.open_session(view);
    exit_code(&session.refresh(force).await)
}

/// Add `domain`, or the host of `current_url` when no domain is given.
pub async fn add(
    state: &AppState,
    view: Arc<ConsoleView>,
    domain: Option<&str>,
    current_url: Option<&str>,
) -> ExitCode {
    let mut session = state.open_session(view);
    session.set_current_url(current_url);
    // load the cache first so the optimistic update has a list to land in
    if session.open().await.is_err() {
        tracing::debug!("Continuing add without a loaded list");
    }
    exit_code(&session.add(domain.unwrap_or_default()).await)
}

pub async fn remove(state: &AppState, view: Arc<ConsoleView>, domain: &str) -> ExitCode {
    let mut session = state.open_session(view);
    if session.open().await.is_err() {
        tracing::debug!("Continuing remove without a loaded list");
    }
    exit_code(&session.remove(domain).await)
}

pub async fn settings_show(state: &AppState, view: &dyn PopupView) -> ExitCode {
    let loaded = state.settings_service.load().await;
    let settings = &loaded.settings;

    view.show_status(
        StatusKind::Info,
        if loaded.is_default {
            "Using default settings"
        } else {
            "Settings loaded"
        },
    );
    println!("host:    {}", settings.host);
    println!(
        "port:    {}",
        settings
            .port
            .map_or_else(|| "(none)".to_string(), |p| p.to_string())
    );
    println!("server:  {}", settings.address().base_url());

    let cache = state.ctx.storage().load_domain_cache().await;
    match (&cache.domains, cache.fetched_at) {
        (None, _) => println!("cache:   empty"),
        (Some(domains), Some(ts)) => {
            let now = state.ctx.clock().now_millis();
            let fresh = cache.is_fresh(now, state.cache_duration_ms());
            println!(
                "cache:   {} domains, fetched {} ({}){}",
                domains.len(),
                describe_age(ts, now),
                format_millis(ts).unwrap_or_else(|| ts.to_string()),
                if fresh { "" } else { ", stale" }
            );
        }
        (Some(domains), None) => {
            println!("cache:   {} domains, no timestamp", domains.len());
        }
    }
    ExitCode::SUCCESS
}

pub async fn settings_save(
    state: &AppState,
    view: &dyn PopupView,
    host: &str,
    port: &str,
) -> ExitCode {
    match state.settings_service.save(host, port).await {
        Ok(settings) => {
            view.show_status(
                StatusKind::Success,
                &format!(
                    "Settings saved, server is {}; cached list cleared",
                    settings.address()
                ),
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            e.log("Saving settings failed");
            view.show_status(StatusKind::Error, &e.to_string());
            ExitCode::FAILURE
        }
    }
}

pub async fn settings_reset(state: &AppState, view: &dyn PopupView) -> ExitCode {
    match state.settings_service.reset().await {
        Ok(()) => {
            view.show_status(StatusKind::Success, "Settings reset to defaults");
            ExitCode::SUCCESS
        }
        Err(e) => {
            e.log("Resetting settings failed");
            view.show_status(StatusKind::Error, &e.to_string());
            ExitCode::FAILURE
        }
    }
}

/// Check a server without saving it. Missing values come from the saved
/// settings.
pub async fn settings_test(
    state: &AppState,
    view: &dyn PopupView,
    host: Option<&str>,
    port: Option<&str>,
) -> ExitCode {
    let saved = state.settings_service.load().await.settings;
    let host = host.map_or_else(|| saved.host.clone(), str::to_string);
    let port = port.map_or_else(
        || saved.port.map(|p| p.to_string()).unwrap_or_default(),
        str::to_string,
    );

    view.show_status(StatusKind::Loading, "Testing connection...");
    match state.settings_service.test_connection(&host, &port).await {
        Ok(ConnectionReport::Reachable) => {
            view.show_status(StatusKind::Success, "Connection OK, server is reachable");
            ExitCode::SUCCESS
        }
        Ok(ConnectionReport::Unavailable { status }) => {
            view.show_status(
                StatusKind::Error,
                &format!("Server unavailable (HTTP {status})"),
            );
            ExitCode::FAILURE
        }
        Err(e) => {
            e.log("Connection test failed");
            view.show_status(StatusKind::Error, &format!("Connection error: {e}"));
            ExitCode::FAILURE
        }
    }
}
