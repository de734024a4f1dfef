//! Domain list synchronizer
//!
//! Decides whether the cached list can be trusted or must be fetched again.
//!
//! Two failure paths deliberately differ:
//! - a refresh that is *skipped* (cache fresh) keeps showing the cache;
//! - a refresh that *fails* shows an empty list and an error, while the
//!   in-memory and persisted cache stay as they were.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{connection_failure_message, Presenter, ServiceContext, SettingsService};
use crate::types::{CachedDomainList, StatusKind, SyncOutcome, CACHE_DURATION_MS};

/// Domain list synchronizer
pub struct DomainListSynchronizer {
    ctx: Arc<ServiceContext>,
    settings: SettingsService,
    cache_duration_ms: i64,
}

impl DomainListSynchronizer {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            settings: SettingsService::new(Arc::clone(&ctx)),
            ctx,
            cache_duration_ms: CACHE_DURATION_MS,
        }
    }

    /// Override the staleness window.
    #[must_use]
    pub fn with_cache_duration(mut self, cache_duration_ms: i64) -> Self {
        self.cache_duration_ms = cache_duration_ms;
        self
    }

    pub fn cache_duration_ms(&self) -> i64 {
        self.cache_duration_ms
    }

    /// Persisted list and timestamp, without rendering anything.
    pub async fn persisted_cache(&self) -> CachedDomainList {
        self.ctx.storage().load_domain_cache().await
    }

    /// Session start: show whatever is persisted, then refetch only if it is
    /// stale or missing.
    pub async fn load_or_refresh(
        &self,
        state: &mut CachedDomainList,
        presenter: &mut Presenter<'_>,
    ) -> CoreResult<SyncOutcome> {
        let persisted = self.persisted_cache().await;

        if persisted.domains.is_none() {
            presenter.status(StatusKind::Loading, "First load...");
            return self.refresh(state, presenter, false).await;
        }

        *state = persisted;
        presenter.render(state.as_slice());

        let now = self.ctx.clock().now_millis();
        if state.is_fresh(now, self.cache_duration_ms) {
            log::debug!("Persisted list is fresh, skipping fetch");
            presenter.status(StatusKind::Success, "List loaded from cache (up to date)");
            return Ok(SyncOutcome::FromCache);
        }

        presenter.status(StatusKind::Loading, "Refreshing stale cache...");
        self.refresh(state, presenter, false).await
    }

    /// Fetch the list unless `force` is false and the in-memory copy is fresh.
    pub async fn refresh(
        &self,
        state: &mut CachedDomainList,
        presenter: &mut Presenter<'_>,
        force: bool,
    ) -> CoreResult<SyncOutcome> {
        let now = self.ctx.clock().now_millis();
        if !force && state.is_fresh(now, self.cache_duration_ms) {
            presenter.render(state.as_slice());
            presenter.status(StatusKind::Success, "List is up to date");
            return Ok(SyncOutcome::UpToDate);
        }

        presenter.status(StatusKind::Loading, "Loading list...");
        let address = self.settings.resolve().await;

        let domains = match self.ctx.server().list_domains(&address).await {
            Ok(domains) => domains,
            Err(e) => {
                let err = CoreError::from(e);
                err.log(&format!("List request to {address} failed"));
                presenter.render(&[]);
                presenter.status(
                    StatusKind::Error,
                    &connection_failure_message(&address, &err),
                );
                return Err(err);
            }
        };

        let fetched_at = self.ctx.clock().now_millis();
        log::info!("Fetched {} domains from {address}", domains.len());
        *state = CachedDomainList::new(domains, fetched_at);

        let persisted = self.persist(state, fetched_at).await;
        presenter.render(state.as_slice());

        if let Err(e) = persisted {
            e.log("Failed to persist domain list");
            presenter.status(
                StatusKind::Error,
                &format!("List updated but could not be saved locally: {e}"),
            );
            return Err(e);
        }

        presenter.status(
            StatusKind::Success,
            if force {
                "List force-updated"
            } else {
                "List updated"
            },
        );
        Ok(SyncOutcome::Refreshed { forced: force })
    }

    async fn persist(&self, state: &CachedDomainList, fetched_at: i64) -> CoreResult<()> {
        let storage = self.ctx.storage();
        storage.save_domains(state.as_slice()).await?;
        storage.save_timestamp(fetched_at).await
    }
}
