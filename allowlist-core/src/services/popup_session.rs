//! Per-view session state
//!
//! A session lives from "view opened" to "view closed". It owns the cached
//! list, the selection and the current page domain; nothing in it is shared.

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{CommandDispatcher, DomainListSynchronizer, Presenter, ServiceContext};
use crate::traits::PopupView;
use crate::types::{CachedDomainList, CommandAction, Domain, StatusKind, SyncOutcome};

/// Popup session
pub struct PopupSession {
    synchronizer: DomainListSynchronizer,
    dispatcher: CommandDispatcher,
    view: Arc<dyn PopupView>,
    state: CachedDomainList,
    selected: Option<String>,
    current_domain: Option<Domain>,
}

impl PopupSession {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>, view: Arc<dyn PopupView>) -> Self {
        Self {
            synchronizer: DomainListSynchronizer::new(Arc::clone(&ctx)),
            dispatcher: CommandDispatcher::new(ctx),
            view,
            state: CachedDomainList::default(),
            selected: None,
            current_domain: None,
        }
    }

    /// Override the staleness window.
    #[must_use]
    pub fn with_cache_duration(mut self, cache_duration_ms: i64) -> Self {
        self.synchronizer = self.synchronizer.with_cache_duration(cache_duration_ms);
        self
    }

    /// Remember the page the user is looking at. Anything without a usable
    /// hostname clears it.
    pub fn set_current_url(&mut self, page_url: Option<&str>) {
        self.current_domain = page_url.and_then(Domain::from_page_url);
        match &self.current_domain {
            Some(domain) => log::debug!("Current domain set to {domain}"),
            None => log::debug!("No current domain"),
        }
    }

    pub fn current_domain(&self) -> Option<&Domain> {
        self.current_domain.as_ref()
    }

    /// Show the persisted list, fetching it if missing or stale.
    pub async fn open(&mut self) -> CoreResult<SyncOutcome> {
        let mut presenter = Presenter::new(self.view.as_ref(), &mut self.selected);
        self.synchronizer
            .load_or_refresh(&mut self.state, &mut presenter)
            .await
    }

    /// Fetch the list, or with `force == false` reuse the cache while fresh.
    ///
    /// A session that has not been opened yet starts from the persisted
    /// cache.
    pub async fn refresh(&mut self, force: bool) -> CoreResult<SyncOutcome> {
        if self.state.domains.is_none() {
            self.state = self.synchronizer.persisted_cache().await;
        }
        let mut presenter = Presenter::new(self.view.as_ref(), &mut self.selected);
        self.synchronizer
            .refresh(&mut self.state, &mut presenter, force)
            .await
    }

    /// Add the typed domain, or the current page's domain when the input is
    /// blank.
    pub async fn add(&mut self, input: &str) -> CoreResult<String> {
        let domain = match self.domain_to_add(input) {
            Ok(domain) => domain,
            Err(e) => {
                e.log("Add rejected");
                self.view.show_status(StatusKind::Error, &e.to_string());
                return Err(e);
            }
        };

        let mut presenter = Presenter::new(self.view.as_ref(), &mut self.selected);
        self.dispatcher
            .dispatch(
                CommandAction::Add,
                domain.as_str(),
                &mut self.state,
                &mut presenter,
            )
            .await
    }

    fn domain_to_add(&self, input: &str) -> CoreResult<Domain> {
        if input.trim().is_empty() {
            self.current_domain
                .clone()
                .ok_or(CoreError::NoCurrentDomain)
        } else {
            Domain::parse(input)
        }
    }

    /// Select a listed domain. Returns `false` (selection unchanged) when it
    /// is not in the list.
    pub fn select(&mut self, domain: &str) -> bool {
        let domain = domain.trim();
        if !self.state.contains(domain) {
            return false;
        }
        self.selected = Some(domain.to_string());
        self.view
            .render_domains(self.state.as_slice(), self.selected.as_deref());
        true
    }

    /// Remove the selected domain. The selection is cleared whatever the
    /// outcome.
    pub async fn remove_selected(&mut self) -> CoreResult<String> {
        let Some(domain) = self.selected.clone() else {
            let err = CoreError::NoDomainSelected;
            self.view.show_status(StatusKind::Error, &err.to_string());
            return Err(err);
        };

        let result = {
            let mut presenter = Presenter::new(self.view.as_ref(), &mut self.selected);
            self.dispatcher
                .dispatch(CommandAction::Remove, &domain, &mut self.state, &mut presenter)
                .await
        };

        self.selected = None;
        self.view.render_domains(self.state.as_slice(), None);
        result
    }

    /// Remove a domain by name without selecting it first.
    pub async fn remove(&mut self, domain: &str) -> CoreResult<String> {
        let domain = domain.trim();
        if domain.is_empty() {
            let err = CoreError::ValidationError("Domain cannot be empty".to_string());
            self.view.show_status(StatusKind::Error, &err.to_string());
            return Err(err);
        }

        let mut presenter = Presenter::new(self.view.as_ref(), &mut self.selected);
        self.dispatcher
            .dispatch(CommandAction::Remove, domain, &mut self.state, &mut presenter)
            .await
    }

    pub fn domains(&self) -> &[String] {
        self.state.as_slice()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn cache(&self) -> &CachedDomainList {
        &self.state
    }
}
