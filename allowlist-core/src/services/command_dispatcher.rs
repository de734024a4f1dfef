//! Add/remove commands with optimistic cache updates

use std::sync::Arc;

use crate::error::{CoreError, CoreResult};
use crate::services::{connection_failure_message, Presenter, ServiceContext, SettingsService};
use crate::types::{CachedDomainList, CommandAction, StatusKind};

/// Command dispatcher
///
/// A successful command is applied to the cached list locally; the list is
/// never refetched to confirm it.
pub struct CommandDispatcher {
    ctx: Arc<ServiceContext>,
    settings: SettingsService,
}

impl CommandDispatcher {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self {
            settings: SettingsService::new(Arc::clone(&ctx)),
            ctx,
        }
    }

    /// Send one command and return the server's reply text.
    ///
    /// On failure the cache (memory and storage) is left as it was and
    /// re-rendered.
    pub async fn dispatch(
        &self,
        action: CommandAction,
        domain: &str,
        state: &mut CachedDomainList,
        presenter: &mut Presenter<'_>,
    ) -> CoreResult<String> {
        let progress = match action {
            CommandAction::Add => format!("Adding {domain}..."),
            CommandAction::Remove => format!("Removing {domain}..."),
        };
        presenter.status(StatusKind::Loading, &progress);

        let address = self.settings.resolve().await;
        let reply = match self.ctx.server().send_command(&address, action, domain).await {
            Ok(reply) => reply,
            Err(e) => {
                let err = CoreError::from(e);
                err.log(&format!("Command '{action} {domain}' against {address} failed"));
                presenter.status(
                    StatusKind::Error,
                    &connection_failure_message(&address, &err),
                );
                presenter.render(state.as_slice());
                return Err(err);
            }
        };

        let reply = reply.trim().to_string();
        log::info!("Command '{action} {domain}' accepted by {address}");

        let changed = match action {
            CommandAction::Add => state.append_if_absent(domain),
            CommandAction::Remove => state.remove(domain),
        };

        if changed {
            if let Err(e) = self.ctx.storage().save_domains(state.as_slice()).await {
                e.log("Failed to persist domain list");
                presenter.render(state.as_slice());
                presenter.status(
                    StatusKind::Error,
                    &format!("Server accepted the change but it could not be saved locally: {e}"),
                );
                return Err(e);
            }
        }

        presenter.render(state.as_slice());
        let text = if reply.is_empty() {
            match action {
                CommandAction::Add => format!("{domain} added"),
                CommandAction::Remove => format!("{domain} removed"),
            }
        } else {
            reply.clone()
        };
        presenter.status(StatusKind::Success, &text);

        Ok(reply)
    }
}
