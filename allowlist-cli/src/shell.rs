//! Interactive shell: one popup session for the whole run

use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use allowlist_app::AppState;
use allowlist_core::traits::PopupView;
use allowlist_core::types::StatusKind;
use allowlist_core::PopupSession;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::commands;
use crate::view::ConsoleView;

const HELP: &str = "\
Commands:
  list             show the list (fetches when the cache is stale)
  refresh          fetch the list from the server
  add [DOMAIN]     add DOMAIN, or the current page's domain
  select DOMAIN|N  select a listed domain by name or number
  remove [DOMAIN]  remove DOMAIN, or the selected domain
  url [URL]        set or clear the current page URL
  settings         show server settings and cache state
  help             show this help
  quit             leave the shell";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Empty,
    List,
    Refresh,
    Add(Option<String>),
    Select(String),
    Remove(Option<String>),
    Url(Option<String>),
    Settings,
    Help,
    Quit,
}

/// Parse one input line. Unknown commands and missing arguments are errors
/// with a message for the user.
pub fn parse_line(line: &str) -> Result<ShellCommand, String> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let arg = Some(rest.trim()).filter(|s| !s.is_empty()).map(str::to_string);

    let command = match word.to_ascii_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "list" | "ls" => ShellCommand::List,
        "refresh" => ShellCommand::Refresh,
        "add" => ShellCommand::Add(arg),
        "select" | "sel" => {
            ShellCommand::Select(arg.ok_or_else(|| "Usage: select DOMAIN|N".to_string())?)
        }
        "remove" | "rm" => ShellCommand::Remove(arg),
        "url" => ShellCommand::Url(arg),
        "settings" => ShellCommand::Settings,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command '{other}', type 'help'")),
    };
    Ok(command)
}

/// Resolve `select` input: a 1-based list position or a domain name.
fn select_target(session: &PopupSession, arg: &str) -> String {
    arg.parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| session.domains().get(i))
        .cloned()
        .unwrap_or_else(|| arg.to_string())
}

fn prompt() -> anyhow::Result<()> {
    let mut out = std::io::stdout().lock();
    write!(out, "allowlist> ")?;
    out.flush()?;
    Ok(())
}

pub async fn run(
    state: &AppState,
    view: Arc<ConsoleView>,
    current_url: Option<&str>,
) -> anyhow::Result<()> {
    let mut session = state.open_session(view.clone());
    session.set_current_url(current_url);

    println!("Type 'help' for commands.");
    // failures are already on screen
    if let Err(e) = session.open().await {
        tracing::debug!("open failed: {e}");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = lines.next_line().await.context("reading stdin")? else {
            println!();
            break;
        };

        let command = match parse_line(&line) {
            Ok(command) => command,
            Err(message) => {
                view.show_status(StatusKind::Error, &message);
                continue;
            }
        };

        match command {
            ShellCommand::Empty => {}
            ShellCommand::List => {
                if let Err(e) = session.refresh(false).await {
                    tracing::debug!("list failed: {e}");
                }
            }
            ShellCommand::Refresh => {
                if let Err(e) = session.refresh(true).await {
                    tracing::debug!("refresh failed: {e}");
                }
            }
            ShellCommand::Add(domain) => {
                if let Err(e) = session.add(domain.as_deref().unwrap_or_default()).await {
                    tracing::debug!("add failed: {e}");
                }
            }
            ShellCommand::Select(arg) => {
                let target = select_target(&session, &arg);
                if !session.select(&target) {
                    view.show_status(StatusKind::Error, &format!("'{arg}' is not in the list"));
                }
            }
            ShellCommand::Remove(Some(domain)) => {
                if let Err(e) = session.remove(&domain).await {
                    tracing::debug!("remove {domain} failed: {e}");
                }
            }
            ShellCommand::Remove(None) => {
                if let Err(e) = session.remove_selected().await {
                    tracing::debug!("remove selected failed: {e}");
                }
            }
            ShellCommand::Url(url) => {
                session.set_current_url(url.as_deref());
                let text = session.current_domain().map_or_else(
                    || "No current domain".to_string(),
                    |d| format!("Current domain: {d}"),
                );
                view.show_status(StatusKind::Info, &text);
            }
            ShellCommand::Settings => {
                commands::settings_show(state, view.as_ref()).await;
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => break,
        }
    }

    tracing::debug!("Shell closed");
    Ok(())
}
