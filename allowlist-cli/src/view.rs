//! Terminal rendering of a popup session

use std::io::{self, IsTerminal, Write};

use allowlist_core::traits::PopupView;
use allowlist_core::types::StatusKind;
use crossterm::style::Stylize;

/// Writes the list and status lines to stdout.
pub struct ConsoleView {
    color: bool,
}

impl ConsoleView {
    pub fn new() -> Self {
        Self {
            color: io::stdout().is_terminal(),
        }
    }

    pub fn render_lines(domains: &[String], selected: Option<&str>) -> Vec<String> {
        if domains.is_empty() {
            return vec!["  (domain list is empty)".to_string()];
        }
        domains
            .iter()
            .enumerate()
            .map(|(i, domain)| {
                let marker = if selected == Some(domain.as_str()) { '>' } else { ' ' };
                format!("{marker} {:>3}. {domain}", i + 1)
            })
            .collect()
    }

    pub fn status_line(kind: StatusKind, text: &str) -> String {
        let tag = match kind {
            StatusKind::Success => "ok",
            StatusKind::Error => "error",
            StatusKind::Loading => "..",
            StatusKind::Info => "info",
        };
        format!("[{tag}] {text}")
    }

    fn write(&self, line: &str) {
        let mut out = io::stdout().lock();
        if let Err(e) = writeln!(out, "{line}") {
            tracing::debug!("stdout write failed: {e}");
        }
    }
}

impl Default for ConsoleView {
    fn default() -> Self {
        Self::new()
    }
}

impl PopupView for ConsoleView {
    fn render_domains(&self, domains: &[String], selected: Option<&str>) {
        for line in Self::render_lines(domains, selected) {
            if self.color && line.starts_with('>') {
                self.write(&line.bold().to_string());
            } else {
                self.write(&line);
            }
        }
    }

    fn show_status(&self, kind: StatusKind, text: &str) {
        let line = Self::status_line(kind, text);
        if !self.color {
            self.write(&line);
            return;
        }
        let styled = match kind {
            StatusKind::Success => line.green(),
            StatusKind::Error => line.red(),
            StatusKind::Loading => line.dark_grey(),
            StatusKind::Info => line.blue(),
        };
        self.write(&styled.to_string());
    }
}
