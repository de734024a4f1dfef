use crate::types::StatusKind;

/// Rendering surface of a popup session.
///
/// Calls are fire-and-forget; a view never fails.
pub trait PopupView: Send + Sync {
    /// Redraw the domain list. `selected` is the session's current selection,
    /// already known to be part of `domains`.
    fn render_domains(&self, domains: &[String], selected: Option<&str>);

    /// Replace the status line.
    fn show_status(&self, kind: StatusKind, text: &str);
}
