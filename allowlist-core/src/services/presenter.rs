use crate::traits::PopupView;
use crate::types::StatusKind;

/// A view together with the session's selection.
///
/// Every redraw goes through here so a selection that vanished from the list
/// is dropped before the view sees it.
pub struct Presenter<'a> {
    view: &'a dyn PopupView,
    selected: &'a mut Option<String>,
}

impl<'a> Presenter<'a> {
    pub fn new(view: &'a dyn PopupView, selected: &'a mut Option<String>) -> Self {
        Self { view, selected }
    }

    pub fn render(&mut self, domains: &[String]) {
        if self
            .selected
            .as_deref()
            .is_some_and(|sel| !domains.iter().any(|d| d == sel))
        {
            *self.selected = None;
        }
        self.view.render_domains(domains, self.selected.as_deref());
    }

    pub fn status(&self, kind: StatusKind, text: &str) {
        self.view.show_status(kind, text);
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }
}
