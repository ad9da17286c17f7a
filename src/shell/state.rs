use super::component::{AuthenticationState, StartupState, WorkspaceState};
use super::page::Page;
use super::popup::PopupState;

/// Aggregate the UI layer renders from.
///
/// Mutated only by the navigation supervisor on the presentation task;
/// everything else just reads it. Invariant: exactly one of the three
/// page-state fields is populated at any observable instant, and it
/// corresponds to `page`.
#[derive(Debug, Clone)]
pub struct PresentationRoot {
    pub page: Page,
    pub startup: Option<StartupState>,
    pub authentication: Option<AuthenticationState>,
    pub workspace: Option<WorkspaceState>,
    pub popup: PopupState,
    pub connection_status: String,
}

impl Default for PresentationRoot {
    fn default() -> Self {
        Self {
            page: Page::Initial,
            startup: Some(StartupState::default()),
            authentication: None,
            workspace: None,
            popup: PopupState::Hidden,
            connection_status: String::new(),
        }
    }
}

impl PresentationRoot {
    /// Check the exclusivity invariant: exactly one page-state field is
    /// populated and it matches the current page.
    pub fn page_state_consistent(&self) -> bool {
        let populated = usize::from(self.startup.is_some())
            + usize::from(self.authentication.is_some())
            + usize::from(self.workspace.is_some());
        if populated != 1 {
            return false;
        }
        match self.page {
            Page::Initial => self.startup.is_some(),
            Page::Authentication => self.authentication.is_some(),
            Page::Workspace => self.workspace.is_some(),
        }
    }
}
