use serde::{Deserialize, Serialize};

/// The mutually-exclusive top-level section of the shell. Exactly one
/// page is current at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Page {
    Initial,
    Authentication,
    Workspace,
}

impl Page {
    pub fn title(self) -> &'static str {
        match self {
            Page::Initial => "egram",
            Page::Authentication => "Sign in",
            Page::Workspace => "Workspace",
        }
    }
}
