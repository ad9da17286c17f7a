//! The shell core: navigation supervision, component lifecycle, and the
//! popup overlay channel. Everything here mutates state on a single
//! presentation task; rendering lives in `crate::ui`.

mod component;
mod page;
mod popup;
mod state;
mod supervisor;

pub use component::{
    dispose_slot, Activator, AuthenticationComponent, AuthenticationState, PageComponent,
    StartupState, WorkspaceComponent, WorkspaceState,
};
pub use page::Page;
pub use popup::{PopupContext, PopupCoordinator, PopupState};
pub use state::PresentationRoot;
pub use supervisor::{NavigationSupervisor, Shell};
