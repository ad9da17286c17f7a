use std::sync::atomic::{AtomicU64, Ordering};

use log::debug;

/// Monotonic stamp for page states, so logs and tests can tell component
/// instances apart across recreate cycles.
fn next_instance_id() -> u64 {
    static NEXT: AtomicU64 = AtomicU64::new(1);
    NEXT.fetch_add(1, Ordering::Relaxed)
}

/// A page-scoped sub-component: an exclusively owned handle plus the
/// presentation state it exposes.
///
/// Handles live in `Option` slots owned by the navigation supervisor, so
/// at most one instance per page kind can exist. `dispose` releases
/// whatever the component owns and must be idempotent.
pub trait PageComponent: Send {
    type State: Clone + Send + 'static;

    /// Presentation state of this instance.
    fn state(&self) -> Self::State;

    /// Release owned resources. Called by the supervisor before a
    /// navigation transition leaves this component's page branch.
    fn dispose(&mut self);
}

/// Lazily constructs a component into a caller-owned slot.
///
/// Get-or-create only: an empty slot is filled from the factory, a
/// populated slot is reused untouched. Construction is the sole side
/// effect; nothing is memoized beyond what the slot already captures.
pub struct Activator<C: PageComponent> {
    factory: Box<dyn Fn() -> C + Send>,
}

impl<C: PageComponent> Activator<C> {
    pub fn new(factory: impl Fn() -> C + Send + 'static) -> Self {
        Self {
            factory: Box::new(factory),
        }
    }

    /// Return the state of the component in `slot`, constructing one
    /// first when the slot is empty.
    pub fn activate(&self, slot: &mut Option<C>) -> C::State {
        slot.get_or_insert_with(|| (self.factory)()).state()
    }
}

/// Dispose and drop whatever lives in `slot`. No-op on an empty slot, so
/// repeated teardown is safe.
pub fn dispose_slot<C: PageComponent>(slot: &mut Option<C>) {
    if let Some(mut component) = slot.take() {
        component.dispose();
    }
}

/// Presentation state of the startup (Initial) page. Created once on
/// first entry and reused for the rest of the session.
#[derive(Debug, Clone, PartialEq)]
pub struct StartupState {
    pub instance: u64,
    pub notice: String,
}

impl Default for StartupState {
    fn default() -> Self {
        Self {
            instance: next_instance_id(),
            notice: "Preparing session...".to_string(),
        }
    }
}

/// Presentation state of the authentication page. One instance carries
/// the user through all three login steps (phone, code, password).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthenticationState {
    pub instance: u64,
    pub phone_number: String,
    pub code: String,
    pub password: String,
}

/// Presentation state of the workspace page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkspaceState {
    pub instance: u64,
}

/// Owned handle for the authentication page.
pub struct AuthenticationComponent {
    state: AuthenticationState,
    disposed: bool,
}

impl AuthenticationComponent {
    pub fn new() -> Self {
        let state = AuthenticationState {
            instance: next_instance_id(),
            ..AuthenticationState::default()
        };
        debug!("authentication component {} created", state.instance);
        Self {
            state,
            disposed: false,
        }
    }
}

impl Default for AuthenticationComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl PageComponent for AuthenticationComponent {
    type State = AuthenticationState;

    fn state(&self) -> AuthenticationState {
        self.state.clone()
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        debug!("authentication component {} disposed", self.state.instance);
    }
}

impl Drop for AuthenticationComponent {
    fn drop(&mut self) {
        self.dispose();
    }
}

/// Owned handle for the workspace page.
pub struct WorkspaceComponent {
    state: WorkspaceState,
    disposed: bool,
}

impl WorkspaceComponent {
    pub fn new() -> Self {
        let state = WorkspaceState {
            instance: next_instance_id(),
        };
        debug!("workspace component {} created", state.instance);
        Self {
            state,
            disposed: false,
        }
    }
}

impl Default for WorkspaceComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl PageComponent for WorkspaceComponent {
    type State = WorkspaceState;

    fn state(&self) -> WorkspaceState {
        self.state.clone()
    }

    fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;
        debug!("workspace component {} disposed", self.state.instance);
    }
}

impl Drop for WorkspaceComponent {
    fn drop(&mut self) {
        self.dispose();
    }
}
