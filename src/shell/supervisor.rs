use std::future::Future;
use std::sync::Arc;

use log::{debug, info, warn};
use tokio::sync::broadcast;
use tokio::sync::broadcast::error::TryRecvError;

use crate::agent::{Agent, AuthorizationState, ConnectionState};

use super::component::{
    dispose_slot, Activator, AuthenticationComponent, StartupState, WorkspaceComponent,
};
use super::page::Page;
use super::popup::{PopupContext, PopupCoordinator};
use super::state::PresentationRoot;

/// Owns the presentation root and the exclusive lifecycle of the
/// page-scoped components.
///
/// All handlers run on the presentation task; the supervisor is the only
/// writer of [`PresentationRoot`]. Component handles never leave their
/// slots, so two live instances of the same page kind cannot exist.
pub struct NavigationSupervisor {
    root: PresentationRoot,
    agent: Arc<dyn Agent>,

    authentication_activator: Activator<AuthenticationComponent>,
    authentication: Option<AuthenticationComponent>,

    workspace_activator: Activator<WorkspaceComponent>,
    workspace: Option<WorkspaceComponent>,

    disposed: bool,
}

impl NavigationSupervisor {
    pub fn new(
        agent: Arc<dyn Agent>,
        authentication_activator: Activator<AuthenticationComponent>,
        workspace_activator: Activator<WorkspaceComponent>,
    ) -> Self {
        Self {
            root: PresentationRoot::default(),
            agent,
            authentication_activator,
            authentication: None,
            workspace_activator,
            workspace: None,
            disposed: false,
        }
    }

    pub fn root(&self) -> &PresentationRoot {
        &self.root
    }

    /// Whether an authentication component instance is currently live.
    pub fn authentication_component_live(&self) -> bool {
        self.authentication.is_some()
    }

    /// Whether a workspace component instance is currently live.
    pub fn workspace_component_live(&self) -> bool {
        self.workspace.is_some()
    }

    /// Connection updates keep the authentication component warm and
    /// refresh the status line. They never promote a page, but a live
    /// workspace is explicitly demoted back to the authentication page:
    /// leaving the page index stale would break the exclusivity
    /// invariant once the workspace state is cleared.
    pub fn handle_connection_state(&mut self, state: ConnectionState) {
        debug!("connection state: {:?}", state);

        let auth_state = self
            .authentication_activator
            .activate(&mut self.authentication);
        self.root.connection_status = state.status_text().to_string();

        match self.root.page {
            Page::Workspace => {
                dispose_slot(&mut self.workspace);
                self.root.workspace = None;
                self.root.startup = None;
                self.root.authentication = Some(auth_state);
                self.root.page = Page::Authentication;
                info!("workspace demoted on connection update: {:?}", state);
            }
            Page::Authentication => {
                self.root.authentication = Some(auth_state);
            }
            Page::Initial => {
                // Startup stays visible; the warm component is published
                // once an authorization event moves the page.
            }
        }
    }

    /// Authorization updates drive the page transitions. The two
    /// pre-login states also fire their one-shot follow-up request
    /// against the agent.
    pub fn handle_authorization_state(&mut self, state: AuthorizationState) {
        debug!("authorization state: {:?}", state);

        match state {
            AuthorizationState::WaitParameters => {
                self.go_to_initial_page();
                let agent = Arc::clone(&self.agent);
                spawn_one_shot("setup_parameters", async move {
                    agent.setup_parameters().await
                });
            }
            AuthorizationState::WaitEncryptionKey => {
                self.go_to_initial_page();
                let agent = Arc::clone(&self.agent);
                spawn_one_shot("check_encryption_key", async move {
                    agent.check_encryption_key().await
                });
            }
            AuthorizationState::WaitPhoneNumber
            | AuthorizationState::WaitCode
            | AuthorizationState::WaitPassword => {
                self.go_to_authentication_page();
            }
            AuthorizationState::Ready => {
                self.go_to_workspace_page();
            }
        }
    }

    /// Popup updates only rewrite the overlay field; pages and component
    /// lifecycles are untouched.
    pub fn handle_popup(&mut self, context: Option<PopupContext>) {
        self.root.popup = context.into();
    }

    fn go_to_initial_page(&mut self) {
        if self.root.startup.is_none() {
            self.root.startup = Some(StartupState::default());
        }
        self.root.page = Page::Initial;

        dispose_slot(&mut self.authentication);
        dispose_slot(&mut self.workspace);
        self.root.authentication = None;
        self.root.workspace = None;
    }

    fn go_to_authentication_page(&mut self) {
        // One component instance carries all three login steps; repeated
        // phone/code/password events must not recreate it.
        if self.root.authentication.is_none() {
            let state = self
                .authentication_activator
                .activate(&mut self.authentication);
            self.root.authentication = Some(state);
        }
        self.root.page = Page::Authentication;

        dispose_slot(&mut self.workspace);
        self.root.startup = None;
        self.root.workspace = None;
    }

    fn go_to_workspace_page(&mut self) {
        if self.root.workspace.is_none() {
            let state = self.workspace_activator.activate(&mut self.workspace);
            self.root.workspace = Some(state);
        }
        self.root.page = Page::Workspace;

        dispose_slot(&mut self.authentication);
        self.root.startup = None;
        self.root.authentication = None;
    }

    /// Tear down both component slots and blank the page fields. Safe to
    /// call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.disposed = true;

        dispose_slot(&mut self.authentication);
        dispose_slot(&mut self.workspace);
        self.root.authentication = None;
        self.root.workspace = None;
        info!("navigation supervisor disposed");
    }
}

/// Detached one-shot request against the agent. Completion never gates a
/// navigation decision; failures are logged and swallowed so they cannot
/// reach the event loop.
fn spawn_one_shot<F>(name: &'static str, request: F)
where
    F: Future<Output = anyhow::Result<()>> + Send + 'static,
{
    tokio::spawn(async move {
        if let Err(err) = request.await {
            warn!("{} request failed: {:#}", name, err);
        }
    });
}

/// Subscription set tying the supervisor to its three input streams.
/// Dropping it cancels every subscription at once.
struct SupervisorStreams {
    connection: broadcast::Receiver<ConnectionState>,
    authorization: broadcast::Receiver<AuthorizationState>,
    popup: broadcast::Receiver<Option<PopupContext>>,
}

/// Single-consumer front of the shell.
///
/// The owning loop calls [`Shell::poll_events`] between renders; that
/// drain is the one serialization point where stream events mutate the
/// presentation root, so downstream readers never observe a partial
/// update.
pub struct Shell {
    supervisor: NavigationSupervisor,
    streams: Option<SupervisorStreams>,
}

impl Shell {
    /// Subscribe to the agent's two state streams and the popup
    /// coordinator, and wrap a fresh supervisor around them.
    pub fn new(
        agent: Arc<dyn Agent>,
        popups: &PopupCoordinator,
        authentication_activator: Activator<AuthenticationComponent>,
        workspace_activator: Activator<WorkspaceComponent>,
    ) -> Self {
        let streams = SupervisorStreams {
            connection: agent.subscribe_connection(),
            authorization: agent.subscribe_authorization(),
            popup: popups.subscribe(),
        };
        let supervisor =
            NavigationSupervisor::new(agent, authentication_activator, workspace_activator);
        Self {
            supervisor,
            streams: Some(streams),
        }
    }

    pub fn root(&self) -> &PresentationRoot {
        self.supervisor.root()
    }

    pub fn supervisor(&self) -> &NavigationSupervisor {
        &self.supervisor
    }

    /// Drain every pending event from all three streams into the
    /// supervisor. Events from one stream keep their relative order; a
    /// lagged receiver skips to the newest values without a page change,
    /// matching the latest-value semantics of the sources.
    pub fn poll_events(&mut self) {
        let Some(streams) = self.streams.as_mut() else {
            return;
        };

        loop {
            match streams.connection.try_recv() {
                Ok(state) => self.supervisor.handle_connection_state(state),
                Err(TryRecvError::Lagged(missed)) => {
                    warn!("connection stream lagged by {} events", missed);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        loop {
            match streams.authorization.try_recv() {
                Ok(state) => self.supervisor.handle_authorization_state(state),
                Err(TryRecvError::Lagged(missed)) => {
                    warn!("authorization stream lagged by {} events", missed);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }

        loop {
            match streams.popup.try_recv() {
                Ok(context) => self.supervisor.handle_popup(context),
                Err(TryRecvError::Lagged(missed)) => {
                    warn!("popup stream lagged by {} events", missed);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    /// Cancel the stream subscriptions and dispose any live components.
    /// Idempotent; later `poll_events` calls are no-ops.
    pub fn shutdown(&mut self) {
        if self.streams.take().is_some() {
            info!("shell subscriptions cancelled");
        }
        self.supervisor.dispose();
    }
}
