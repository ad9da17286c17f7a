use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::broadcast;

mod simulation;

pub use simulation::SimulatedAgent;

/// Connection health reported by the backend. Only the latest value
/// matters; no history is retained anywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionState {
    Connecting,
    ConnectingToProxy,
    Ready,
    Updating,
    WaitingForNetwork,
}

impl ConnectionState {
    /// Human-readable label shown in the shell's status bar.
    pub fn status_text(self) -> &'static str {
        match self {
            ConnectionState::Connecting => "Connecting...",
            ConnectionState::ConnectingToProxy => "Connecting to proxy...",
            ConnectionState::Ready => "Ready.",
            ConnectionState::Updating => "Updating...",
            ConnectionState::WaitingForNetwork => "Waiting for network...",
        }
    }
}

/// Progress of the backend authorization handshake, from parameter
/// negotiation through the interactive login steps to a usable session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthorizationState {
    WaitParameters,
    WaitEncryptionKey,
    WaitPhoneNumber,
    WaitCode,
    WaitPassword,
    Ready,
}

/// Boundary to the connectivity/authorization backend.
///
/// The two subscriptions hand out independent broadcast receivers: every
/// observer sees every emission in call order, and late subscribers get
/// no replay. The two request methods are one-shot side effects the
/// supervisor fires without waiting on the outcome.
#[async_trait]
pub trait Agent: Send + Sync {
    fn subscribe_connection(&self) -> broadcast::Receiver<ConnectionState>;

    fn subscribe_authorization(&self) -> broadcast::Receiver<AuthorizationState>;

    /// Submit client parameters; requested when authorization reports
    /// `WaitParameters`.
    async fn setup_parameters(&self) -> Result<()>;

    /// Verify the local database encryption key; requested when
    /// authorization reports `WaitEncryptionKey`.
    async fn check_encryption_key(&self) -> Result<()>;
}
