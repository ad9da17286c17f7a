use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use tokio::sync::broadcast;

use crate::config::Config;

use super::{Agent, AuthorizationState, ConnectionState};

const CHANNEL_CAPACITY: usize = 64;

/// In-process backend that scripts the TDLib-style handshake.
///
/// The one-shot requests advance the authorization flow the way the real
/// backend does: accepting parameters leads to the encryption-key check,
/// and a passing key check leads to the phone-number prompt. The
/// interactive login steps are driven externally, either by tests calling
/// the `emit_*` methods or by [`SimulatedAgent::run_demo_flow`].
pub struct SimulatedAgent {
    connection_tx: broadcast::Sender<ConnectionState>,
    authorization_tx: broadcast::Sender<AuthorizationState>,
    behind_proxy: bool,
}

impl SimulatedAgent {
    pub fn new() -> Self {
        let (connection_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        let (authorization_tx, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self {
            connection_tx,
            authorization_tx,
            behind_proxy: false,
        }
    }

    pub fn with_config(config: &Config) -> Self {
        let mut agent = Self::new();
        agent.behind_proxy = config.proxy.is_some();
        if config.api_hash.is_empty() {
            info!("no api credentials configured, running the simulated backend");
        }
        agent
    }

    /// Push a connection state to every subscriber. A send error only
    /// means nobody is subscribed yet, which is harmless here.
    pub fn emit_connection(&self, state: ConnectionState) {
        debug!("simulated backend: connection {:?}", state);
        let _ = self.connection_tx.send(state);
    }

    /// Push an authorization state to every subscriber.
    pub fn emit_authorization(&self, state: AuthorizationState) {
        debug!("simulated backend: authorization {:?}", state);
        let _ = self.authorization_tx.send(state);
    }

    /// Walk the full session lifecycle on a timer so the shell can be
    /// observed end to end without a real backend: connect, handshake,
    /// the three login steps, a ready workspace, then a network drop and
    /// recovery.
    pub fn run_demo_flow(self: Arc<Self>, interval: Duration) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let connect = if self.behind_proxy {
                ConnectionState::ConnectingToProxy
            } else {
                ConnectionState::Connecting
            };
            self.emit_connection(connect);
            tokio::time::sleep(interval).await;

            // setup_parameters / check_encryption_key cascade this to
            // WaitPhoneNumber without further help.
            self.emit_authorization(AuthorizationState::WaitParameters);
            tokio::time::sleep(interval).await;

            self.emit_authorization(AuthorizationState::WaitCode);
            tokio::time::sleep(interval).await;
            self.emit_authorization(AuthorizationState::WaitPassword);
            tokio::time::sleep(interval).await;

            self.emit_authorization(AuthorizationState::Ready);
            self.emit_connection(ConnectionState::Ready);
            tokio::time::sleep(interval * 2).await;

            self.emit_connection(ConnectionState::WaitingForNetwork);
            tokio::time::sleep(interval).await;
            self.emit_connection(ConnectionState::Updating);
            tokio::time::sleep(interval).await;
            self.emit_connection(ConnectionState::Ready);
            self.emit_authorization(AuthorizationState::Ready);
        })
    }
}

impl Default for SimulatedAgent {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Agent for SimulatedAgent {
    fn subscribe_connection(&self) -> broadcast::Receiver<ConnectionState> {
        self.connection_tx.subscribe()
    }

    fn subscribe_authorization(&self) -> broadcast::Receiver<AuthorizationState> {
        self.authorization_tx.subscribe()
    }

    async fn setup_parameters(&self) -> Result<()> {
        debug!("simulated backend: parameters accepted");
        self.emit_authorization(AuthorizationState::WaitEncryptionKey);
        Ok(())
    }

    async fn check_encryption_key(&self) -> Result<()> {
        debug!("simulated backend: encryption key verified");
        self.emit_authorization(AuthorizationState::WaitPhoneNumber);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn one_shots_advance_the_handshake() {
        let agent = SimulatedAgent::new();
        let mut states = agent.subscribe_authorization();

        agent.setup_parameters().await.unwrap();
        assert_eq!(states.try_recv().unwrap(), AuthorizationState::WaitEncryptionKey);

        agent.check_encryption_key().await.unwrap();
        assert_eq!(states.try_recv().unwrap(), AuthorizationState::WaitPhoneNumber);
    }

    #[test]
    fn late_subscribers_get_no_replay() {
        let agent = SimulatedAgent::new();
        agent.emit_connection(ConnectionState::Connecting);

        let mut states = agent.subscribe_connection();
        assert!(states.try_recv().is_err());
    }
}
