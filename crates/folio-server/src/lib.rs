//! folio SSH server.
//!
//! Serves the portfolio to anyone who connects with `ssh`. Every connection
//! gets its own [`App`](folio_app::App) state and terminal; nothing mutable is
//! shared between sessions.
//!
//! # Components
//!
//! - [`Server`]: listener and accept loop
//! - [`ConnectionHandler`]: russh handler for one connection
//! - [`SessionRuntime`]: event loop driving one session's state and terminal
//! - [`AuthPolicy`]: which credentials open a session
//! - [`ServerConfig`]: runtime configuration
//! - [`terminal::RemoteBackend`]: ratatui backend for the client's terminal

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod auth;
mod config;
mod error;
mod handler;
pub mod host_key;
mod session;
pub mod terminal;

use std::{net::SocketAddr, sync::Arc, time::Duration};

pub use auth::AuthPolicy;
pub use config::{DEFAULT_BIND_ADDRESS, DEFAULT_HOST_KEY_PATH, DEFAULT_IDLE_TIMEOUT, ServerConfig};
pub use error::{ServerError, SessionError};
use folio_app::Content;
use folio_tui::Theme;
pub use handler::ConnectionHandler;
pub use session::{
    DEFAULT_SIZE, EVENT_QUEUE, MAX_SIZE, Portfolio, SessionEnd, SessionEvent, SessionRuntime,
    TICK_INTERVAL, bounded_size,
};
use tokio::net::TcpListener;

/// Delay before answering a failed authentication attempt.
const AUTH_REJECTION_DELAY: Duration = Duration::from_secs(1);

/// Production folio server.
pub struct Server {
    listener: TcpListener,
    ssh: Arc<russh::server::Config>,
    portfolio: Arc<Portfolio>,
    auth: Arc<AuthPolicy>,
}

impl Server {
    /// Load the host key and bind the listener.
    pub async fn bind(config: ServerConfig) -> Result<Self, ServerError> {
        let host_key = host_key::load_or_generate(&config.host_key_path)?;
        let auth = AuthPolicy::load(config.authorized_keys.as_deref(), config.allow_password)?;

        let ssh = russh::server::Config {
            inactivity_timeout: Some(config.idle_timeout),
            auth_rejection_time: AUTH_REJECTION_DELAY,
            auth_rejection_time_initial: Some(Duration::ZERO),
            keys: vec![host_key],
            ..Default::default()
        };

        let listener = TcpListener::bind(&config.bind_address).await?;
        let portfolio =
            Portfolio { content: Content::builtin(), theme: Theme::preset(config.theme) };

        Ok(Self {
            listener,
            ssh: Arc::new(ssh),
            portfolio: Arc::new(portfolio),
            auth: Arc::new(auth),
        })
    }

    /// Local address the server is bound to.
    pub fn local_addr(&self) -> Result<SocketAddr, ServerError> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections until the listener fails.
    ///
    /// Each connection runs on its own task. A failing connection is logged
    /// and does not affect the others.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!(
            addr = %self.local_addr()?,
            theme = %self.portfolio.theme.name,
            "server listening"
        );

        loop {
            let (stream, peer) = self.listener.accept().await?;
            if let Err(e) = stream.set_nodelay(true) {
                tracing::debug!(%peer, "set_nodelay failed: {e}");
            }

            let id = rand::random::<u64>();
            tracing::info!(session = id, %peer, "connection accepted");

            let handler = ConnectionHandler::new(
                id,
                Some(peer),
                Arc::clone(&self.portfolio),
                Arc::clone(&self.auth),
            );
            let config = Arc::clone(&self.ssh);

            tokio::spawn(async move {
                let result = match russh::server::run_stream(config, stream, handler).await {
                    Ok(session) => session.await,
                    Err(e) => Err(e),
                };
                match result {
                    Ok(()) => tracing::debug!(session = id, "connection closed"),
                    Err(e) => tracing::warn!(session = id, "connection error: {e}"),
                }
            });
        }
    }
}
