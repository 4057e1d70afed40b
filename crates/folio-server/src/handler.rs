//! SSH connection handler.
//!
//! One [`ConnectionHandler`] exists per TCP connection. It answers
//! authentication, accepts a single session channel and, once the client asks
//! for a shell on a PTY, spawns a [`SessionRuntime`] for it. Later input and
//! window changes are forwarded to that runtime in arrival order.

use std::{net::SocketAddr, sync::Arc};

use russh::{
    Channel, ChannelId, CryptoVec, Pty,
    keys::PublicKey,
    server::{Auth, Handle, Handler, Msg, Session},
};
use tokio::sync::mpsc;

use crate::{
    AuthPolicy, ServerError,
    session::{
        EVENT_QUEUE, MAX_SIZE, Portfolio, SessionEnd, SessionEvent, SessionRuntime, TICK_INTERVAL,
    },
    terminal::{self, ChannelWriter},
};

const NO_PTY_MESSAGE: &[u8] = b"no active terminal, skipping\r\n";

/// Per-connection SSH handler.
pub struct ConnectionHandler {
    id: u64,
    peer: Option<SocketAddr>,
    portfolio: Arc<Portfolio>,
    auth: Arc<AuthPolicy>,
    channel: Option<ChannelId>,
    pty_size: Option<(u16, u16)>,
    events: Option<mpsc::Sender<SessionEvent>>,
}

impl ConnectionHandler {
    /// Create a handler for a connection from `peer`.
    pub fn new(
        id: u64,
        peer: Option<SocketAddr>,
        portfolio: Arc<Portfolio>,
        auth: Arc<AuthPolicy>,
    ) -> Self {
        Self { id, peer, portfolio, auth, channel: None, pty_size: None, events: None }
    }

    /// Forward an event to the running session, if any.
    ///
    /// Waits while the session's queue is full.
    async fn forward(&mut self, event: SessionEvent) {
        let delivered = match &self.events {
            Some(events) => events.send(event).await.is_ok(),
            None => false,
        };
        if !delivered {
            self.events = None;
        }
    }

    /// Apply a window change to the running session, or to the pty size the
    /// session will start with.
    async fn resize(&mut self, (cols, rows): (u16, u16)) {
        if self.events.is_some() {
            self.forward(SessionEvent::Resize(cols, rows)).await;
        } else if self.pty_size.is_some() {
            self.pty_size = Some((cols, rows));
        }
    }

    fn decision(&self, method: &'static str, user: &str, accepted: bool) -> Auth {
        tracing::info!(
            session = self.id,
            peer = ?self.peer,
            user,
            method,
            accepted,
            "authentication"
        );
        if accepted {
            Auth::Accept
        } else {
            Auth::Reject { proceed_with_methods: None, partial_success: false }
        }
    }
}

impl Handler for ConnectionHandler {
    type Error = ServerError;

    async fn auth_publickey_offered(
        &mut self,
        _user: &str,
        public_key: &PublicKey,
    ) -> Result<Auth, Self::Error> {
        if self.auth.accepts_key(public_key) {
            Ok(Auth::Accept)
        } else {
            Ok(Auth::Reject { proceed_with_methods: None, partial_success: false })
        }
    }

    async fn auth_publickey(
        &mut self,
        user: &str,
        public_key: &PublicKey,
    ) -> Result<Auth, Self::Error> {
        Ok(self.decision("publickey", user, self.auth.accepts_key(public_key)))
    }

    async fn auth_password(&mut self, user: &str, _password: &str) -> Result<Auth, Self::Error> {
        Ok(self.decision("password", user, self.auth.accepts_password()))
    }

    async fn channel_open_session(
        &mut self,
        channel: Channel<Msg>,
        _session: &mut Session,
    ) -> Result<bool, Self::Error> {
        if self.channel.is_some() {
            tracing::debug!(session = self.id, "refused second session channel");
            return Ok(false);
        }
        self.channel = Some(channel.id());
        Ok(true)
    }

    async fn pty_request(
        &mut self,
        channel: ChannelId,
        term: &str,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _modes: &[(Pty, u32)],
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        let size = terminal_size(col_width, row_height);
        tracing::debug!(session = self.id, term, cols = size.0, rows = size.1, "pty requested");
        self.pty_size = Some(size);
        session.channel_success(channel)?;
        Ok(())
    }

    async fn shell_request(
        &mut self,
        channel: ChannelId,
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        let Some(size) = self.pty_size else {
            tracing::info!(session = self.id, "shell without pty, closing");
            session.data(channel, CryptoVec::from_slice(NO_PTY_MESSAGE))?;
            session.exit_status_request(channel, 1)?;
            session.close(channel)?;
            return Ok(());
        };

        let (events, receiver) = mpsc::channel(EVENT_QUEUE);
        self.events = Some(events);
        session.channel_success(channel)?;

        tokio::spawn(serve(
            self.id,
            session.handle(),
            channel,
            Arc::clone(&self.portfolio),
            size,
            receiver,
        ));
        Ok(())
    }

    async fn window_change_request(
        &mut self,
        _channel: ChannelId,
        col_width: u32,
        row_height: u32,
        _pix_width: u32,
        _pix_height: u32,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        self.resize(terminal_size(col_width, row_height)).await;
        Ok(())
    }

    async fn data(
        &mut self,
        _channel: ChannelId,
        data: &[u8],
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        self.forward(SessionEvent::Input(data.to_vec())).await;
        Ok(())
    }

    async fn channel_eof(
        &mut self,
        channel: ChannelId,
        session: &mut Session,
    ) -> Result<(), Self::Error> {
        tracing::debug!(session = self.id, "client sent eof, closing");
        self.events = None;
        session.close(channel)?;
        Ok(())
    }

    async fn channel_close(
        &mut self,
        _channel: ChannelId,
        _session: &mut Session,
    ) -> Result<(), Self::Error> {
        self.events = None;
        Ok(())
    }
}

/// Terminal size reported by the client, limited to [`MAX_SIZE`].
fn terminal_size(cols: u32, rows: u32) -> (u16, u16) {
    (clamp(cols, MAX_SIZE.0), clamp(rows, MAX_SIZE.1))
}

fn clamp(value: u32, max: u16) -> u16 {
    u16::try_from(value).map_or(max, |value| value.min(max))
}

/// Run one session to completion and close its channel.
async fn serve(
    id: u64,
    handle: Handle,
    channel: ChannelId,
    portfolio: Arc<Portfolio>,
    size: (u16, u16),
    events: mpsc::Receiver<SessionEvent>,
) {
    tracing::info!(session = id, cols = size.0, rows = size.1, "session started");

    let (writer, chunks) = ChannelWriter::new();
    let output = tokio::spawn(terminal::forward(handle.clone(), channel, chunks));

    let result = match SessionRuntime::new(writer, portfolio, size) {
        Ok(runtime) => runtime.run(events, TICK_INTERVAL).await,
        Err(e) => Err(e),
    };
    if let Err(e) = output.await {
        tracing::warn!(session = id, "output task failed: {e}");
    }

    match result {
        Ok(SessionEnd::Quit) => {
            tracing::info!(session = id, "session ended by visitor");
            let _ = handle.exit_status_request(channel, 0).await;
            let _ = handle.eof(channel).await;
            let _ = handle.close(channel).await;
        },
        Ok(SessionEnd::Disconnected) => {
            tracing::info!(session = id, "session ended by disconnect");
        },
        Err(e) => {
            tracing::warn!(session = id, "session failed: {e}");
            let _ = handle.close(channel).await;
        },
    }
}
