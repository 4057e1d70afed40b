//! Server error types.

use std::io;

use thiserror::Error;

/// Errors that stop the server or a connection.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Invalid configuration (unreadable allowlist, bad key line, etc.).
    ///
    /// Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// Host key could not be loaded, generated or written.
    ///
    /// Fatal at startup.
    #[error("host key error: {0}")]
    HostKey(String),

    /// Listener or socket failure.
    ///
    /// Fatal when raised by bind or accept, otherwise ends one connection.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// SSH protocol failure on one connection.
    #[error("SSH error: {0}")]
    Ssh(#[from] russh::Error),
}

/// Errors that end a single session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Writing to the terminal failed.
    #[error("terminal I/O error: {0}")]
    Io(io::Error),

    /// The client went away while output was pending.
    #[error("session channel closed")]
    ChannelClosed,
}

impl From<io::Error> for SessionError {
    fn from(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::BrokenPipe {
            Self::ChannelClosed
        } else {
            Self::Io(err)
        }
    }
}
