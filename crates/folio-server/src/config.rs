//! Server configuration.

use std::{path::PathBuf, time::Duration};

use folio_tui::ThemeName;

/// Default listen address.
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:2222";

/// Default host key location, relative to the working directory.
pub const DEFAULT_HOST_KEY_PATH: &str = ".ssh/host_ed25519";

/// Default idle timeout.
pub const DEFAULT_IDLE_TIMEOUT: Duration = Duration::from_secs(3600);

/// Runtime configuration for [`crate::Server`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// Address to listen on (e.g. "0.0.0.0:2222").
    pub bind_address: String,
    /// OpenSSH private key used as the host key. Created if missing.
    pub host_key_path: PathBuf,
    /// Theme every session is drawn with.
    pub theme: ThemeName,
    /// `authorized_keys` file. When set, only the listed keys may log in.
    pub authorized_keys: Option<PathBuf>,
    /// Accept password logins (any password).
    pub allow_password: bool,
    /// Close connections without traffic for this long.
    pub idle_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: DEFAULT_BIND_ADDRESS.to_string(),
            host_key_path: PathBuf::from(DEFAULT_HOST_KEY_PATH),
            theme: ThemeName::default(),
            authorized_keys: None,
            allow_password: false,
            idle_timeout: DEFAULT_IDLE_TIMEOUT,
        }
    }
}
