//! folio server binary.
//!
//! # Usage
//!
//! ```bash
//! # Serve on port 2222 with a generated host key
//! folio-server
//!
//! # Only let listed keys in, with the kanagawa theme
//! folio-server --bind 0.0.0.0:22 --authorized-keys ~/.ssh/authorized_keys --theme kanagawa
//! ```

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use folio_server::{DEFAULT_BIND_ADDRESS, DEFAULT_HOST_KEY_PATH, Server, ServerConfig};
use folio_tui::ThemeName;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Portfolio served over SSH
#[derive(Parser, Debug)]
#[command(name = "folio-server")]
#[command(about = "Serve an interactive portfolio over SSH")]
#[command(version)]
struct Args {
    /// Address to bind to
    #[arg(short, long, default_value = DEFAULT_BIND_ADDRESS)]
    bind: String,

    /// Host key in OpenSSH format (generated if missing)
    #[arg(long, default_value = DEFAULT_HOST_KEY_PATH)]
    host_key: PathBuf,

    /// Color theme (tokyo-night, kanagawa, mono)
    #[arg(short, long, default_value = "tokyo-night")]
    theme: ThemeName,

    /// Only accept public keys listed in this authorized_keys file
    #[arg(long)]
    authorized_keys: Option<PathBuf>,

    /// Accept password logins with any password
    #[arg(long)]
    allow_password: bool,

    /// Close connections idle for this many seconds
    #[arg(long, default_value = "3600")]
    idle_timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            bind_address: self.bind,
            host_key_path: self.host_key,
            theme: self.theme,
            authorized_keys: self.authorized_keys,
            allow_password: self.allow_password,
            idle_timeout: Duration::from_secs(self.idle_timeout_secs),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    tracing::info!("folio server starting");

    if args.allow_password {
        tracing::warn!("password logins enabled, any password is accepted");
    }

    let server = Server::bind(args.into_config()).await?;
    server.run().await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_server_config() {
        let config = Args::parse_from(["folio-server"]).into_config();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn flags_are_applied() {
        let config = Args::parse_from([
            "folio-server",
            "--bind",
            "127.0.0.1:0",
            "--theme",
            "mono",
            "--authorized-keys",
            "keys",
            "--allow-password",
            "--idle-timeout-secs",
            "5",
        ])
        .into_config();

        assert_eq!(config.bind_address, "127.0.0.1:0");
        assert_eq!(config.theme, ThemeName::Mono);
        assert_eq!(config.authorized_keys, Some(PathBuf::from("keys")));
        assert!(config.allow_password);
        assert_eq!(config.idle_timeout, Duration::from_secs(5));
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(Args::try_parse_from(["folio-server", "--theme", "solarized"]).is_err());
    }
}
