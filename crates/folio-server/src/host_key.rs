//! Host key loading.
//!
//! The server identifies itself with an Ed25519 key stored in OpenSSH format.
//! On first start the key does not exist yet; it is generated and written so
//! that clients see the same fingerprint across restarts.

use std::{fs, path::Path};

use rand::rngs::OsRng;
use russh::keys::ssh_key::LineEnding;
use russh::keys::{Algorithm, HashAlg, PrivateKey};

use crate::ServerError;

/// Load the host key at `path`, generating it first if the file is missing.
pub fn load_or_generate(path: &Path) -> Result<PrivateKey, ServerError> {
    if path.exists() {
        let key = russh::keys::load_secret_key(path, None)
            .map_err(|e| ServerError::HostKey(format!("{}: {e}", path.display())))?;
        tracing::info!(
            path = %path.display(),
            fingerprint = %key.public_key().fingerprint(HashAlg::Sha256),
            "loaded host key"
        );
        return Ok(key);
    }

    let key = PrivateKey::random(&mut OsRng, Algorithm::Ed25519)
        .map_err(|e| ServerError::HostKey(format!("generate: {e}")))?;

    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    key.write_openssh_file(path, LineEnding::LF)
        .map_err(|e| ServerError::HostKey(format!("{}: {e}", path.display())))?;

    tracing::info!(
        path = %path.display(),
        fingerprint = %key.public_key().fingerprint(HashAlg::Sha256),
        "generated host key"
    );
    Ok(key)
}
