//! Authentication policy.
//!
//! The portfolio is public, so by default every public key is accepted. An
//! `authorized_keys` file narrows that to the listed keys. Password logins
//! are refused unless explicitly enabled, in which case any password works.

use std::{fs, path::Path};

use russh::keys::ssh_key::{AuthorizedKeys, PublicKey, public::KeyData};

use crate::ServerError;

/// Which credentials open a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthPolicy {
    /// Accepted keys. `None` accepts any key.
    allowed_keys: Option<Vec<KeyData>>,
    allow_password: bool,
}

impl AuthPolicy {
    /// Accept any public key; refuse passwords unless `allow_password`.
    pub fn open(allow_password: bool) -> Self {
        Self { allowed_keys: None, allow_password }
    }

    /// Accept only the keys listed in `authorized_keys` text.
    pub fn from_authorized_keys(text: &str, allow_password: bool) -> Result<Self, ServerError> {
        let keys = AuthorizedKeys::new(text)
            .map(|entry| {
                entry
                    .map(|entry| entry.public_key().key_data().clone())
                    .map_err(|e| ServerError::Config(format!("authorized_keys: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        if keys.is_empty() {
            tracing::warn!("authorized_keys lists no keys, public key logins will be refused");
        }
        Ok(Self { allowed_keys: Some(keys), allow_password })
    }

    /// Build the policy from an optional `authorized_keys` file.
    pub fn load(authorized_keys: Option<&Path>, allow_password: bool) -> Result<Self, ServerError> {
        let Some(path) = authorized_keys else {
            return Ok(Self::open(allow_password));
        };

        let text = fs::read_to_string(path)
            .map_err(|e| ServerError::Config(format!("{}: {e}", path.display())))?;
        let policy = Self::from_authorized_keys(&text, allow_password)?;
        tracing::info!(
            path = %path.display(),
            keys = policy.allowed_keys.as_ref().map_or(0, Vec::len),
            "loaded authorized keys"
        );
        Ok(policy)
    }

    /// Whether `key` may log in.
    pub fn accepts_key(&self, key: &PublicKey) -> bool {
        self.allowed_keys.as_ref().is_none_or(|keys| keys.contains(key.key_data()))
    }

    /// Whether password logins are accepted.
    pub fn accepts_password(&self) -> bool {
        self.allow_password
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::OsRng;
    use russh::keys::{Algorithm, PrivateKey};

    use super::*;

    fn public_key() -> PublicKey {
        PrivateKey::random(&mut OsRng, Algorithm::Ed25519).unwrap().public_key().clone()
    }

    #[test]
    fn open_policy_accepts_any_key() {
        let policy = AuthPolicy::open(false);

        assert!(policy.accepts_key(&public_key()));
        assert!(!policy.accepts_password());
    }

    #[test]
    fn allowlist_accepts_only_listed_keys() {
        let listed = public_key();
        let text = format!("# visitors\n{}\n", listed.to_openssh().unwrap());

        let policy = AuthPolicy::from_authorized_keys(&text, true).unwrap();

        assert!(policy.accepts_key(&listed));
        assert!(!policy.accepts_key(&public_key()));
        assert!(policy.accepts_password());
    }

    #[test]
    fn comment_on_key_line_is_ignored() {
        let listed = public_key();
        let mut line = listed.clone();
        line.set_comment("joe@laptop");
        let text = line.to_openssh().unwrap();

        let policy = AuthPolicy::from_authorized_keys(&text, false).unwrap();

        assert!(policy.accepts_key(&listed));
    }

    #[test]
    fn empty_allowlist_refuses_everyone() {
        let policy = AuthPolicy::from_authorized_keys("", false).unwrap();
        assert!(!policy.accepts_key(&public_key()));
    }

    #[test]
    fn malformed_line_is_config_error() {
        let err = AuthPolicy::from_authorized_keys("ssh-ed25519 !!!", false).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AuthPolicy::load(Some(&dir.path().join("nope")), false).unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }
}
