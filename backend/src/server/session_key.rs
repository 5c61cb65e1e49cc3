//! Session key loading.
//!
//! The signing key is read from a mounted secret file. Development builds
//! may fall back to an ephemeral key, which invalidates every session on
//! restart.

use std::path::Path;

use actix_web::cookie::Key;
use sha2::{Digest, Sha256};
use tracing::warn;
use zeroize::Zeroizing;

/// Minimum secret length fed into key derivation.
pub const MIN_KEY_BYTES: usize = 32;

/// Key material loading failures.
#[derive(Debug, thiserror::Error)]
pub enum SessionKeyError {
    #[error("failed to read session key at {path}: {source}")]
    Unreadable {
        path: String,
        source: std::io::Error,
    },
    #[error("session key at {path} is {len} bytes; need at least {MIN_KEY_BYTES}")]
    TooShort { path: String, len: usize },
}

/// First eight bytes of the secret's SHA-256, hex encoded.
///
/// Logged at startup so operators can tell which key a deployment runs
/// with without ever logging the key itself.
#[must_use]
pub fn key_fingerprint(secret: &[u8]) -> String {
    let digest = Sha256::digest(secret);
    hex::encode(&digest[..8])
}

/// Load the session key from `path`.
///
/// When the file is unreadable and `allow_ephemeral` is set (always in
/// debug builds), a random throwaway key is generated instead.
pub fn load_session_key(path: &Path, allow_ephemeral: bool) -> Result<Key, SessionKeyError> {
    let shown = path.display().to_string();
    match std::fs::read(path).map(Zeroizing::new) {
        Ok(secret) if secret.len() < MIN_KEY_BYTES => Err(SessionKeyError::TooShort {
            path: shown,
            len: secret.len(),
        }),
        Ok(secret) => {
            tracing::info!(fingerprint = %key_fingerprint(&secret), "session key loaded");
            Ok(Key::derive_from(&secret))
        }
        Err(source) if cfg!(debug_assertions) || allow_ephemeral => {
            warn!(path = %shown, error = %source, "using ephemeral session key; sessions will not survive restart");
            Ok(Key::generate())
        }
        Err(source) => Err(SessionKeyError::Unreadable {
            path: shown,
            source,
        }),
    }
}
