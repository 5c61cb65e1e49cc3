//! Server configuration from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use url::Url;

use super::session_key::{load_session_key, SessionKeyError};

/// Default session key secret mount.
pub const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Which cart and catalog adapters to wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreMode {
    /// Forward everything to the real backend.
    Remote { base_url: Url },
    /// Fixture catalog plus a locally persisted cart; no backend needed.
    Local { cart_file: Option<PathBuf> },
}

/// Configuration assembled before the server starts.
pub struct ServerConfig {
    pub(crate) store_mode: StoreMode,
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

/// Environment parsing failures, each naming the offending variable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("BACKEND_API_URL is required unless MOCK_STORE=1")]
    MissingBackendUrl,
    #[error("BACKEND_API_URL is not a valid URL: {0}")]
    InvalidBackendUrl(#[from] url::ParseError),
    #[error("BIND_ADDR is not a valid socket address: {0}")]
    InvalidBindAddr(#[from] std::net::AddrParseError),
    #[error(transparent)]
    SessionKey(#[from] SessionKeyError),
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).ok().as_deref() == Some("1")
}

impl ServerConfig {
    /// Assemble the configuration from process environment variables.
    ///
    /// | Variable | Meaning | Default |
    /// |---|---|---|
    /// | `MOCK_STORE` | `1` selects the local fixture store | remote |
    /// | `BACKEND_API_URL` | backend base URL (remote mode) | required |
    /// | `CART_STORAGE_FILE` | cart persistence path (local mode) | in-memory |
    /// | `SESSION_KEY_FILE` | session key secret path | [`DEFAULT_SESSION_KEY_FILE`] |
    /// | `SESSION_ALLOW_EPHEMERAL` | `1` permits a throwaway key | debug builds only |
    /// | `SESSION_COOKIE_SECURE` | `0` drops the Secure cookie flag | secure |
    /// | `BIND_ADDR` | listen address | [`DEFAULT_BIND_ADDR`] |
    pub fn from_env() -> Result<Self, ConfigError> {
        let store_mode = if env_flag("MOCK_STORE") {
            StoreMode::Local {
                cart_file: std::env::var_os("CART_STORAGE_FILE").map(PathBuf::from),
            }
        } else {
            let raw = std::env::var("BACKEND_API_URL")
                .map_err(|_| ConfigError::MissingBackendUrl)?;
            StoreMode::Remote {
                base_url: Url::parse(&raw)?,
            }
        };

        let key_path = std::env::var("SESSION_KEY_FILE")
            .unwrap_or_else(|_| DEFAULT_SESSION_KEY_FILE.to_owned());
        let key = load_session_key(
            std::path::Path::new(&key_path),
            env_flag("SESSION_ALLOW_EPHEMERAL"),
        )?;

        let cookie_secure = std::env::var("SESSION_COOKIE_SECURE")
            .map(|v| v != "0")
            .unwrap_or(true);

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
            .parse()?;

        Ok(Self {
            store_mode,
            key,
            cookie_secure,
            same_site: SameSite::Lax,
            bind_addr,
        })
    }

    /// Configuration for tests: local store, random key, loopback bind.
    #[cfg(any(test, feature = "test-support"))]
    #[must_use]
    pub fn for_tests() -> Self {
        Self {
            store_mode: StoreMode::Local { cart_file: None },
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 0)),
        }
    }

    /// The socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }

    /// The selected store mode.
    #[must_use]
    pub fn store_mode(&self) -> &StoreMode {
        &self.store_mode
    }
}
