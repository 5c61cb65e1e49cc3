//! Driven ports owned by the domain.
//!
//! Each port is an async trait the HTTP adapters depend on through
//! `Arc<dyn Port>`; the outbound crates provide the remote (REST backend)
//! and local (fixture/mock) implementations. Authenticated operations take
//! a [`SessionAuth`] and return a [`Refreshed`] wrapper so a token rotation
//! performed inside an adapter can be written back to the caller's session.

mod auth_gateway;
mod cart_store;
mod catalog_source;
pub(crate) mod macros;

pub use auth_gateway::{AccountStatus, AuthGateway, AuthGatewayError, LoginOutcome, RegisterRequest};
pub use cart_store::{AddItemRequest, CartStore, CartStoreError, ClearedCart};
pub use catalog_source::{CatalogSource, CatalogSourceError};

#[cfg(test)]
pub use auth_gateway::MockAuthGateway;
#[cfg(test)]
pub use cart_store::MockCartStore;
#[cfg(test)]
pub use catalog_source::MockCatalogSource;

use super::session::{SessionData, SessionTokens};

/// Credentials a port operation acts under.
///
/// Anonymous calls are legal for the cart in local mode and for the public
/// catalog; the remote adapters reject them where the backend requires a
/// bearer token.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionAuth {
    access_token: Option<String>,
    refresh_token: Option<String>,
}

impl SessionAuth {
    /// No credentials attached.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Bearer credentials, optionally with a refresh token for retry.
    #[must_use]
    pub fn bearer(access_token: impl Into<String>, refresh_token: Option<String>) -> Self {
        Self {
            access_token: Some(access_token.into()),
            refresh_token,
        }
    }

    /// Access token to present as `Authorization: Bearer`, when present.
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    /// Refresh token available for a single rotate-and-retry, when present.
    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    /// True when no access token is attached.
    pub fn is_anonymous(&self) -> bool {
        self.access_token.is_none()
    }
}

impl From<&SessionData> for SessionAuth {
    fn from(session: &SessionData) -> Self {
        Self {
            access_token: Some(session.tokens.access_token.clone()),
            refresh_token: session.tokens.refresh_token.clone(),
        }
    }
}

/// Result of an authenticated port operation, carrying rotated credentials
/// when the adapter refreshed the access token mid-call.
///
/// The session layer persists `renewed` so the cookie keeps working after
/// the backend expires the original token.
#[derive(Debug, Clone, PartialEq)]
pub struct Refreshed<T> {
    pub value: T,
    pub renewed: Option<SessionTokens>,
}

impl<T> Refreshed<T> {
    /// Wrap a value produced without any token rotation.
    #[must_use]
    pub fn plain(value: T) -> Self {
        Self {
            value,
            renewed: None,
        }
    }

    /// Wrap a value produced after rotating the tokens.
    #[must_use]
    pub fn renewed(value: T, tokens: SessionTokens) -> Self {
        Self {
            value,
            renewed: Some(tokens),
        }
    }

    /// Transform the carried value, preserving any rotation.
    #[must_use]
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Refreshed<U> {
        Refreshed {
            value: f(self.value),
            renewed: self.renewed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn tokens() -> SessionTokens {
        SessionTokens {
            access_token: "access".into(),
            refresh_token: Some("refresh".into()),
            refresh_token_expiration: None,
        }
    }

    #[test]
    fn session_auth_from_session_data_carries_both_tokens() {
        let session = SessionData::issue(
            "user-1",
            "ada@example.com",
            "Ada",
            vec!["User".into()],
            true,
            tokens(),
            Utc::now(),
        );
        let auth = SessionAuth::from(&session);
        assert_eq!(auth.access_token(), Some("access"));
        assert_eq!(auth.refresh_token(), Some("refresh"));
        assert!(!auth.is_anonymous());
    }

    #[test]
    fn anonymous_auth_has_no_tokens() {
        let auth = SessionAuth::anonymous();
        assert!(auth.is_anonymous());
        assert_eq!(auth.refresh_token(), None);
    }

    #[test]
    fn map_preserves_renewed_tokens() {
        let refreshed = Refreshed::renewed(2_u32, tokens()).map(|n| n * 10);
        assert_eq!(refreshed.value, 20);
        assert!(refreshed.renewed.is_some());
    }
}
