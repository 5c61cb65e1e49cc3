//! Session payload stored in the sealed cookie.
//!
//! The session is the proof of authentication: it carries the backend
//! bearer token alongside the profile fields the UI needs without another
//! round trip. Expiry is enforced twice — by the cookie middleware's TTL
//! and by the `expires_at` field checked on every read — so a replayed
//! cookie past its window is treated as no session at all.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Fixed session lifetime.
pub const SESSION_TTL_DAYS: i64 = 7;

/// Bearer credentials for the remote backend.
///
/// The refresh token is optional: the backend only issues one on login, not
/// on every rotation, and mock mode never sees one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokens {
    /// Backend access token presented as `Authorization: Bearer`.
    pub access_token: String,
    /// Token exchanged at `/api/Auth/refresh-token` after a 401.
    pub refresh_token: Option<String>,
    /// Expiry of the refresh token, when known.
    pub refresh_token_expiration: Option<DateTime<Utc>>,
}

/// Authenticated user record kept in the session cookie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionData {
    /// Backend user identifier.
    pub user_id: String,
    /// Account e-mail address.
    pub email: String,
    /// Display name shown in the header.
    pub name: String,
    /// Roles granted by the backend.
    pub roles: Vec<String>,
    /// Whether the account's e-mail address has been confirmed.
    pub email_confirmed: bool,
    /// Backend credentials.
    pub tokens: SessionTokens,
    /// Hard expiry of this session record.
    pub expires_at: DateTime<Utc>,
}

impl SessionData {
    /// Issue a fresh session expiring [`SESSION_TTL_DAYS`] from `now`.
    #[must_use]
    pub fn issue(
        user_id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        roles: Vec<String>,
        email_confirmed: bool,
        tokens: SessionTokens,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
            name: name.into(),
            roles,
            email_confirmed,
            tokens,
            expires_at: now + Duration::days(SESSION_TTL_DAYS),
        }
    }

    /// Whether the session has passed its hard expiry.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Replace the backend credentials after a token rotation, keeping the
    /// refresh token when the rotation did not issue a new one.
    #[must_use]
    pub fn with_tokens(mut self, tokens: SessionTokens) -> Self {
        let previous_refresh = self.tokens.refresh_token.take();
        self.tokens = SessionTokens {
            refresh_token: tokens.refresh_token.or(previous_refresh),
            ..tokens
        };
        self
    }
}
