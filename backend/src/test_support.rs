//! Shared helpers for unit tests in `src/` and integration tests in
//! `tests/`. Compiled only for tests or with the `test-support` feature.

use std::sync::Arc;

use actix_session::config::CookieContentSecurity;
use actix_session::storage::CookieSessionStore;
use actix_session::SessionMiddleware;
use actix_web::cookie::{Key, SameSite};
use chrono::Utc;

use crate::domain::session::{SessionData, SessionTokens};
use crate::inbound::http::HttpState;
use crate::outbound::local::{FixtureAuthGateway, FixtureCatalog, LocalCartStore, MemoryStorage};

/// Cookie session middleware with a fresh random key, matching the
/// production cookie settings apart from `Secure`.
#[must_use]
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".into())
        .cookie_secure(false)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(SameSite::Lax)
        .build()
}

/// A signed-in session record for Ada, carrying a refresh token so token
/// rotation paths can be exercised.
#[must_use]
pub fn fixture_session() -> SessionData {
    SessionData::issue(
        "ada",
        "ada@example.com",
        "Ada Lovelace",
        vec!["User".to_owned()],
        true,
        SessionTokens {
            access_token: "access-fixture".to_owned(),
            refresh_token: Some("refresh-fixture".to_owned()),
            refresh_token_expiration: None,
        },
        Utc::now(),
    )
}

/// Handler state wired entirely from in-process fixtures.
#[must_use]
pub fn local_http_state() -> HttpState {
    HttpState::new(
        Arc::new(FixtureAuthGateway),
        Arc::new(FixtureCatalog),
        Arc::new(LocalCartStore::new(MemoryStorage::default())),
    )
}
