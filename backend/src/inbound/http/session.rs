//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The whole authenticated record (user facts plus backend tokens) lives in
//! one sealed cookie entry. Reads never fail outward: a tampered or expired
//! record is purged and reported as "no session" so public endpoints keep
//! working for anonymous visitors.

use actix_session::Session;
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use chrono::Utc;
use futures_util::future::LocalBoxFuture;

use crate::domain::ports::SessionAuth;
use crate::domain::{Error, SessionData, SessionTokens};

pub(crate) const SESSION_DATA_KEY: &str = "session_data";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Fetch the current session record, if one is present and still valid.
    ///
    /// Undecodable and expired records are purged rather than surfaced.
    pub fn current(&self) -> Option<SessionData> {
        let data = match self.0.get::<SessionData>(SESSION_DATA_KEY) {
            Ok(data) => data,
            Err(error) => {
                tracing::warn!(%error, "undecodable session record in cookie; purging");
                self.0.purge();
                return None;
            }
        };
        let data = data?;
        if data.is_expired(Utc::now()) {
            tracing::warn!(user = %data.user_id, "expired session record in cookie; purging");
            self.0.purge();
            return None;
        }
        Some(data)
    }

    /// Require a signed-in user or return `401 Unauthorized`.
    pub fn require(&self) -> Result<SessionData, Error> {
        self.current()
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// Persist a session record into the cookie.
    pub fn persist(&self, data: &SessionData) -> Result<(), Error> {
        self.0
            .insert(SESSION_DATA_KEY, data)
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Drop the session and invalidate the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }

    /// Credentials for port calls: bearer when signed in, anonymous
    /// otherwise.
    pub fn auth(&self) -> SessionAuth {
        self.current()
            .map_or_else(SessionAuth::anonymous, |data| SessionAuth::from(&data))
    }

    /// Write rotated backend tokens back into the session record.
    ///
    /// No-op when nothing was rotated or the session has meanwhile gone.
    pub fn apply_renewal(&self, renewed: Option<SessionTokens>) -> Result<(), Error> {
        let Some(tokens) = renewed else {
            return Ok(());
        };
        let Some(data) = self.current() else {
            return Ok(());
        };
        tracing::debug!("persisting rotated backend tokens into session");
        self.persist(&data.with_tokens(tokens))
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
