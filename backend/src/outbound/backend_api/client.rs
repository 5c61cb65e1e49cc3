//! Shared HTTP plumbing for the backend REST API.
//!
//! Owns the reqwest client, envelope normalisation, and the
//! refresh-and-retry rule: when an authenticated call comes back 401, the
//! refresh token is exchanged once and the original request replayed with
//! the rotated access token. A second 401, or a missing refresh token,
//! ends the session.

use std::time::Duration;

use bytes::Bytes;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::dto::{RefreshTokenDto, TokenBundleDto};
use super::envelope::{decode_envelope, EnvelopeRejection};
use crate::domain::ports::{Refreshed, SessionAuth};
use crate::domain::session::SessionTokens;

/// Default per-request deadline for backend calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failure modes shared by every backend call, mapped into the specific
/// port error by each adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallError {
    Transport(String),
    Timeout(String),
    Decode(String),
    Rejected {
        status: u16,
        message: String,
        errors: Vec<String>,
    },
    SessionExpired,
}

impl From<EnvelopeRejection> for CallError {
    fn from(rejection: EnvelopeRejection) -> Self {
        Self::Rejected {
            status: rejection.status,
            message: rejection.message,
            errors: rejection.errors,
        }
    }
}

/// HTTP client bound to one backend base URL.
pub struct BackendApiClient {
    client: Client,
    base_url: Url,
}

impl BackendApiClient {
    /// Build a client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(mut base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        // Url::join drops the final path segment of a base without a
        // trailing slash, which would silently swallow a reverse-proxy
        // prefix.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, CallError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|error| CallError::Transport(format!("invalid endpoint {path}: {error}")))
    }

    /// Start a request against a backend path relative to the base URL.
    pub(super) fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, CallError> {
        Ok(self.client.request(method, self.endpoint(path)?))
    }

    async fn perform(&self, builder: RequestBuilder) -> Result<(StatusCode, Bytes), CallError> {
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        Ok((status, body))
    }

    /// Dispatch an unauthenticated request and normalise the envelope.
    ///
    /// `Ok(None)` means the backend reported success without a payload.
    pub(super) async fn call<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<Option<T>, CallError> {
        let (status, body) = self.perform(builder).await?;
        Ok(decode_envelope::<T>(status.as_u16(), &body).into_result(status.as_u16())?)
    }

    /// Dispatch an authenticated request, refreshing the access token and
    /// retrying once on 401.
    ///
    /// `build` is invoked with the access token to use, so the retry can
    /// rebuild the request with the rotated token.
    pub(super) async fn call_authed<T, F>(
        &self,
        auth: &SessionAuth,
        build: F,
    ) -> Result<Refreshed<Option<T>>, CallError>
    where
        T: DeserializeOwned,
        F: Fn(&Self, &str) -> Result<RequestBuilder, CallError> + Send + Sync,
    {
        let access = auth.access_token().ok_or(CallError::SessionExpired)?;
        let (status, body) = self.perform(build(self, access)?).await?;
        let envelope = decode_envelope::<T>(status.as_u16(), &body);
        if !is_unauthorized(status, envelope.effective_status(status.as_u16())) {
            return Ok(Refreshed::plain(envelope.into_result(status.as_u16())?));
        }

        let Some(refresh_token) = auth.refresh_token() else {
            return Err(CallError::SessionExpired);
        };
        tracing::debug!("access token rejected; exchanging refresh token");
        let tokens = match self.refresh_tokens(refresh_token).await {
            Ok(tokens) => tokens,
            Err(CallError::Rejected { .. } | CallError::SessionExpired) => {
                return Err(CallError::SessionExpired);
            }
            Err(other) => return Err(other),
        };

        let (status, body) = self.perform(build(self, &tokens.access_token)?).await?;
        let envelope = decode_envelope::<T>(status.as_u16(), &body);
        if is_unauthorized(status, envelope.effective_status(status.as_u16())) {
            return Err(CallError::SessionExpired);
        }
        let value = envelope.into_result(status.as_u16())?;
        Ok(Refreshed::renewed(value, tokens))
    }

    /// Exchange a refresh token for a rotated token pair.
    pub(super) async fn refresh_tokens(
        &self,
        refresh_token: &str,
    ) -> Result<SessionTokens, CallError> {
        let builder = self
            .request(Method::POST, "api/Auth/refresh-token")?
            .json(&RefreshTokenDto { refresh_token });
        let data: Option<TokenBundleDto> = self.call(builder).await?;
        let dto = data.ok_or_else(|| {
            CallError::Decode("refresh-token response carried no data".to_owned())
        })?;
        Ok(dto.into_tokens())
    }
}

fn is_unauthorized(http_status: StatusCode, envelope_status: u16) -> bool {
    http_status == StatusCode::UNAUTHORIZED
        || envelope_status == StatusCode::UNAUTHORIZED.as_u16()
}

fn map_transport_error(error: reqwest::Error) -> CallError {
    if error.is_timeout() {
        CallError::Timeout(error.to_string())
    } else {
        CallError::Transport(error.to_string())
    }
}
