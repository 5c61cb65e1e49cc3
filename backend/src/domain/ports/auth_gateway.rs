//! Driven port for account operations against the identity backend.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::macros::define_port_error;
use super::{Refreshed, SessionAuth};
use crate::domain::session::SessionTokens;

/// Sign-up payload forwarded to the backend after form validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterRequest {
    pub user_name: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Successful login: the facts the session cookie is issued from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginOutcome {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub email_confirmed: bool,
    pub tokens: SessionTokens,
}

/// Live account facts fetched from the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountStatus {
    pub authenticated: bool,
    pub username: Option<String>,
    pub user_id: String,
    pub email: String,
    pub roles: Vec<String>,
    pub token_expiry: Option<DateTime<Utc>>,
}

define_port_error! {
    /// Errors surfaced while calling the identity backend.
    pub enum AuthGatewayError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "auth backend unreachable: {message}",
        /// The call exceeded its deadline.
        Timeout { message: String } =>
            "auth backend timed out: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "auth backend response decode failed: {message}",
        /// The backend answered with a failure envelope or error status.
        /// `errors` carries the envelope's per-item failure strings.
        Rejected { status: u16, message: String, errors: Vec<String> } =>
            "auth backend rejected the request ({status}): {message}",
        /// The access token expired and could not be refreshed.
        SessionExpired =>
            "Your session has expired. Please sign in again.",
    }
}

impl AuthGatewayError {
    /// Backend status code, when the backend produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Port for the backend's `/api/Auth` surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Exchange credentials for tokens and the user profile.
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthGatewayError>;

    /// Create an account; returns the backend's confirmation message.
    async fn register(&self, request: &RegisterRequest) -> Result<String, AuthGatewayError>;

    /// Invalidate the backend session for these credentials.
    async fn logout(&self, auth: &SessionAuth) -> Result<(), AuthGatewayError>;

    /// Fetch live account flags for the signed-in user.
    async fn status(&self, auth: &SessionAuth) -> Result<Refreshed<AccountStatus>, AuthGatewayError>;

    /// Confirm an e-mail address with the emailed verification code.
    async fn confirm_email(&self, email: &str, code: &str) -> Result<(), AuthGatewayError>;

    /// Ask the backend to send a fresh verification code.
    async fn resend_verification_code(&self, email: &str) -> Result<(), AuthGatewayError>;

    /// Start the password-reset flow for an e-mail address.
    async fn forgot_password(&self, email: &str) -> Result<(), AuthGatewayError>;

    /// Complete the password-reset flow with the emailed code.
    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthGatewayError>;

    /// Exchange a refresh token for a rotated token pair.
    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, AuthGatewayError>;

    /// Change the password of the signed-in user.
    async fn change_password(
        &self,
        auth: &SessionAuth,
        current_password: &str,
        new_password: &str,
    ) -> Result<Refreshed<()>, AuthGatewayError>;
}
