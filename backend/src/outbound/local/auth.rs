//! Fixture identity for mock mode.
//!
//! Accepts any credentials that pass form validation and issues throwaway
//! tokens, so the storefront can be exercised end to end with no backend.
//! Refresh tokens are never issued; there is nothing to rotate.

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::ports::{
    AccountStatus, AuthGateway, AuthGatewayError, LoginOutcome, Refreshed, RegisterRequest,
    SessionAuth,
};
use crate::domain::session::SessionTokens;

/// Display name derived from the address: `ada.lovelace@…` becomes
/// "Ada Lovelace".
fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let words: Vec<String> = local
        .split(['.', '_', '-'])
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect();
    if words.is_empty() {
        email.to_owned()
    } else {
        words.join(" ")
    }
}

fn throwaway_tokens() -> SessionTokens {
    SessionTokens {
        access_token: Uuid::new_v4().to_string(),
        refresh_token: None,
        refresh_token_expiration: None,
    }
}

/// Identity gateway that signs anyone in.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureAuthGateway;

#[async_trait]
impl AuthGateway for FixtureAuthGateway {
    async fn login(&self, email: &str, _password: &str) -> Result<LoginOutcome, AuthGatewayError> {
        Ok(LoginOutcome {
            user_id: email.to_owned(),
            email: email.to_owned(),
            name: display_name(email),
            roles: vec!["User".to_owned()],
            email_confirmed: true,
            tokens: throwaway_tokens(),
        })
    }

    async fn register(&self, request: &RegisterRequest) -> Result<String, AuthGatewayError> {
        tracing::info!(email = %request.email, "fixture registration");
        Ok("Account created. Check your inbox for a verification code.".to_owned())
    }

    async fn logout(&self, _auth: &SessionAuth) -> Result<(), AuthGatewayError> {
        Ok(())
    }

    async fn status(
        &self,
        auth: &SessionAuth,
    ) -> Result<Refreshed<AccountStatus>, AuthGatewayError> {
        if auth.is_anonymous() {
            return Err(AuthGatewayError::SessionExpired);
        }
        Ok(Refreshed::plain(AccountStatus {
            authenticated: true,
            username: None,
            user_id: String::new(),
            email: String::new(),
            roles: vec!["User".to_owned()],
            token_expiry: Some(Utc::now() + chrono::Duration::hours(1)),
        }))
    }

    async fn confirm_email(&self, _email: &str, _code: &str) -> Result<(), AuthGatewayError> {
        Ok(())
    }

    async fn resend_verification_code(&self, _email: &str) -> Result<(), AuthGatewayError> {
        Ok(())
    }

    async fn forgot_password(&self, _email: &str) -> Result<(), AuthGatewayError> {
        Ok(())
    }

    async fn reset_password(
        &self,
        _email: &str,
        _code: &str,
        _new_password: &str,
    ) -> Result<(), AuthGatewayError> {
        Ok(())
    }

    async fn refresh(&self, _refresh_token: &str) -> Result<SessionTokens, AuthGatewayError> {
        Err(AuthGatewayError::SessionExpired)
    }

    async fn change_password(
        &self,
        auth: &SessionAuth,
        _current_password: &str,
        _new_password: &str,
    ) -> Result<Refreshed<()>, AuthGatewayError> {
        if auth.is_anonymous() {
            return Err(AuthGatewayError::SessionExpired);
        }
        Ok(Refreshed::plain(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    #[case("ada.lovelace@example.com", "Ada Lovelace")]
    #[case("grace_hopper@example.com", "Grace Hopper")]
    #[case("plain@example.com", "Plain")]
    fn display_names_read_nicely(#[case] email: &str, #[case] expected: &str) {
        assert_eq!(display_name(email), expected);
    }

    #[actix_rt::test]
    async fn login_issues_tokens_without_refresh() {
        let outcome = FixtureAuthGateway
            .login("ada@example.com", "pw")
            .await
            .expect("login");
        assert!(outcome.tokens.refresh_token.is_none());
        assert!(outcome.email_confirmed);
    }
}
