//! Remote [`AuthGateway`] forwarding to the backend's `/api/Auth` surface.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use super::client::{BackendApiClient, CallError};
use super::dto::{
    AuthStatusDto, ChangePasswordDto, ConfirmEmailDto, ForgotPasswordDto, LoginRequestDto,
    RegisterRequestDto, ResendVerificationDto, ResetPasswordDto, TokenBundleDto,
    EMAIL_VERIFICATION_TYPE,
};
use crate::domain::ports::{
    AccountStatus, AuthGateway, AuthGatewayError, LoginOutcome, Refreshed, RegisterRequest,
    SessionAuth,
};
use crate::domain::session::SessionTokens;

pub struct RemoteAuthGateway {
    client: Arc<BackendApiClient>,
}

impl RemoteAuthGateway {
    pub fn new(client: Arc<BackendApiClient>) -> Self {
        Self { client }
    }
}

fn map_call_error(error: CallError) -> AuthGatewayError {
    match error {
        CallError::Transport(message) => AuthGatewayError::transport(message),
        CallError::Timeout(message) => AuthGatewayError::timeout(message),
        CallError::Decode(message) => AuthGatewayError::decode(message),
        CallError::Rejected {
            status,
            message,
            errors,
        } => AuthGatewayError::rejected(status, message, errors),
        CallError::SessionExpired => AuthGatewayError::SessionExpired,
    }
}

fn require_data<T>(data: Option<T>, endpoint: &str) -> Result<T, AuthGatewayError> {
    data.ok_or_else(|| AuthGatewayError::decode(format!("{endpoint} response carried no data")))
}

#[async_trait]
impl AuthGateway for RemoteAuthGateway {
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, AuthGatewayError> {
        let builder = self
            .client
            .request(Method::POST, "api/Auth/login")
            .map_err(map_call_error)?
            .json(&LoginRequestDto { email, password });
        let data: Option<TokenBundleDto> =
            self.client.call(builder).await.map_err(map_call_error)?;
        let bundle = require_data(data, "login")?;
        if !bundle.is_authenticated {
            // Observed when the backend issues a token despite flagging the
            // account; surface it rather than trusting either signal blindly.
            tracing::warn!(username = %bundle.username, "login succeeded without isAuthenticated");
        }
        Ok(bundle.into_outcome())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<String, AuthGatewayError> {
        let builder = self
            .client
            .request(Method::POST, "api/Auth/register")
            .map_err(map_call_error)?
            .json(&RegisterRequestDto {
                user_name: &request.user_name,
                full_name: &request.full_name,
                email: &request.email,
                password: &request.password,
                confirm_password: &request.confirm_password,
            });
        let data: Option<TokenBundleDto> =
            self.client.call(builder).await.map_err(map_call_error)?;
        Ok(data
            .and_then(|dto| dto.message)
            .unwrap_or_else(|| "Account created. Check your inbox for a verification code.".to_owned()))
    }

    async fn logout(&self, auth: &SessionAuth) -> Result<(), AuthGatewayError> {
        let Some(access) = auth.access_token() else {
            // Nothing to invalidate backend-side.
            return Ok(());
        };
        let builder = self
            .client
            .request(Method::POST, "api/Auth/logout")
            .map_err(map_call_error)?
            .bearer_auth(access);
        // A backend rejection still ends the local session; only transport
        // failures are worth reporting.
        match self.client.call::<bool>(builder).await {
            Ok(_) | Err(CallError::Rejected { .. } | CallError::SessionExpired) => Ok(()),
            Err(other) => Err(map_call_error(other)),
        }
    }

    async fn status(
        &self,
        auth: &SessionAuth,
    ) -> Result<Refreshed<AccountStatus>, AuthGatewayError> {
        let refreshed = self
            .client
            .call_authed::<AuthStatusDto, _>(auth, |client, token| {
                Ok(client
                    .request(Method::GET, "api/Auth/status")?
                    .bearer_auth(token))
            })
            .await
            .map_err(map_call_error)?;
        let Refreshed { value, renewed } = refreshed;
        let dto = require_data(value, "status")?;
        Ok(Refreshed {
            value: AccountStatus {
                authenticated: dto.is_authenticated,
                username: dto.username,
                user_id: dto.user_id,
                email: dto.email,
                roles: dto.roles,
                token_expiry: dto.token_expiry,
            },
            renewed,
        })
    }

    async fn confirm_email(&self, email: &str, code: &str) -> Result<(), AuthGatewayError> {
        let builder = self
            .client
            .request(Method::POST, "api/Auth/confirm-email")
            .map_err(map_call_error)?
            .json(&ConfirmEmailDto { email, code });
        self.client
            .call::<serde_json::Value>(builder)
            .await
            .map_err(map_call_error)?;
        Ok(())
    }

    async fn resend_verification_code(&self, email: &str) -> Result<(), AuthGatewayError> {
        let builder = self
            .client
            .request(Method::POST, "api/Auth/resend-verification-code")
            .map_err(map_call_error)?
            .json(&ResendVerificationDto {
                email,
                verification_type: EMAIL_VERIFICATION_TYPE,
            });
        self.client
            .call::<serde_json::Value>(builder)
            .await
            .map_err(map_call_error)?;
        Ok(())
    }

    async fn forgot_password(&self, email: &str) -> Result<(), AuthGatewayError> {
        let builder = self
            .client
            .request(Method::POST, "api/Auth/forgot-password")
            .map_err(map_call_error)?
            .json(&ForgotPasswordDto { email });
        self.client
            .call::<serde_json::Value>(builder)
            .await
            .map_err(map_call_error)?;
        Ok(())
    }

    async fn reset_password(
        &self,
        email: &str,
        code: &str,
        new_password: &str,
    ) -> Result<(), AuthGatewayError> {
        let builder = self
            .client
            .request(Method::POST, "api/Auth/reset-password")
            .map_err(map_call_error)?
            .json(&ResetPasswordDto {
                email,
                code,
                new_password,
                confirm_password: new_password,
            });
        self.client
            .call::<serde_json::Value>(builder)
            .await
            .map_err(map_call_error)?;
        Ok(())
    }

    async fn refresh(&self, refresh_token: &str) -> Result<SessionTokens, AuthGatewayError> {
        self.client
            .refresh_tokens(refresh_token)
            .await
            .map_err(map_call_error)
    }

    async fn change_password(
        &self,
        auth: &SessionAuth,
        current_password: &str,
        new_password: &str,
    ) -> Result<Refreshed<()>, AuthGatewayError> {
        let refreshed = self
            .client
            .call_authed::<serde_json::Value, _>(auth, |client, token| {
                Ok(client
                    .request(Method::POST, "api/Auth/change-password")?
                    .bearer_auth(token)
                    .json(&ChangePasswordDto {
                        current_password,
                        new_password,
                        confirm_password: new_password,
                    }))
            })
            .await
            .map_err(map_call_error)?;
        Ok(refreshed.map(|_| ()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn call_errors_map_onto_gateway_errors() {
        let mapped = map_call_error(CallError::Rejected {
            status: 400,
            message: "Invalid credentials".to_owned(),
            errors: vec!["Email is required".to_owned()],
        });
        assert_eq!(mapped.status(), Some(400));
        assert!(matches!(
            mapped,
            AuthGatewayError::Rejected { ref errors, .. } if errors.len() == 1
        ));

        assert_eq!(
            map_call_error(CallError::SessionExpired),
            AuthGatewayError::SessionExpired
        );
    }

    #[test]
    fn missing_data_is_a_decode_error() {
        let err = require_data::<TokenBundleDto>(None, "login").expect_err("no data");
        assert!(matches!(err, AuthGatewayError::Decode { .. }));
    }
}
