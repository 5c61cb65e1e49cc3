//! Account endpoints.
//!
//! ```text
//! POST /api/v1/auth/login {"email":"ada@example.com","password":"..."}
//! POST /api/v1/auth/register
//! POST /api/v1/auth/logout
//! GET  /api/v1/auth/me
//! GET  /api/v1/auth/status
//! ```
//!
//! Raw backend failure text is never shown as-is: login and register map
//! the known backend phrases onto friendlier wording before responding.

use actix_web::{get, post, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::ports::{AuthGatewayError, RegisterRequest};
use crate::domain::validation::{validate_login, validate_sign_up, SignUpFields, MIN_PASSWORD_LENGTH};
use crate::domain::{Error, SessionData};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

/// Signed-in user facts exposed to the storefront.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionUserDto {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub roles: Vec<String>,
    pub email_confirmed: bool,
}

impl From<&SessionData> for SessionUserDto {
    fn from(data: &SessionData) -> Self {
        Self {
            user_id: data.user_id.clone(),
            email: data.email.clone(),
            name: data.name.clone(),
            roles: data.roles.clone(),
            email_confirmed: data.email_confirmed,
        }
    }
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct MessageDto {
    pub message: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatusDto {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    pub user_id: String,
    pub email: String,
    pub roles: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expiry: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterBody {
    pub user_name: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmEmailBody {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailBody {
    pub email: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordBody {
    pub email: String,
    pub code: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordBody {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

/// Known backend phrases rewritten for sign-in failures.
fn friendly_login_message(message: &str) -> String {
    let lower = message.to_lowercase();
    if lower.contains("application not found") {
        "Unable to connect to the authentication service. Our team is working on this. \
         Please try again in a few moments."
            .to_owned()
    } else if lower.contains("invalid") || lower.contains("incorrect") {
        "Invalid email or password. Please check your credentials and try again.".to_owned()
    } else if lower.contains("network") {
        "Network connection issue. Please check your internet connection and try again.".to_owned()
    } else if lower.contains("server") || lower.contains("empty response") {
        "Our servers are temporarily unavailable. Please try again in a few moments.".to_owned()
    } else {
        message.to_owned()
    }
}

/// Known backend phrases rewritten for registration failures.
fn friendly_register_message(message: &str) -> String {
    let lower = message.to_lowercase();
    if lower.contains("application not found") {
        "Unable to connect to the registration service. Our team is working on this. \
         Please try again in a few moments."
            .to_owned()
    } else if lower.contains("server") || lower.contains("empty response") {
        "Our servers are temporarily unavailable. Please try again in a few moments.".to_owned()
    } else if lower.contains("network") {
        "Network connection issue. Please check your internet connection and try again.".to_owned()
    } else {
        message.to_owned()
    }
}

/// Attribute the backend's error strings to sign-up form fields by
/// keyword, matching `userName` before `fullName` so "username taken"
/// does not land on the name field.
fn register_field_errors(errors: &[String]) -> serde_json::Map<String, serde_json::Value> {
    let mut fields = serde_json::Map::new();
    for error in errors {
        let lower = error.to_lowercase();
        let field = if lower.contains("email") {
            "email"
        } else if lower.contains("password") {
            "password"
        } else if lower.contains("username") {
            "userName"
        } else if lower.contains("name") {
            "fullName"
        } else {
            continue;
        };
        if let Some(list) = fields
            .entry(field.to_owned())
            .or_insert_with(|| serde_json::Value::Array(Vec::new()))
            .as_array_mut()
        {
            list.push(json!(error));
        }
    }
    fields
}

fn map_login_error(error: AuthGatewayError) -> Error {
    match error {
        AuthGatewayError::Rejected { message, .. } => {
            Error::unauthorized(friendly_login_message(&message))
        }
        other => other.into(),
    }
}

fn map_register_error(error: AuthGatewayError) -> Error {
    match error {
        AuthGatewayError::Rejected {
            message, errors, ..
        } => {
            let friendly = friendly_register_message(&message);
            let mut fields = register_field_errors(&errors);
            if fields.is_empty() {
                fields.insert("email".to_owned(), json!([friendly.clone()]));
            }
            Error::invalid_request(friendly).with_details(json!({ "fields": fields }))
        }
        other => other.into(),
    }
}

/// End the local session when the backend says the tokens are beyond
/// refresh, then translate the error.
fn map_authed_error(session: &SessionContext, error: AuthGatewayError) -> Error {
    if matches!(error, AuthGatewayError::SessionExpired) {
        session.clear();
    }
    error.into()
}

/// Authenticate against the backend and establish the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Signed in", body = SessionUserDto,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Validation failed", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginBody>,
) -> ApiResult<web::Json<SessionUserDto>> {
    let form = validate_login(&payload.email, &payload.password)?;
    let outcome = state
        .auth
        .login(&form.email, &form.password)
        .await
        .map_err(map_login_error)?;
    let data = SessionData::issue(
        outcome.user_id,
        outcome.email,
        outcome.name,
        outcome.roles,
        outcome.email_confirmed,
        outcome.tokens,
        Utc::now(),
    );
    session.persist(&data)?;
    Ok(web::Json(SessionUserDto::from(&data)))
}

/// Create an account. The user signs in after confirming their e-mail.
#[utoipa::path(
    post,
    path = "/api/v1/auth/register",
    request_body = RegisterBody,
    responses(
        (status = 201, description = "Account created", body = MessageDto),
        (status = 400, description = "Validation or registration failed", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterBody>,
) -> ApiResult<HttpResponse> {
    let form = validate_sign_up(&SignUpFields {
        user_name: &payload.user_name,
        full_name: &payload.full_name,
        email: &payload.email,
        password: &payload.password,
        confirm_password: &payload.confirm_password,
    })?;
    let message = state
        .auth
        .register(&RegisterRequest {
            user_name: form.user_name,
            full_name: form.full_name,
            email: form.email,
            password: form.password,
            confirm_password: form.confirm_password,
        })
        .await
        .map_err(map_register_error)?;
    Ok(HttpResponse::Created().json(MessageDto { message }))
}

/// Invalidate the backend session and drop the cookie.
///
/// The local session always ends, even when the backend call fails.
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    responses(
        (status = 204, description = "Signed out")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    let auth = session.auth();
    if !auth.is_anonymous() {
        if let Err(error) = state.auth.logout(&auth).await {
            tracing::warn!(%error, "backend logout failed; ending local session anyway");
        }
    }
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Current session user, verified against the backend.
///
/// Proxies the backend status call with the session's bearer token, so an
/// expired access token is refreshed here and the rotated tokens written
/// back before the profile is returned.
#[utoipa::path(
    get,
    path = "/api/v1/auth/me",
    responses(
        (status = 200, description = "Session user", body = SessionUserDto),
        (status = 401, description = "Not signed in or session expired", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "currentUser"
)]
#[get("/auth/me")]
pub async fn me(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<SessionUserDto>> {
    let data = session.require()?;
    let refreshed = state
        .auth
        .status(&session.auth())
        .await
        .map_err(|error| map_authed_error(&session, error))?;
    if !refreshed.value.authenticated {
        session.clear();
        return Err(Error::unauthorized("login required"));
    }
    session.apply_renewal(refreshed.renewed)?;
    Ok(web::Json(SessionUserDto::from(&data)))
}

/// Live account status from the backend, refreshing tokens if needed.
#[utoipa::path(
    get,
    path = "/api/v1/auth/status",
    responses(
        (status = 200, description = "Account status", body = AccountStatusDto),
        (status = 401, description = "Not signed in or session expired", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "accountStatus"
)]
#[get("/auth/status")]
pub async fn status(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<AccountStatusDto>> {
    session.require()?;
    let refreshed = state
        .auth
        .status(&session.auth())
        .await
        .map_err(|error| map_authed_error(&session, error))?;
    session.apply_renewal(refreshed.renewed)?;
    let account = refreshed.value;
    Ok(web::Json(AccountStatusDto {
        authenticated: account.authenticated,
        username: account.username,
        user_id: account.user_id,
        email: account.email,
        roles: account.roles,
        token_expiry: account.token_expiry,
    }))
}

/// Confirm an e-mail address with the emailed verification code.
#[utoipa::path(
    post,
    path = "/api/v1/auth/confirm-email",
    request_body = ConfirmEmailBody,
    responses(
        (status = 204, description = "E-mail confirmed"),
        (status = 400, description = "Invalid or expired code", body = Error)
    ),
    tags = ["auth"],
    operation_id = "confirmEmail",
    security([])
)]
#[post("/auth/confirm-email")]
pub async fn confirm_email(
    state: web::Data<HttpState>,
    payload: web::Json<ConfirmEmailBody>,
) -> ApiResult<HttpResponse> {
    state
        .auth
        .confirm_email(payload.email.trim(), payload.code.trim())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Send a fresh e-mail verification code.
#[utoipa::path(
    post,
    path = "/api/v1/auth/resend-verification",
    request_body = EmailBody,
    responses(
        (status = 204, description = "Code sent"),
        (status = 400, description = "Unknown address", body = Error)
    ),
    tags = ["auth"],
    operation_id = "resendVerification",
    security([])
)]
#[post("/auth/resend-verification")]
pub async fn resend_verification(
    state: web::Data<HttpState>,
    payload: web::Json<EmailBody>,
) -> ApiResult<HttpResponse> {
    state
        .auth
        .resend_verification_code(payload.email.trim())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Start the password-reset flow.
#[utoipa::path(
    post,
    path = "/api/v1/auth/forgot-password",
    request_body = EmailBody,
    responses(
        (status = 204, description = "Reset code sent"),
        (status = 400, description = "Unknown address", body = Error)
    ),
    tags = ["auth"],
    operation_id = "forgotPassword",
    security([])
)]
#[post("/auth/forgot-password")]
pub async fn forgot_password(
    state: web::Data<HttpState>,
    payload: web::Json<EmailBody>,
) -> ApiResult<HttpResponse> {
    state.auth.forgot_password(payload.email.trim()).await?;
    Ok(HttpResponse::NoContent().finish())
}

fn check_new_password(new_password: &str, confirm_password: &str) -> Result<(), Error> {
    if new_password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(Error::invalid_request(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        ))
        .with_details(json!({ "fields": { "newPassword": ["Too short"] } })));
    }
    if new_password != confirm_password {
        return Err(Error::invalid_request("Passwords don't match")
            .with_details(json!({ "fields": { "confirmPassword": ["Passwords don't match"] } })));
    }
    Ok(())
}

/// Complete the password-reset flow with the emailed code.
#[utoipa::path(
    post,
    path = "/api/v1/auth/reset-password",
    request_body = ResetPasswordBody,
    responses(
        (status = 204, description = "Password reset"),
        (status = 400, description = "Invalid code or password", body = Error)
    ),
    tags = ["auth"],
    operation_id = "resetPassword",
    security([])
)]
#[post("/auth/reset-password")]
pub async fn reset_password(
    state: web::Data<HttpState>,
    payload: web::Json<ResetPasswordBody>,
) -> ApiResult<HttpResponse> {
    check_new_password(&payload.new_password, &payload.confirm_password)?;
    state
        .auth
        .reset_password(payload.email.trim(), payload.code.trim(), &payload.new_password)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Change the signed-in user's password.
#[utoipa::path(
    post,
    path = "/api/v1/auth/change-password",
    request_body = ChangePasswordBody,
    responses(
        (status = 204, description = "Password changed"),
        (status = 400, description = "Invalid password", body = Error),
        (status = 401, description = "Not signed in or wrong current password", body = Error)
    ),
    tags = ["auth"],
    operation_id = "changePassword"
)]
#[post("/auth/change-password")]
pub async fn change_password(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<ChangePasswordBody>,
) -> ApiResult<HttpResponse> {
    session.require()?;
    check_new_password(&payload.new_password, &payload.confirm_password)?;
    let refreshed = state
        .auth
        .change_password(
            &session.auth(),
            &payload.current_password,
            &payload.new_password,
        )
        .await
        .map_err(|error| map_authed_error(&session, error))?;
    session.apply_renewal(refreshed.renewed)?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{test as actix_test, App};
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::{
        AccountStatus, MockAuthGateway, MockCartStore, MockCatalogSource, Refreshed,
    };
    use crate::domain::session::SessionTokens;
    use crate::test_support::{fixture_session, test_session_middleware};

    fn mock_state(auth: MockAuthGateway) -> web::Data<HttpState> {
        web::Data::new(HttpState::new(
            Arc::new(auth),
            Arc::new(MockCatalogSource::new()),
            Arc::new(MockCartStore::new()),
        ))
    }

    fn live_status() -> AccountStatus {
        AccountStatus {
            authenticated: true,
            username: Some("ada".to_owned()),
            user_id: "ada".to_owned(),
            email: "ada@example.com".to_owned(),
            roles: vec!["User".to_owned()],
            token_expiry: None,
        }
    }

    #[actix_web::test]
    async fn me_writes_rotated_tokens_back_to_the_session() {
        let mut gateway = MockAuthGateway::new();
        gateway.expect_status().times(1).returning(|_| {
            Ok(Refreshed::renewed(
                live_status(),
                SessionTokens {
                    access_token: "rotated-access".to_owned(),
                    refresh_token: Some("rotated-refresh".to_owned()),
                    refresh_token_expiration: None,
                },
            ))
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(mock_state(gateway))
                .wrap(test_session_middleware())
                .service(me)
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist(&fixture_session())?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                )
                .route(
                    "/token",
                    web::get().to(|session: SessionContext| async move {
                        let data = session.require()?;
                        Ok::<_, Error>(HttpResponse::Ok().body(data.tokens.access_token))
                    }),
                ),
        )
        .await;

        let set_res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let me_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/auth/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me_res.status(), StatusCode::OK);
        let rotated_cookie = me_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie rewritten")
            .into_owned();
        let user: serde_json::Value = actix_test::read_body_json(me_res).await;
        assert_eq!(user["userId"], "ada");

        let token_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/token")
                .cookie(rotated_cookie)
                .to_request(),
        )
        .await;
        let body = actix_test::read_body(token_res).await;
        assert_eq!(body, "rotated-access");
    }

    #[actix_web::test]
    async fn me_ends_the_session_when_the_backend_disowns_it() {
        let mut gateway = MockAuthGateway::new();
        gateway.expect_status().times(1).returning(|_| {
            let mut account = live_status();
            account.authenticated = false;
            Ok(Refreshed::plain(account))
        });
        let app = actix_test::init_service(
            App::new()
                .app_data(mock_state(gateway))
                .wrap(test_session_middleware())
                .service(me)
                .route(
                    "/set",
                    web::get().to(|session: SessionContext| async move {
                        session.persist(&fixture_session())?;
                        Ok::<_, Error>(HttpResponse::Ok())
                    }),
                ),
        )
        .await;

        let set_res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/set").to_request()).await;
        let cookie = set_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie set")
            .into_owned();

        let me_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/auth/me")
                .cookie(cookie)
                .to_request(),
        )
        .await;
        assert_eq!(me_res.status(), StatusCode::UNAUTHORIZED);
        let emptied = me_res
            .response()
            .cookies()
            .find(|cookie| cookie.name() == "session")
            .expect("session cookie cleared");
        assert!(emptied.value().is_empty() || emptied.max_age().is_some_and(|age| age.is_zero()));
    }

    #[rstest]
    #[case(
        "Application not found",
        "Unable to connect to the authentication service. Our team is working on this. \
         Please try again in a few moments."
    )]
    #[case(
        "Invalid credentials",
        "Invalid email or password. Please check your credentials and try again."
    )]
    #[case(
        "INCORRECT password",
        "Invalid email or password. Please check your credentials and try again."
    )]
    #[case(
        "HTTP 502: Empty response body from server",
        "Our servers are temporarily unavailable. Please try again in a few moments."
    )]
    #[case("Account locked", "Account locked")]
    fn login_messages_become_friendly(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(friendly_login_message(raw), expected);
    }

    #[test]
    fn register_errors_land_on_their_fields() {
        let fields = register_field_errors(&[
            "Email is already taken".to_owned(),
            "Password must contain a digit".to_owned(),
            "Username is already taken".to_owned(),
            "Full name looks wrong".to_owned(),
            "something unrelated".to_owned(),
        ]);
        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(fields.contains_key("userName"));
        assert!(fields.contains_key("fullName"));
        assert_eq!(fields.len(), 4);
    }

    #[test]
    fn register_rejection_without_field_hits_defaults_to_email() {
        let error = map_register_error(AuthGatewayError::rejected(
            400_u16,
            "Application not found",
            Vec::<String>::new(),
        ));
        let details = error.details().expect("details");
        let email_errors = details["fields"]["email"].as_array().expect("email list");
        assert_eq!(email_errors.len(), 1);
    }

    #[test]
    fn short_replacement_passwords_are_field_scoped() {
        let error = check_new_password("short", "short").expect_err("too short");
        assert!(error.details().expect("details")["fields"]["newPassword"].is_array());
    }

    #[test]
    fn mismatched_replacement_passwords_are_rejected() {
        let error = check_new_password("long-enough", "different-one").expect_err("mismatch");
        assert_eq!(error.message(), "Passwords don't match");
    }
}
