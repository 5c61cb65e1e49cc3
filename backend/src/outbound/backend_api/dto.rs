//! Wire DTOs for the backend's `/api/Auth` and `/api/cart` surfaces.
//!
//! Catalog responses already match the domain types field-for-field, so
//! those deserialise directly; only auth and cart need dedicated shapes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::cart::CartItem;
use crate::domain::ports::LoginOutcome;
use crate::domain::session::SessionTokens;
use crate::domain::CartData;

/// `data` payload of login, register, and refresh-token responses.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenBundleDto {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    pub token: String,
    #[serde(default)]
    pub email_confirmed: bool,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub refresh_token_expiration: Option<DateTime<Utc>>,
}

impl TokenBundleDto {
    pub fn into_tokens(self) -> SessionTokens {
        SessionTokens {
            access_token: self.token,
            refresh_token: self.refresh_token,
            refresh_token_expiration: self.refresh_token_expiration,
        }
    }

    /// The backend identifies accounts by username, so it doubles as the
    /// user id.
    pub fn into_outcome(self) -> LoginOutcome {
        LoginOutcome {
            user_id: self.username.clone(),
            email: self.email.clone(),
            name: self.username.clone(),
            roles: self.roles.clone(),
            email_confirmed: self.email_confirmed,
            tokens: SessionTokens {
                access_token: self.token,
                refresh_token: self.refresh_token,
                refresh_token_expiration: self.refresh_token_expiration,
            },
        }
    }
}

/// `data` payload of `GET /api/Auth/status`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthStatusDto {
    #[serde(default)]
    pub is_authenticated: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub token_expiry: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestDto<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequestDto<'a> {
    pub user_name: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmEmailDto<'a> {
    pub email: &'a str,
    pub code: &'a str,
}

/// Verification type 1 asks for an e-mail confirmation code.
pub const EMAIL_VERIFICATION_TYPE: u8 = 1;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResendVerificationDto<'a> {
    pub email: &'a str,
    pub verification_type: u8,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordDto<'a> {
    pub email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordDto<'a> {
    pub email: &'a str,
    pub code: &'a str,
    pub new_password: &'a str,
    pub confirm_password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenDto<'a> {
    pub refresh_token: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordDto<'a> {
    pub current_password: &'a str,
    pub new_password: &'a str,
    pub confirm_password: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddCartItemDto<'a> {
    pub product_id: u32,
    pub product_type: &'a str,
    pub quantity: u32,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCartQuantityDto {
    pub quantity: u32,
}

/// `data` payload of cart reads; totals may be absent on some endpoints,
/// so the summary is re-derived from the lines after decoding.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartDto {
    #[serde(default)]
    pub items: Vec<CartItem>,
}

impl CartDto {
    pub fn into_cart(self) -> CartData {
        CartData::from_items(self.items)
    }
}
