//! Field-scoped validation for the login and sign-up forms.
//!
//! Failures are collected per field and attached to an
//! [`Error::invalid_request`] as structured details, so the storefront can
//! render them inline next to the offending input instead of a single
//! banner. Validation never aborts at the first failure.

use std::collections::BTreeMap;

use serde_json::json;

use super::Error;

/// Minimum password length accepted by the storefront forms.
pub const MIN_PASSWORD_LENGTH: usize = 8;
/// Minimum username length accepted at sign-up.
pub const MIN_USERNAME_LENGTH: usize = 3;
/// Minimum full-name length accepted at sign-up.
pub const MIN_FULL_NAME_LENGTH: usize = 2;

/// Per-field validation messages, keyed by the form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    /// Record a failure against a field.
    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_default().push(message.into());
    }

    /// True when no failures were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether a given field has failures.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Convert into the shared error payload, or `Ok` when empty.
    pub fn into_result(self) -> Result<(), Error> {
        if self.is_empty() {
            return Ok(());
        }
        Err(Error::invalid_request("validation failed").with_details(json!({ "fields": self.0 })))
    }
}

/// Validated login form fields (trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Validated sign-up form fields (trimmed).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpForm {
    pub user_name: String,
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && domain.contains('.') && !domain.starts_with('.')
        }
        None => false,
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if !looks_like_email(email) {
        errors.push("email", "Invalid email address");
    }
}

fn check_password(errors: &mut FieldErrors, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.push(
            "password",
            format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
        );
    }
}

/// Validate a login submission, returning trimmed fields.
pub fn validate_login(email: &str, password: &str) -> Result<LoginForm, Error> {
    let email = email.trim();
    let password = password.trim();

    let mut errors = FieldErrors::default();
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    errors.into_result()?;

    Ok(LoginForm {
        email: email.to_owned(),
        password: password.to_owned(),
    })
}

/// Raw sign-up submission before validation.
#[derive(Debug, Clone)]
pub struct SignUpFields<'a> {
    pub user_name: &'a str,
    pub full_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub confirm_password: &'a str,
}

/// Validate a sign-up submission, returning trimmed fields.
pub fn validate_sign_up(fields: &SignUpFields<'_>) -> Result<SignUpForm, Error> {
    let user_name = fields.user_name.trim();
    let full_name = fields.full_name.trim();
    let email = fields.email.trim();
    let password = fields.password.trim();
    let confirm_password = fields.confirm_password.trim();

    let mut errors = FieldErrors::default();
    if user_name.chars().count() < MIN_USERNAME_LENGTH {
        errors.push(
            "userName",
            format!("Username must be at least {MIN_USERNAME_LENGTH} characters"),
        );
    }
    if full_name.chars().count() < MIN_FULL_NAME_LENGTH {
        errors.push(
            "fullName",
            format!("Full name must be at least {MIN_FULL_NAME_LENGTH} characters"),
        );
    }
    check_email(&mut errors, email);
    check_password(&mut errors, password);
    if password != confirm_password {
        errors.push("confirmPassword", "Passwords don't match");
    }
    errors.into_result()?;

    Ok(SignUpForm {
        user_name: user_name.to_owned(),
        full_name: full_name.to_owned(),
        email: email.to_owned(),
        password: password.to_owned(),
        confirm_password: confirm_password.to_owned(),
    })
}
