//! OpenAPI documentation configuration.
//!
//! The generated specification is served by Swagger UI in debug builds
//! and exported via `cargo run --bin openapi-dump` for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::catalog::{
    LaptopDetails, LaptopOverview, LaptopSummary, SortDirection, SortField, VariantDetails,
    VariantListing,
};
use crate::domain::cart::{CartData, CartItem};
use crate::domain::ports::ClearedCart;
use crate::domain::{Error, ErrorCode};
use crate::inbound::http::auth::{
    AccountStatusDto, ChangePasswordBody, ConfirmEmailBody, EmailBody, LoginBody, MessageDto,
    RegisterBody, ResetPasswordBody, SessionUserDto,
};
use crate::inbound::http::cart::{AddItemBody, UpdateQuantityBody};

/// Enrich the generated document with the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the storefront REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Laptop storefront API",
        description = "Session-authenticated gateway over the laptop store backend."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::health::live,
        crate::inbound::http::health::ready,
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::register,
        crate::inbound::http::auth::logout,
        crate::inbound::http::auth::me,
        crate::inbound::http::auth::status,
        crate::inbound::http::auth::confirm_email,
        crate::inbound::http::auth::resend_verification,
        crate::inbound::http::auth::forgot_password,
        crate::inbound::http::auth::reset_password,
        crate::inbound::http::auth::change_password,
        crate::inbound::http::catalog::list_laptops,
        crate::inbound::http::catalog::laptop_details,
        crate::inbound::http::catalog::laptop_variants,
        crate::inbound::http::cart::fetch_cart,
        crate::inbound::http::cart::add_item,
        crate::inbound::http::cart::update_item,
        crate::inbound::http::cart::remove_item,
        crate::inbound::http::cart::clear_cart,
    ),
    components(schemas(
        Error,
        ErrorCode,
        SessionUserDto,
        MessageDto,
        AccountStatusDto,
        LoginBody,
        RegisterBody,
        ConfirmEmailBody,
        EmailBody,
        ResetPasswordBody,
        ChangePasswordBody,
        AddItemBody,
        UpdateQuantityBody,
        LaptopSummary,
        LaptopDetails,
        LaptopOverview,
        VariantDetails,
        VariantListing,
        SortField,
        SortDirection,
        CartData,
        CartItem,
        ClearedCart,
    )),
    tags(
        (name = "health", description = "Liveness probes"),
        (name = "auth", description = "Account and session operations"),
        (name = "catalog", description = "Laptop catalog, read-only"),
        (name = "cart", description = "Shopping cart for the signed-in user")
    )
)]
pub struct ApiDoc;
