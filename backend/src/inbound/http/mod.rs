//! HTTP inbound adapter exposing the storefront REST endpoints.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod error;
pub mod health;
pub mod session;
pub mod state;

pub use error::ApiResult;
pub use state::HttpState;

use actix_web::web;

/// Register every endpoint under the caller's scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health::live)
        .service(health::ready)
        .service(auth::login)
        .service(auth::register)
        .service(auth::logout)
        .service(auth::me)
        .service(auth::status)
        .service(auth::confirm_email)
        .service(auth::resend_verification)
        .service(auth::forgot_password)
        .service(auth::reset_password)
        .service(auth::change_password)
        .service(catalog::list_laptops)
        .service(catalog::laptop_details)
        .service(catalog::laptop_variants)
        .service(cart::fetch_cart)
        .service(cart::add_item)
        .service(cart::update_item)
        .service(cart::remove_item)
        .service(cart::clear_cart);
}
