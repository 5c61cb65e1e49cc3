//! HTTP adapter mapping for domain and port errors.
//!
//! Keeps the domain error type HTTP-agnostic while letting Actix handlers
//! turn failures into consistent JSON responses and status codes. Port
//! errors are translated here so handler bodies stay declarative.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use tracing::error;

use crate::domain::ports::{AuthGatewayError, CartStoreError, CatalogSourceError};
use crate::domain::{Error, ErrorCode};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, Error>;

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
        ErrorCode::Forbidden => StatusCode::FORBIDDEN,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn redact_if_internal(error: &Error) -> Error {
    if matches!(error.code(), ErrorCode::InternalError) {
        Error::internal("Internal server error")
    } else {
        error.clone()
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(redact_if_internal(self))
    }
}

impl From<actix_web::Error> for Error {
    fn from(err: actix_web::Error) -> Self {
        // Do not leak implementation details to clients.
        error!(error = %err, "actix error promoted to domain error");
        Error::internal("Internal server error")
    }
}

/// Map a backend rejection onto the matching client-facing error code,
/// falling back to 503 for anything the client cannot act on.
fn rejection(status: u16, message: String) -> Error {
    match status {
        400 => Error::invalid_request(message),
        401 => Error::unauthorized(message),
        403 => Error::forbidden(message),
        404 => Error::not_found(message),
        409 => Error::conflict(message),
        _ => Error::service_unavailable(message),
    }
}

const CONNECT_MESSAGE: &str =
    "Unable to connect to our servers. Please check your internet connection and try again.";
const DIFFICULTIES_MESSAGE: &str =
    "We're experiencing technical difficulties. Please try again later.";

impl From<AuthGatewayError> for Error {
    fn from(err: AuthGatewayError) -> Self {
        match err {
            AuthGatewayError::Transport { message } | AuthGatewayError::Timeout { message } => {
                error!(%message, "auth backend unreachable");
                Error::service_unavailable(CONNECT_MESSAGE)
            }
            AuthGatewayError::Decode { message } => {
                error!(%message, "auth backend response undecodable");
                Error::service_unavailable(DIFFICULTIES_MESSAGE)
            }
            AuthGatewayError::Rejected {
                status, message, ..
            } => rejection(status, message),
            AuthGatewayError::SessionExpired => Error::unauthorized(err.to_string()),
        }
    }
}

impl From<CatalogSourceError> for Error {
    fn from(err: CatalogSourceError) -> Self {
        match err {
            CatalogSourceError::Transport { message } | CatalogSourceError::Timeout { message } => {
                error!(%message, "catalog backend unreachable");
                Error::service_unavailable(CONNECT_MESSAGE)
            }
            CatalogSourceError::Decode { message } => {
                error!(%message, "catalog response undecodable");
                Error::service_unavailable(DIFFICULTIES_MESSAGE)
            }
            CatalogSourceError::NotFound { .. } => Error::not_found(err.to_string()),
            CatalogSourceError::Rejected { status, message } => rejection(status, message),
        }
    }
}

impl From<CartStoreError> for Error {
    fn from(err: CartStoreError) -> Self {
        match err {
            CartStoreError::InvalidQuantity | CartStoreError::UnsupportedProductType { .. } => {
                Error::invalid_request(err.to_string())
            }
            CartStoreError::InsufficientStock { .. } | CartStoreError::StockExceeded { .. } => {
                Error::conflict(err.to_string())
            }
            CartStoreError::ItemNotFound | CartStoreError::ProductNotFound { .. } => {
                Error::not_found(err.to_string())
            }
            CartStoreError::Transport { message } | CartStoreError::Timeout { message } => {
                error!(%message, "cart backend unreachable");
                Error::service_unavailable(CONNECT_MESSAGE)
            }
            CartStoreError::Decode { message } => {
                error!(%message, "cart response undecodable");
                Error::service_unavailable(DIFFICULTIES_MESSAGE)
            }
            CartStoreError::Storage { message } => {
                error!(%message, "cart storage failed");
                Error::service_unavailable(DIFFICULTIES_MESSAGE)
            }
            CartStoreError::Rejected { status, message } => rejection(status, message),
            CartStoreError::SessionExpired => Error::unauthorized(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Error::invalid_request("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthorized("nope"), StatusCode::UNAUTHORIZED)]
    #[case(Error::not_found("missing"), StatusCode::NOT_FOUND)]
    #[case(Error::conflict("stock"), StatusCode::CONFLICT)]
    #[case(Error::service_unavailable("down"), StatusCode::SERVICE_UNAVAILABLE)]
    #[case(Error::internal("boom"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn error_codes_map_to_statuses(#[case] error: Error, #[case] expected: StatusCode) {
        assert_eq!(error.status_code(), expected);
    }

    #[test]
    fn internal_detail_is_redacted() {
        let redacted = redact_if_internal(&Error::internal("db connection string leaked"));
        assert_eq!(redacted.message(), "Internal server error");
    }

    #[test]
    fn stock_conflicts_keep_their_user_facing_message() {
        let error = Error::from(CartStoreError::InsufficientStock { available: 3 });
        assert_eq!(error.code(), ErrorCode::Conflict);
        assert_eq!(error.message(), "Only 3 items available in stock");
    }

    #[rstest]
    #[case(404, ErrorCode::NotFound)]
    #[case(409, ErrorCode::Conflict)]
    #[case(500, ErrorCode::ServiceUnavailable)]
    fn backend_rejections_pass_their_status_through(
        #[case] status: u16,
        #[case] expected: ErrorCode,
    ) {
        let error = Error::from(CartStoreError::rejected(status, "backend said no"));
        assert_eq!(error.code(), expected);
        assert_eq!(error.message(), "backend said no");
    }

    #[test]
    fn transport_failures_hide_the_underlying_detail() {
        let error = Error::from(AuthGatewayError::transport("dns lookup failed"));
        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
        assert!(!error.message().contains("dns"));
    }
}
