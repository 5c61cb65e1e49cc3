//! Shopping cart endpoints.
//!
//! All routes require a session. Mutations return the full post-mutation
//! cart; token rotations performed by the store are written back into the
//! session before the response leaves.

use actix_web::{delete, get, post, put, web};
use serde::Deserialize;

use crate::domain::cart::CartData;
use crate::domain::ports::{AddItemRequest, CartStoreError, ClearedCart, Refreshed};
use crate::domain::{cart::LAPTOP_VARIANT, Error};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddItemBody {
    pub product_id: u32,
    /// Defaults to `LaptopVariant`, the only sellable product type.
    pub product_type: Option<String>,
    pub quantity: u32,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuantityBody {
    pub quantity: u32,
}

/// Write any rotated tokens back and translate the store error, ending
/// the local session when the tokens are beyond refresh.
fn settle<T>(
    session: &SessionContext,
    outcome: Result<Refreshed<T>, CartStoreError>,
) -> Result<T, Error> {
    match outcome {
        Ok(refreshed) => {
            session.apply_renewal(refreshed.renewed)?;
            Ok(refreshed.value)
        }
        Err(CartStoreError::SessionExpired) => {
            session.clear();
            Err(CartStoreError::SessionExpired.into())
        }
        Err(error) => Err(error.into()),
    }
}

/// Current cart with derived totals.
#[utoipa::path(
    get,
    path = "/api/v1/cart",
    responses(
        (status = 200, description = "The cart", body = CartData),
        (status = 401, description = "Not signed in", body = Error),
        (status = 503, description = "Cart backend unavailable", body = Error)
    ),
    tags = ["cart"],
    operation_id = "fetchCart"
)]
#[get("/cart")]
pub async fn fetch_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<CartData>> {
    session.require()?;
    let cart = settle(&session, state.cart.fetch(&session.auth()).await)?;
    Ok(web::Json(cart))
}

/// Add units of a product, merging with an existing line.
#[utoipa::path(
    post,
    path = "/api/v1/cart/items",
    request_body = AddItemBody,
    responses(
        (status = 200, description = "Cart after the add", body = CartData),
        (status = 400, description = "Invalid quantity or product type", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No such product", body = Error),
        (status = 409, description = "Not enough stock", body = Error)
    ),
    tags = ["cart"],
    operation_id = "addCartItem"
)]
#[post("/cart/items")]
pub async fn add_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<AddItemBody>,
) -> ApiResult<web::Json<CartData>> {
    session.require()?;
    let payload = payload.into_inner();
    let request = AddItemRequest {
        product_id: payload.product_id,
        product_type: payload
            .product_type
            .unwrap_or_else(|| LAPTOP_VARIANT.to_owned()),
        quantity: payload.quantity,
    };
    let cart = settle(
        &session,
        state.cart.add_item(&session.auth(), &request).await,
    )?;
    Ok(web::Json(cart))
}

/// Set the quantity of an existing line.
#[utoipa::path(
    put,
    path = "/api/v1/cart/items/{id}",
    params(("id" = u64, Path, description = "Cart line identifier")),
    request_body = UpdateQuantityBody,
    responses(
        (status = 200, description = "Cart after the update", body = CartData),
        (status = 400, description = "Invalid quantity", body = Error),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No such line", body = Error),
        (status = 409, description = "Not enough stock", body = Error)
    ),
    tags = ["cart"],
    operation_id = "updateCartItem"
)]
#[put("/cart/items/{id}")]
pub async fn update_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
    payload: web::Json<UpdateQuantityBody>,
) -> ApiResult<web::Json<CartData>> {
    session.require()?;
    let cart = settle(
        &session,
        state
            .cart
            .update_quantity(&session.auth(), path.into_inner(), payload.quantity)
            .await,
    )?;
    Ok(web::Json(cart))
}

/// Delete one line.
#[utoipa::path(
    delete,
    path = "/api/v1/cart/items/{id}",
    params(("id" = u64, Path, description = "Cart line identifier")),
    responses(
        (status = 200, description = "Cart after the removal", body = CartData),
        (status = 401, description = "Not signed in", body = Error),
        (status = 404, description = "No such line", body = Error)
    ),
    tags = ["cart"],
    operation_id = "removeCartItem"
)]
#[delete("/cart/items/{id}")]
pub async fn remove_item(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<u64>,
) -> ApiResult<web::Json<CartData>> {
    session.require()?;
    let cart = settle(
        &session,
        state.cart.remove_item(&session.auth(), path.into_inner()).await,
    )?;
    Ok(web::Json(cart))
}

/// Empty the cart.
#[utoipa::path(
    delete,
    path = "/api/v1/cart",
    responses(
        (status = 200, description = "Removal receipt", body = ClearedCart),
        (status = 401, description = "Not signed in", body = Error)
    ),
    tags = ["cart"],
    operation_id = "clearCart"
)]
#[delete("/cart")]
pub async fn clear_cart(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ClearedCart>> {
    session.require()?;
    let receipt = settle(&session, state.cart.clear(&session.auth()).await)?;
    Ok(web::Json(receipt))
}
