//! Driven port for the shopping cart.
//!
//! Two implementations exist: the remote adapter forwards to the backend's
//! `/api/cart` surface, the local adapter keeps the cart in injected
//! storage and prices lines from the fixture catalog. Handlers only ever
//! see this trait, so the storefront behaves identically in both modes.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::macros::define_port_error;
use super::{Refreshed, SessionAuth};
use crate::domain::cart::{CartData, CartError, LAPTOP_VARIANT};

/// Request to add units of a product to the cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddItemRequest {
    pub product_id: u32,
    pub product_type: String,
    pub quantity: u32,
}

impl AddItemRequest {
    /// Add units of a laptop variant, the only sellable product type.
    #[must_use]
    pub fn laptop_variant(product_id: u32, quantity: u32) -> Self {
        Self {
            product_id,
            product_type: LAPTOP_VARIANT.to_owned(),
            quantity,
        }
    }
}

/// Receipt returned when the cart is emptied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClearedCart {
    /// Number of lines removed.
    pub items_removed: u32,
    pub cleared_at: DateTime<Utc>,
}

define_port_error! {
    /// Cart failures. The first five carry user-facing messages and map to
    /// client error statuses; the rest describe backend trouble.
    pub enum CartStoreError {
        /// Requested quantity was zero.
        InvalidQuantity =>
            "Quantity must be greater than 0",
        /// Requested quantity exceeds the variant's available stock.
        InsufficientStock { available: u32 } =>
            "Only {available} items available in stock",
        /// Adding to an existing line would push it past available stock.
        StockExceeded { requested: u32, remaining: u32 } =>
            "Cannot add {requested} more. Only {remaining} items available",
        /// No cart line with the given id.
        ItemNotFound =>
            "Cart item not found",
        /// No sellable product with the given id.
        ProductNotFound { product_id: u32 } =>
            "Product {product_id} not found",
        /// The cart only accepts laptop variants.
        UnsupportedProductType { product_type: String } =>
            "Unsupported product type: {product_type}",
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "cart backend unreachable: {message}",
        /// The call exceeded its deadline.
        Timeout { message: String } =>
            "cart backend timed out: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "cart response decode failed: {message}",
        /// The backend answered with a failure envelope or error status.
        Rejected { status: u16, message: String } =>
            "cart backend rejected the request ({status}): {message}",
        /// Cart storage could not be read or written.
        Storage { message: String } =>
            "cart storage failed: {message}",
        /// The access token expired and could not be refreshed.
        SessionExpired =>
            "Your session has expired. Please sign in again.",
    }
}

impl From<CartError> for CartStoreError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::InvalidQuantity => Self::InvalidQuantity,
            CartError::InsufficientStock { available } => Self::InsufficientStock { available },
            CartError::LineStockExceeded {
                requested,
                remaining,
            } => Self::StockExceeded {
                requested,
                remaining,
            },
            CartError::ItemNotFound { .. } => Self::ItemNotFound,
        }
    }
}

/// Port for cart reads and mutations.
///
/// Every mutation returns the full post-mutation [`CartData`] so clients
/// never have to re-derive totals themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CartStore: Send + Sync {
    /// Current cart with derived totals.
    async fn fetch(&self, auth: &SessionAuth) -> Result<Refreshed<CartData>, CartStoreError>;

    /// Add units of a product, merging with an existing line for the same
    /// product.
    async fn add_item(
        &self,
        auth: &SessionAuth,
        request: &AddItemRequest,
    ) -> Result<Refreshed<CartData>, CartStoreError>;

    /// Set the quantity of an existing line.
    async fn update_quantity(
        &self,
        auth: &SessionAuth,
        item_id: u64,
        quantity: u32,
    ) -> Result<Refreshed<CartData>, CartStoreError>;

    /// Delete one line.
    async fn remove_item(
        &self,
        auth: &SessionAuth,
        item_id: u64,
    ) -> Result<Refreshed<CartData>, CartStoreError>;

    /// Empty the cart.
    async fn clear(&self, auth: &SessionAuth) -> Result<Refreshed<ClearedCart>, CartStoreError>;
}
