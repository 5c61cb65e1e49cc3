//! Cart line items, derived totals, and the mutation rules both store
//! adapters share.
//!
//! The cart is a plain list of [`CartItem`]s; every monetary summary is
//! recomputed from that list on each read ([`CartData::from_items`]) and is
//! never persisted, so totals cannot drift from the lines that produced
//! them. Mutations validate first and only then touch the collection — a
//! rejected operation leaves the cart exactly as it was.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Money;

/// Product type accepted by the cart. Only laptop variants are sellable.
pub const LAPTOP_VARIANT: &str = "LaptopVariant";

/// Tax applied to the cart. The storefront prices are tax inclusive.
pub const CART_TAX: Money = Money::ZERO;

/// Shipping charged at cart stage. Shipping is priced at checkout, which
/// the remote backend owns.
pub const CART_SHIPPING: Money = Money::ZERO;

/// One line in the cart.
///
/// ## Invariants
/// - `1 <= quantity <= stock_available`
/// - `total_price == unit_price * quantity`, recomputed on every mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: u64,
    pub product_type: String,
    pub product_id: u32,
    pub product_name: String,
    pub sku: String,
    pub quantity: u32,
    pub unit_price: Money,
    /// Per-unit discount already granted on the variant.
    pub discount_amount: Money,
    pub total_price: Money,
    /// Stock available when the line was created; the ceiling for updates.
    pub stock_available: u32,
    pub image: String,
    pub added_at: DateTime<Utc>,
}

/// Cart with derived monetary summary. Never stored; always recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartData {
    pub items: Vec<CartItem>,
    /// Sum of line quantities.
    pub total_items: u32,
    /// Sum of line totals.
    pub subtotal: Money,
    /// Sum of per-unit discounts times quantity.
    pub discount: Money,
    pub tax: Money,
    pub shipping: Money,
    /// `subtotal - discount + tax + shipping`.
    pub total: Money,
}

impl CartData {
    /// Derive the summary from a line list.
    #[must_use]
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let subtotal: Money = items.iter().map(|item| item.total_price).sum();
        let discount: Money = items
            .iter()
            .map(|item| item.discount_amount.times(item.quantity))
            .sum();
        let total_items = items.iter().map(|item| item.quantity).sum();
        Self {
            items,
            total_items,
            subtotal,
            discount,
            tax: CART_TAX,
            shipping: CART_SHIPPING,
            total: subtotal - discount + CART_TAX + CART_SHIPPING,
        }
    }

    /// An empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_items(Vec::new())
    }
}

/// Product facts needed to open a new cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLine {
    pub product_type: String,
    pub product_id: u32,
    pub product_name: String,
    pub sku: String,
    pub unit_price: Money,
    pub discount_amount: Money,
    pub stock_available: u32,
    pub image: String,
}

/// Mutation failures. Messages are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CartError {
    /// Requested quantity was zero.
    #[error("Quantity must be greater than 0")]
    InvalidQuantity,
    /// Requested quantity exceeds the variant's available stock.
    #[error("Only {available} items available in stock")]
    InsufficientStock { available: u32 },
    /// Adding to an existing line would push it past available stock.
    #[error("Cannot add {requested} more. Only {remaining} items available")]
    LineStockExceeded { requested: u32, remaining: u32 },
    /// No line with the given id.
    #[error("Cart item not found")]
    ItemNotFound { item_id: u64 },
}

/// Cart line collection enforcing the quantity/stock invariants.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartItems(Vec<CartItem>);

impl CartItems {
    /// Wrap an existing line list (for example loaded from storage).
    #[must_use]
    pub fn from_vec(items: Vec<CartItem>) -> Self {
        Self(items)
    }

    /// Consume the collection, yielding the raw line list for persistence.
    #[must_use]
    pub fn into_vec(self) -> Vec<CartItem> {
        self.0
    }

    /// Borrow the lines.
    pub fn as_slice(&self) -> &[CartItem] {
        &self.0
    }

    /// Number of lines (not quantities).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no lines are present.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Derive the monetary summary for the current lines.
    #[must_use]
    pub fn summarise(&self) -> CartData {
        CartData::from_items(self.0.clone())
    }

    /// Add `quantity` units of a product, merging with an existing line for
    /// the same product and re-validating the combined quantity.
    ///
    /// Returns the id of the affected line.
    pub fn add(
        &mut self,
        line: NewLine,
        quantity: u32,
        added_at: DateTime<Utc>,
    ) -> Result<u64, CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        if quantity > line.stock_available {
            return Err(CartError::InsufficientStock {
                available: line.stock_available,
            });
        }

        if let Some(existing) = self.0.iter_mut().find(|item| {
            item.product_type == line.product_type && item.product_id == line.product_id
        }) {
            // Stored quantities come from untrusted cart files, so the sum
            // must not be allowed to wrap.
            let combined = existing
                .quantity
                .checked_add(quantity)
                .filter(|total| *total <= existing.stock_available)
                .ok_or(CartError::LineStockExceeded {
                    requested: quantity,
                    remaining: existing.stock_available.saturating_sub(existing.quantity),
                })?;
            existing.quantity = combined;
            existing.total_price = existing.unit_price.times(combined);
            return Ok(existing.id);
        }

        let id = self.next_id();
        self.0.push(CartItem {
            id,
            product_type: line.product_type,
            product_id: line.product_id,
            product_name: line.product_name,
            sku: line.sku,
            quantity,
            unit_price: line.unit_price,
            discount_amount: line.discount_amount,
            total_price: line.unit_price.times(quantity),
            stock_available: line.stock_available,
            image: line.image,
            added_at,
        });
        Ok(id)
    }

    /// Set the quantity of an existing line, recomputing its total.
    pub fn update_quantity(&mut self, item_id: u64, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }
        let item = self
            .0
            .iter_mut()
            .find(|item| item.id == item_id)
            .ok_or(CartError::ItemNotFound { item_id })?;
        if quantity > item.stock_available {
            return Err(CartError::InsufficientStock {
                available: item.stock_available,
            });
        }
        item.quantity = quantity;
        item.total_price = item.unit_price.times(quantity);
        Ok(())
    }

    /// Delete a line by id, returning the removed item.
    pub fn remove(&mut self, item_id: u64) -> Result<CartItem, CartError> {
        let index = self
            .0
            .iter()
            .position(|item| item.id == item_id)
            .ok_or(CartError::ItemNotFound { item_id })?;
        Ok(self.0.remove(index))
    }

    /// Empty the cart, returning how many lines were removed.
    pub fn clear(&mut self) -> u32 {
        let removed = u32::try_from(self.0.len()).unwrap_or(u32::MAX);
        self.0.clear();
        removed
    }

    fn next_id(&self) -> u64 {
        self.0.iter().map(|item| item.id).max().unwrap_or(0) + 1
    }
}
