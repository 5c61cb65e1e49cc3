//! Local [`CartStore`] holding the cart in injected storage and pricing
//! lines from the fixture catalog.
//!
//! Credentials are accepted and ignored: mock mode serves anonymous
//! visitors too, and never rotates tokens.

use async_trait::async_trait;
use chrono::Utc;

use super::catalog::FixtureCatalog;
use super::storage::CartStorage;
use crate::domain::cart::{CartItems, NewLine, LAPTOP_VARIANT};
use crate::domain::ports::{
    AddItemRequest, CartStore, CartStoreError, ClearedCart, Refreshed, SessionAuth,
};
use crate::domain::CartData;

pub struct LocalCartStore<S> {
    storage: S,
}

impl<S: CartStorage> LocalCartStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    fn load(&self) -> Result<CartItems, CartStoreError> {
        let items = self
            .storage
            .load()
            .map_err(|error| CartStoreError::storage(error.to_string()))?;
        Ok(CartItems::from_vec(items))
    }

    fn save(&self, items: &CartItems) -> Result<CartData, CartStoreError> {
        self.storage
            .save(items.as_slice())
            .map_err(|error| CartStoreError::storage(error.to_string()))?;
        Ok(items.summarise())
    }
}

/// Pricing and naming facts for a variant, drawn from the fixture catalog.
fn line_for_variant(product_id: u32) -> Result<NewLine, CartStoreError> {
    let (laptop, variant) = FixtureCatalog::find_variant(product_id)
        .ok_or(CartStoreError::ProductNotFound { product_id })?;
    Ok(NewLine {
        product_type: LAPTOP_VARIANT.to_owned(),
        product_id,
        product_name: format!(
            "{} - {}GB RAM, {}GB {}",
            laptop.model_name, variant.ram, variant.storage, variant.storage_type
        ),
        sku: variant.sku,
        unit_price: variant.current_price,
        discount_amount: variant.discount_amount,
        stock_available: variant.available_quantity,
        image: laptop.main_image,
    })
}

#[async_trait]
impl<S: CartStorage> CartStore for LocalCartStore<S> {
    async fn fetch(&self, _auth: &SessionAuth) -> Result<Refreshed<CartData>, CartStoreError> {
        Ok(Refreshed::plain(self.load()?.summarise()))
    }

    async fn add_item(
        &self,
        _auth: &SessionAuth,
        request: &AddItemRequest,
    ) -> Result<Refreshed<CartData>, CartStoreError> {
        if request.product_type != LAPTOP_VARIANT {
            return Err(CartStoreError::unsupported_product_type(
                request.product_type.clone(),
            ));
        }
        let line = line_for_variant(request.product_id)?;
        let mut items = self.load()?;
        items.add(line, request.quantity, Utc::now())?;
        Ok(Refreshed::plain(self.save(&items)?))
    }

    async fn update_quantity(
        &self,
        _auth: &SessionAuth,
        item_id: u64,
        quantity: u32,
    ) -> Result<Refreshed<CartData>, CartStoreError> {
        let mut items = self.load()?;
        items.update_quantity(item_id, quantity)?;
        Ok(Refreshed::plain(self.save(&items)?))
    }

    async fn remove_item(
        &self,
        _auth: &SessionAuth,
        item_id: u64,
    ) -> Result<Refreshed<CartData>, CartStoreError> {
        let mut items = self.load()?;
        items.remove(item_id)?;
        Ok(Refreshed::plain(self.save(&items)?))
    }

    async fn clear(&self, _auth: &SessionAuth) -> Result<Refreshed<ClearedCart>, CartStoreError> {
        let mut items = self.load()?;
        let items_removed = items.clear();
        self.save(&items)?;
        Ok(Refreshed::plain(ClearedCart {
            items_removed,
            cleared_at: Utc::now(),
        }))
    }
}
