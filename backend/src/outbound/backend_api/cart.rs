//! Remote [`CartStore`] forwarding to the backend's `/api/cart` surface.
//!
//! Every mutation is followed by a cart refetch so callers always receive
//! totals derived from the backend's authoritative line list. Token
//! rotations from either call are propagated to the session layer.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;

use super::client::{BackendApiClient, CallError};
use super::dto::{AddCartItemDto, CartDto, UpdateCartQuantityDto};
use crate::domain::ports::{
    AddItemRequest, CartStore, CartStoreError, ClearedCart, Refreshed, SessionAuth,
};
use crate::domain::session::SessionTokens;
use crate::domain::CartData;

pub struct RemoteCartStore {
    client: Arc<BackendApiClient>,
}

impl RemoteCartStore {
    pub fn new(client: Arc<BackendApiClient>) -> Self {
        Self { client }
    }

    async fn fetch_cart(
        &self,
        auth: &SessionAuth,
    ) -> Result<Refreshed<CartData>, CartStoreError> {
        let refreshed = self
            .client
            .call_authed::<CartDto, _>(auth, |client, token| {
                Ok(client.request(Method::GET, "api/cart")?.bearer_auth(token))
            })
            .await
            .map_err(map_call_error)?;
        Ok(refreshed.map(|data| data.map_or_else(CartData::empty, CartDto::into_cart)))
    }

    /// Run a mutation, then refetch the cart with the freshest credentials.
    async fn mutate_then_fetch<F>(
        &self,
        auth: &SessionAuth,
        build: F,
    ) -> Result<Refreshed<CartData>, CartStoreError>
    where
        F: Fn(
                &BackendApiClient,
                &str,
            ) -> Result<reqwest::RequestBuilder, CallError>
            + Send
            + Sync,
    {
        let mutation = self
            .client
            .call_authed::<serde_json::Value, _>(auth, build)
            .await
            .map_err(map_call_error)?;
        let refetch_auth = auth_after(auth, mutation.renewed.as_ref());
        let fetched = self.fetch_cart(&refetch_auth).await?;
        Ok(Refreshed {
            value: fetched.value,
            renewed: fetched.renewed.or(mutation.renewed),
        })
    }
}

/// Credentials to use after a call that may have rotated the tokens.
fn auth_after(auth: &SessionAuth, renewed: Option<&SessionTokens>) -> SessionAuth {
    match renewed {
        Some(tokens) => SessionAuth::bearer(
            tokens.access_token.clone(),
            tokens
                .refresh_token
                .clone()
                .or_else(|| auth.refresh_token().map(str::to_owned)),
        ),
        None => auth.clone(),
    }
}

fn map_call_error(error: CallError) -> CartStoreError {
    match error {
        CallError::Transport(message) => CartStoreError::transport(message),
        CallError::Timeout(message) => CartStoreError::timeout(message),
        CallError::Decode(message) => CartStoreError::decode(message),
        CallError::Rejected {
            status, message, ..
        } => CartStoreError::rejected(status, message),
        CallError::SessionExpired => CartStoreError::SessionExpired,
    }
}

#[async_trait]
impl CartStore for RemoteCartStore {
    async fn fetch(&self, auth: &SessionAuth) -> Result<Refreshed<CartData>, CartStoreError> {
        self.fetch_cart(auth).await
    }

    async fn add_item(
        &self,
        auth: &SessionAuth,
        request: &AddItemRequest,
    ) -> Result<Refreshed<CartData>, CartStoreError> {
        if request.quantity == 0 {
            return Err(CartStoreError::InvalidQuantity);
        }
        let payload = AddCartItemDto {
            product_id: request.product_id,
            product_type: &request.product_type,
            quantity: request.quantity,
        };
        self.mutate_then_fetch(auth, move |client, token| {
            Ok(client
                .request(Method::POST, "api/cart/items")?
                .bearer_auth(token)
                .json(&payload))
        })
        .await
    }

    async fn update_quantity(
        &self,
        auth: &SessionAuth,
        item_id: u64,
        quantity: u32,
    ) -> Result<Refreshed<CartData>, CartStoreError> {
        if quantity == 0 {
            return Err(CartStoreError::InvalidQuantity);
        }
        let path = format!("api/cart/items/{item_id}");
        self.mutate_then_fetch(auth, move |client, token| {
            Ok(client
                .request(Method::PUT, &path)?
                .bearer_auth(token)
                .json(&UpdateCartQuantityDto { quantity }))
        })
        .await
    }

    async fn remove_item(
        &self,
        auth: &SessionAuth,
        item_id: u64,
    ) -> Result<Refreshed<CartData>, CartStoreError> {
        let path = format!("api/cart/items/{item_id}");
        self.mutate_then_fetch(auth, move |client, token| {
            Ok(client.request(Method::DELETE, &path)?.bearer_auth(token))
        })
        .await
    }

    async fn clear(&self, auth: &SessionAuth) -> Result<Refreshed<ClearedCart>, CartStoreError> {
        // Count lines first so the receipt can report what was removed.
        let before = self.fetch_cart(auth).await?;
        let line_count = u32::try_from(before.value.items.len()).unwrap_or(u32::MAX);
        let auth = auth_after(auth, before.renewed.as_ref());

        let cleared = self
            .client
            .call_authed::<serde_json::Value, _>(&auth, |client, token| {
                Ok(client
                    .request(Method::DELETE, "api/cart")?
                    .bearer_auth(token))
            })
            .await
            .map_err(map_call_error)?;
        Ok(Refreshed {
            value: ClearedCart {
                items_removed: line_count,
                cleared_at: Utc::now(),
            },
            renewed: cleared.renewed.or(before.renewed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(access: &str, refresh: Option<&str>) -> SessionTokens {
        SessionTokens {
            access_token: access.to_owned(),
            refresh_token: refresh.map(str::to_owned),
            refresh_token_expiration: None,
        }
    }

    #[test]
    fn rotated_tokens_replace_the_bearer_for_the_refetch() {
        let auth = SessionAuth::bearer("old-access", Some("old-refresh".to_owned()));
        let renewed = tokens("new-access", None);
        let next = auth_after(&auth, Some(&renewed));
        assert_eq!(next.access_token(), Some("new-access"));
        // Rotation without a new refresh token keeps the original one.
        assert_eq!(next.refresh_token(), Some("old-refresh"));
    }

    #[test]
    fn without_rotation_the_original_credentials_are_reused() {
        let auth = SessionAuth::bearer("access", None);
        assert_eq!(auth_after(&auth, None), auth);
    }

    #[test]
    fn backend_rejections_keep_their_status() {
        let error = map_call_error(CallError::Rejected {
            status: 409,
            message: "Only 3 items available in stock".to_owned(),
            errors: vec![],
        });
        assert_eq!(
            error,
            CartStoreError::Rejected {
                status: 409,
                message: "Only 3 items available in stock".to_owned(),
            }
        );
    }
}
