//! Remote [`CatalogSource`] forwarding to the backend's `/api/Laptop`
//! surface. The catalog is public, so no bearer token is attached.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use super::client::{BackendApiClient, CallError};
use crate::domain::catalog::{
    LaptopDetails, LaptopQuery, LaptopSummary, Page, VariantListing, VariantQuery,
};
use crate::domain::ports::{CatalogSource, CatalogSourceError};

pub struct RemoteCatalogSource {
    client: Arc<BackendApiClient>,
}

impl RemoteCatalogSource {
    pub fn new(client: Arc<BackendApiClient>) -> Self {
        Self { client }
    }
}

fn map_call_error(error: CallError, resource: &str) -> CatalogSourceError {
    match error {
        CallError::Transport(message) => CatalogSourceError::transport(message),
        CallError::Timeout(message) => CatalogSourceError::timeout(message),
        CallError::Decode(message) => CatalogSourceError::decode(message),
        CallError::Rejected { status: 404, .. } => CatalogSourceError::not_found(resource),
        CallError::Rejected {
            status, message, ..
        } => CatalogSourceError::rejected(status, message),
        // The catalog never runs authenticated calls.
        CallError::SessionExpired => {
            CatalogSourceError::rejected(401_u16, "unexpected authentication failure")
        }
    }
}

fn require_data<T>(data: Option<T>, resource: &str) -> Result<T, CatalogSourceError> {
    data.ok_or_else(|| CatalogSourceError::decode(format!("{resource} response carried no data")))
}

/// Query-string pairs for the laptop listing, in the backend's PascalCase
/// convention.
fn listing_params(query: &LaptopQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("Page", query.page.unwrap_or(1).to_string()),
        ("PageSize", query.page_size.unwrap_or(10).to_string()),
    ];
    if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
        params.push(("Search", search.to_owned()));
    }
    if let Some(category) = query.category.as_deref().filter(|c| !c.is_empty()) {
        params.push(("Category", category.to_owned()));
    }
    if let Some(sort_by) = query.sort_by {
        params.push(("SortBy", sort_by.as_wire().to_string()));
    }
    if let Some(direction) = query.sort_direction {
        params.push(("SortDirection", direction.as_wire().to_string()));
    }
    params
}

fn variant_params(query: &VariantQuery) -> Vec<(&'static str, String)> {
    vec![
        ("Page", query.page.unwrap_or(1).to_string()),
        ("PageSize", query.page_size.unwrap_or(10).to_string()),
        ("InStockOnly", query.in_stock_only.to_string()),
    ]
}

#[async_trait]
impl CatalogSource for RemoteCatalogSource {
    async fn list_laptops(
        &self,
        query: &LaptopQuery,
    ) -> Result<Page<LaptopSummary>, CatalogSourceError> {
        let builder = self
            .client
            .request(Method::GET, "api/Laptop")
            .map_err(|e| map_call_error(e, "Laptop listing"))?
            .query(&listing_params(query));
        let data: Option<Page<LaptopSummary>> = self
            .client
            .call(builder)
            .await
            .map_err(|e| map_call_error(e, "Laptop listing"))?;
        require_data(data, "Laptop listing")
    }

    async fn laptop_details(&self, laptop_id: u32) -> Result<LaptopDetails, CatalogSourceError> {
        let resource = format!("Laptop {laptop_id}");
        let builder = self
            .client
            .request(Method::GET, &format!("api/Laptop/{laptop_id}"))
            .map_err(|e| map_call_error(e, &resource))?;
        let data: Option<LaptopDetails> = self
            .client
            .call(builder)
            .await
            .map_err(|e| map_call_error(e, &resource))?;
        require_data(data, &resource)
    }

    async fn laptop_variants(
        &self,
        laptop_id: u32,
        query: &VariantQuery,
    ) -> Result<VariantListing, CatalogSourceError> {
        let resource = format!("Laptop {laptop_id}");
        let builder = self
            .client
            .request(Method::GET, &format!("api/Laptop/{laptop_id}/variants"))
            .map_err(|e| map_call_error(e, &resource))?
            .query(&variant_params(query));
        let data: Option<VariantListing> = self
            .client
            .call(builder)
            .await
            .map_err(|e| map_call_error(e, &resource))?;
        require_data(data, &resource)
    }
}
