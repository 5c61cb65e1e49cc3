//! Driven port for the read-only laptop catalog.

use async_trait::async_trait;

use super::macros::define_port_error;
use crate::domain::catalog::{
    LaptopDetails, LaptopQuery, LaptopSummary, Page, VariantListing, VariantQuery,
};

define_port_error! {
    /// Errors surfaced while querying the catalog.
    pub enum CatalogSourceError {
        /// Network transport failed before a response arrived.
        Transport { message: String } =>
            "catalog backend unreachable: {message}",
        /// The call exceeded its deadline.
        Timeout { message: String } =>
            "catalog backend timed out: {message}",
        /// The response body could not be decoded.
        Decode { message: String } =>
            "catalog response decode failed: {message}",
        /// No catalog entry with the requested identifier.
        NotFound { resource: String } =>
            "{resource} not found",
        /// The backend answered with a failure envelope or error status.
        Rejected { status: u16, message: String } =>
            "catalog backend rejected the request ({status}): {message}",
    }
}

/// Port for the backend's `/api/Laptop` surface.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Search and page the laptop listing.
    async fn list_laptops(
        &self,
        query: &LaptopQuery,
    ) -> Result<Page<LaptopSummary>, CatalogSourceError>;

    /// Fetch the complete record for one laptop.
    async fn laptop_details(&self, laptop_id: u32) -> Result<LaptopDetails, CatalogSourceError>;

    /// Page the purchasable variants of one laptop.
    async fn laptop_variants(
        &self,
        laptop_id: u32,
        query: &VariantQuery,
    ) -> Result<VariantListing, CatalogSourceError>;
}
