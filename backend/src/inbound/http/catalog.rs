//! Laptop catalog endpoints.
//!
//! The listing accepts the storefront's camelCase query string and maps
//! it onto [`LaptopQuery`] before hitting the catalog port.

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::catalog::{
    LaptopDetails, LaptopQuery, LaptopSummary, Page, SortDirection, SortField, VariantListing,
    VariantQuery,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::ApiResult;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListingParams {
    /// 1-based page number, defaults to 1.
    pub page: Option<u32>,
    /// Items per page, defaults to 10.
    pub page_size: Option<u32>,
    /// Free-text match over model, brand, and processor.
    pub search: Option<String>,
    /// Exact category name, case-insensitive.
    pub category: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
}

impl From<ListingParams> for LaptopQuery {
    fn from(params: ListingParams) -> Self {
        Self {
            page: params.page,
            page_size: params.page_size,
            search: params.search,
            category: params.category,
            sort_by: params.sort_by,
            sort_direction: params.sort_direction,
        }
    }
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct VariantParams {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    /// Drop variants with no available stock.
    #[serde(default)]
    pub in_stock_only: bool,
}

impl From<VariantParams> for VariantQuery {
    fn from(params: VariantParams) -> Self {
        Self {
            page: params.page,
            page_size: params.page_size,
            in_stock_only: params.in_stock_only,
        }
    }
}

/// Search and page the laptop listing.
#[utoipa::path(
    get,
    path = "/api/v1/laptops",
    params(ListingParams),
    responses(
        (status = 200, description = "One page of laptops", body = Page<LaptopSummary>),
        (status = 503, description = "Catalog unavailable", body = crate::domain::Error)
    ),
    tags = ["catalog"],
    operation_id = "listLaptops",
    security([])
)]
#[get("/laptops")]
pub async fn list_laptops(
    state: web::Data<HttpState>,
    params: web::Query<ListingParams>,
) -> ApiResult<web::Json<Page<LaptopSummary>>> {
    let query = LaptopQuery::from(params.into_inner());
    let page = state.catalog.list_laptops(&query).await?;
    Ok(web::Json(page))
}

/// Full record for one laptop.
#[utoipa::path(
    get,
    path = "/api/v1/laptops/{id}",
    params(("id" = u32, Path, description = "Laptop identifier")),
    responses(
        (status = 200, description = "Laptop details", body = LaptopDetails),
        (status = 404, description = "No such laptop", body = crate::domain::Error),
        (status = 503, description = "Catalog unavailable", body = crate::domain::Error)
    ),
    tags = ["catalog"],
    operation_id = "laptopDetails",
    security([])
)]
#[get("/laptops/{id}")]
pub async fn laptop_details(
    state: web::Data<HttpState>,
    path: web::Path<u32>,
) -> ApiResult<web::Json<LaptopDetails>> {
    let details = state.catalog.laptop_details(path.into_inner()).await?;
    Ok(web::Json(details))
}

/// Purchasable variants of one laptop.
#[utoipa::path(
    get,
    path = "/api/v1/laptops/{id}/variants",
    params(
        ("id" = u32, Path, description = "Laptop identifier"),
        VariantParams
    ),
    responses(
        (status = 200, description = "Variant listing", body = VariantListing),
        (status = 404, description = "No such laptop", body = crate::domain::Error),
        (status = 503, description = "Catalog unavailable", body = crate::domain::Error)
    ),
    tags = ["catalog"],
    operation_id = "laptopVariants",
    security([])
)]
#[get("/laptops/{id}/variants")]
pub async fn laptop_variants(
    state: web::Data<HttpState>,
    path: web::Path<u32>,
    params: web::Query<VariantParams>,
) -> ApiResult<web::Json<VariantListing>> {
    let query = VariantQuery::from(params.into_inner());
    let listing = state
        .catalog
        .laptop_variants(path.into_inner(), &query)
        .await?;
    Ok(web::Json(listing))
}
