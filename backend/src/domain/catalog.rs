//! Read-only catalog entities and pagination.
//!
//! The catalog is owned by the remote backend (or, in mock mode, by the
//! fixture adapter); these types mirror its wire contract, so they double
//! as serialisation DTOs. All identifiers are backend-assigned.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Money;

/// Laptop manufacturer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    pub id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub logo_url: String,
}

/// Catalog category (Gaming, Professional, Ultrabook, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u32,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Cheapest and dearest variant price of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PriceRange {
    pub min: Money,
    pub max: Money,
}

/// Physical port fitted to a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PortSpec {
    pub id: u32,
    #[serde(rename = "type")]
    pub port_type: String,
    pub quantity: u32,
}

/// Manufacturer warranty attached to a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Warranty {
    pub id: u32,
    pub duration_months: u32,
    #[serde(rename = "type")]
    pub warranty_type: String,
    pub coverage: String,
    pub provider: String,
}

/// Product photo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaptopImage {
    pub id: u32,
    pub url: String,
    pub is_main: bool,
    pub display_order: u32,
}

/// Aggregate review/sales statistics for a model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub average_rating: f64,
    pub total_reviews: u32,
    pub total_sales: u32,
    pub view_count: u32,
}

/// Stock availability of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum StockStatus {
    InStock,
    LowStock,
    OutOfStock,
    PreOrder,
    Discontinued,
}

/// Stock levels at or below this count report [`StockStatus::LowStock`].
pub const LOW_STOCK_THRESHOLD: u32 = 5;

impl StockStatus {
    /// Derive the status from raw stock counts.
    ///
    /// # Examples
    /// ```
    /// use techzone_backend::domain::StockStatus;
    ///
    /// assert_eq!(StockStatus::from_counts(0, 0), StockStatus::OutOfStock);
    /// assert_eq!(StockStatus::from_counts(8, 4), StockStatus::LowStock);
    /// assert_eq!(StockStatus::from_counts(25, 3), StockStatus::InStock);
    /// ```
    pub fn from_counts(stock_quantity: u32, reserved_quantity: u32) -> Self {
        if stock_quantity == 0 {
            Self::OutOfStock
        } else if stock_quantity.saturating_sub(reserved_quantity) <= LOW_STOCK_THRESHOLD {
            Self::LowStock
        } else {
            Self::InStock
        }
    }

    /// True for statuses that allow adding the variant to a cart.
    pub fn is_purchasable(self) -> bool {
        matches!(self, Self::InStock | Self::LowStock)
    }
}

/// Condensed variant row shown on a product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantSummary {
    pub id: u32,
    pub sku: String,
    pub ram: u32,
    pub storage: u32,
    pub storage_type: String,
    pub current_price: Money,
    pub stock_status: StockStatus,
}

/// Full variant record with pricing and stock counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantDetails {
    pub id: u32,
    pub sku: String,
    /// RAM in gigabytes.
    pub ram: u32,
    /// Storage in gigabytes.
    pub storage: u32,
    pub storage_type: String,
    pub current_price: Money,
    pub original_price: Money,
    /// Whole-percent discount relative to the original price.
    pub discount_percentage: u32,
    pub discount_amount: Money,
    pub stock_quantity: u32,
    pub reserved_quantity: u32,
    pub available_quantity: u32,
    pub stock_status: StockStatus,
    pub reorder_level: u32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Laptop row for the listing grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaptopSummary {
    pub id: u32,
    pub model_name: String,
    pub brand: Brand,
    pub category: Category,
    pub processor: String,
    pub gpu: String,
    pub screen_size: String,
    pub has_camera: bool,
    pub has_keyboard: bool,
    pub has_touch_screen: bool,
    pub release_year: u32,
    pub is_active: bool,
    pub variant_count: u32,
    pub price_range: PriceRange,
    pub average_rating: f64,
    pub main_image: String,
}

/// Complete laptop record for the product detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaptopDetails {
    pub id: u32,
    pub model_name: String,
    pub brand: Brand,
    pub category: Category,
    pub processor: String,
    pub gpu: String,
    pub screen_size: String,
    pub has_camera: bool,
    pub has_keyboard: bool,
    pub has_touch_screen: bool,
    pub description: String,
    pub release_year: u32,
    pub store_location: String,
    pub store_contact: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub ports: Vec<PortSpec>,
    pub warranty: Warranty,
    pub images: Vec<LaptopImage>,
    pub variants: Vec<VariantSummary>,
    pub statistics: Statistics,
}

/// Header block accompanying a variant listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LaptopOverview {
    pub id: u32,
    pub model_name: String,
    pub processor: String,
    pub gpu: String,
    pub screen_size: String,
    pub has_camera: bool,
    pub has_touch_screen: bool,
}

/// Variants of one laptop, paginated, with the parent model header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct VariantListing {
    pub laptop: LaptopOverview,
    pub variants: Page<VariantDetails>,
}

/// Sort key for laptop listings; wire values match the backend contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortField {
    #[default]
    Id,
    ModelName,
    Price,
}

impl SortField {
    /// Numeric encoding used in backend query strings.
    pub fn as_wire(self) -> u8 {
        match self {
            Self::Id => 0,
            Self::ModelName => 1,
            Self::Price => 2,
        }
    }
}

/// Sort direction; wire values match the backend contract.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// Numeric encoding used in backend query strings.
    pub fn as_wire(self) -> u8 {
        match self {
            Self::Ascending => 0,
            Self::Descending => 1,
        }
    }
}

/// Filters and paging for the laptop listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaptopQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub category: Option<String>,
    pub sort_by: Option<SortField>,
    pub sort_direction: Option<SortDirection>,
}

/// Paging and filters for a variant listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariantQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub in_stock_only: bool,
}

/// One page of results with 1-based display indexes.
///
/// ## Invariants
/// - `total_pages` is `ceil(total_count / page_size)`.
/// - `start_index`/`end_index` are 1-based positions of the returned slice
///   within the full result set (`end_index` is 0 for an empty set).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub page_size: u32,
    pub total_count: u32,
    pub total_pages: u32,
    pub has_previous: bool,
    pub has_next: bool,
    pub start_index: u32,
    pub end_index: u32,
}

impl<T> Page<T> {
    /// Build a page from an already-sliced item list.
    ///
    /// `page` is clamped to at least 1 and `page_size` to at least 1.
    #[must_use]
    pub fn new(items: Vec<T>, page: u32, page_size: u32, total_count: u32) -> Self {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_pages = total_count.div_ceil(page_size);
        let start = (page - 1).saturating_mul(page_size);
        let end_index = (start + u32::try_from(items.len()).unwrap_or(u32::MAX)).min(total_count);
        Self {
            items,
            page,
            page_size,
            total_count,
            total_pages,
            has_previous: page > 1,
            has_next: page < total_pages,
            start_index: start + 1,
            end_index,
        }
    }

    /// Paginate a full result set, cloning the selected window.
    #[must_use]
    pub fn slice(all: &[T], page: u32, page_size: u32) -> Self
    where
        T: Clone,
    {
        let page = page.max(1);
        let page_size = page_size.max(1);
        let total_count = u32::try_from(all.len()).unwrap_or(u32::MAX);
        let start = usize::try_from((page - 1).saturating_mul(page_size)).unwrap_or(usize::MAX);
        let window: Vec<T> = all
            .iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect();
        Self::new(window, page, page_size, total_count)
    }
}
