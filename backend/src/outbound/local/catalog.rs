//! Deterministic fixture catalog backing mock mode.
//!
//! Six models with seeded variants, stable across restarts so cart lines
//! written to disk keep pointing at the same products. Variant ids follow
//! `laptop_id * 100 + position + 1`, so Dell XPS 15 (id 1) sells variants
//! 101, 102, and 103.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::catalog::{
    Brand, Category, LaptopDetails, LaptopImage, LaptopOverview, LaptopQuery, LaptopSummary, Page,
    PortSpec, PriceRange, SortDirection, SortField, Statistics, StockStatus, VariantDetails,
    VariantListing, VariantQuery, VariantSummary, Warranty,
};
use crate::domain::ports::{CatalogSource, CatalogSourceError};
use crate::domain::Money;

/// Fixture prices are in whole currency units.
const fn price(units: i64) -> Money {
    Money::from_minor(units * 100)
}

fn created_at() -> DateTime<Utc> {
    // 2024-01-01T00:00:00Z
    DateTime::from_timestamp(1_704_067_200, 0).unwrap_or_default()
}

fn updated_at() -> DateTime<Utc> {
    // 2024-11-02T00:00:00Z
    DateTime::from_timestamp(1_730_505_600, 0).unwrap_or_default()
}

struct LaptopSeed {
    id: u32,
    model_name: &'static str,
    brand: (u32, &'static str, &'static str, &'static str),
    category: (u32, &'static str, &'static str),
    processor: &'static str,
    gpu: &'static str,
    screen_size: &'static str,
    has_touch_screen: bool,
    release_year: u32,
    average_rating: f64,
    main_image: &'static str,
    variants: &'static [VariantSeed],
}

struct VariantSeed {
    ram: u32,
    storage: u32,
    storage_type: &'static str,
    price: i64,
    original_price: i64,
    stock: u32,
    reserved: u32,
}

const fn seed(
    ram: u32,
    storage: u32,
    storage_type: &'static str,
    price: i64,
    original_price: i64,
    stock: u32,
    reserved: u32,
) -> VariantSeed {
    VariantSeed {
        ram,
        storage,
        storage_type,
        price,
        original_price,
        stock,
        reserved,
    }
}

const GAMING: (u32, &str, &str) = (1, "Gaming", "High-performance gaming laptops");
const PROFESSIONAL: (u32, &str, &str) = (2, "Professional", "Professional workstation laptops");
const ULTRABOOK: (u32, &str, &str) = (3, "Ultrabook", "Slim and portable ultrabooks");

const SEEDS: &[LaptopSeed] = &[
    LaptopSeed {
        id: 1,
        model_name: "Dell XPS 15",
        brand: (1, "Dell", "USA", "https://logo.clearbit.com/dell.com"),
        category: GAMING,
        processor: "Intel Core i7-13700H",
        gpu: "NVIDIA RTX 4060",
        screen_size: "15.6 inches",
        has_touch_screen: true,
        release_year: 2024,
        average_rating: 4.5,
        main_image: "https://images.unsplash.com/photo-1593642632823-8f785ba67e45?w=800",
        variants: &[
            seed(16, 512, "SSD", 1499, 1699, 25, 3),
            seed(32, 1024, "NVMe SSD", 2199, 2199, 15, 2),
            seed(64, 2048, "NVMe SSD", 2899, 3099, 5, 1),
        ],
    },
    LaptopSeed {
        id: 2,
        model_name: "MacBook Pro 16",
        brand: (2, "Apple", "USA", "https://logo.clearbit.com/apple.com"),
        category: PROFESSIONAL,
        processor: "Apple M3 Pro",
        gpu: "Apple M3 Pro GPU",
        screen_size: "16 inches",
        has_touch_screen: false,
        release_year: 2024,
        average_rating: 4.8,
        main_image: "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=800",
        variants: &[
            seed(16, 512, "SSD", 2499, 2799, 30, 5),
            seed(32, 1024, "SSD", 3199, 3499, 20, 3),
            seed(64, 2048, "SSD", 3999, 3999, 10, 2),
            seed(96, 4096, "SSD", 5499, 5999, 3, 1),
        ],
    },
    LaptopSeed {
        id: 3,
        model_name: "HP Spectre x360",
        brand: (3, "HP", "USA", "https://logo.clearbit.com/hp.com"),
        category: ULTRABOOK,
        processor: "Intel Core i7-1355U",
        gpu: "Intel Iris Xe",
        screen_size: "13.5 inches",
        has_touch_screen: true,
        release_year: 2024,
        average_rating: 4.3,
        main_image: "https://images.unsplash.com/photo-1496181133206-80ce9b88a853?w=800",
        variants: &[
            seed(16, 512, "SSD", 1299, 1499, 18, 2),
            seed(32, 1024, "NVMe SSD", 1799, 1999, 12, 1),
        ],
    },
    LaptopSeed {
        id: 4,
        model_name: "Lenovo Legion 5 Pro",
        brand: (4, "Lenovo", "China", "https://logo.clearbit.com/lenovo.com"),
        category: GAMING,
        processor: "AMD Ryzen 7 7745HX",
        gpu: "NVIDIA RTX 4070",
        screen_size: "16 inches",
        has_touch_screen: false,
        release_year: 2024,
        average_rating: 4.6,
        main_image: "https://images.unsplash.com/photo-1603302576837-37561b2e2302?w=800",
        variants: &[
            seed(16, 512, "SSD", 1699, 1899, 22, 4),
            seed(32, 1024, "NVMe SSD", 2099, 2299, 14, 2),
            seed(32, 2048, "NVMe SSD", 2599, 2599, 0, 0),
        ],
    },
    LaptopSeed {
        id: 5,
        model_name: "ASUS ROG Zephyrus G14",
        brand: (5, "ASUS", "Taiwan", "https://logo.clearbit.com/asus.com"),
        category: GAMING,
        processor: "AMD Ryzen 9 7940HS",
        gpu: "NVIDIA RTX 4060",
        screen_size: "14 inches",
        has_touch_screen: false,
        release_year: 2024,
        average_rating: 4.7,
        main_image: "https://images.unsplash.com/photo-1525547719571-a2d4ac8945e2?w=800",
        variants: &[
            seed(16, 512, "SSD", 1599, 1799, 20, 3),
            seed(32, 1024, "NVMe SSD", 1999, 1999, 8, 1),
        ],
    },
    LaptopSeed {
        id: 6,
        model_name: "Microsoft Surface Laptop 5",
        brand: (6, "Microsoft", "USA", "https://logo.clearbit.com/microsoft.com"),
        category: ULTRABOOK,
        processor: "Intel Core i7-1255U",
        gpu: "Intel Iris Xe",
        screen_size: "13.5 inches",
        has_touch_screen: true,
        release_year: 2023,
        average_rating: 4.4,
        main_image: "https://images.unsplash.com/photo-1611186871348-b1ce696e52c9?w=800",
        variants: &[
            seed(8, 256, "SSD", 999, 1199, 35, 5),
            seed(16, 512, "SSD", 1399, 1599, 25, 4),
            seed(32, 1024, "SSD", 1799, 1999, 15, 2),
        ],
    },
];

fn brand(seed: &LaptopSeed) -> Brand {
    let (id, name, country, logo_url) = seed.brand;
    Brand {
        id,
        name: name.to_owned(),
        country: Some(country.to_owned()),
        logo_url: logo_url.to_owned(),
    }
}

fn category(seed: &LaptopSeed) -> Category {
    let (id, name, description) = seed.category;
    Category {
        id,
        name: name.to_owned(),
        description: Some(description.to_owned()),
    }
}

fn summary(seed: &LaptopSeed) -> LaptopSummary {
    let min = seed.variants.iter().map(|v| v.price).min().unwrap_or(0);
    let max = seed.variants.iter().map(|v| v.price).max().unwrap_or(0);
    LaptopSummary {
        id: seed.id,
        model_name: seed.model_name.to_owned(),
        brand: brand(seed),
        category: category(seed),
        processor: seed.processor.to_owned(),
        gpu: seed.gpu.to_owned(),
        screen_size: seed.screen_size.to_owned(),
        has_camera: true,
        has_keyboard: true,
        has_touch_screen: seed.has_touch_screen,
        release_year: seed.release_year,
        is_active: true,
        variant_count: u32::try_from(seed.variants.len()).unwrap_or(0),
        price_range: PriceRange {
            min: price(min),
            max: price(max),
        },
        average_rating: seed.average_rating,
        main_image: seed.main_image.to_owned(),
    }
}

/// Whole-percent discount, rounded half-up.
fn discount_percentage(current: i64, original: i64) -> u32 {
    if original <= 0 || current >= original {
        return 0;
    }
    let raw = ((original - current) * 100 + original / 2) / original;
    u32::try_from(raw).unwrap_or(0)
}

fn variants_of(seed: &LaptopSeed) -> Vec<VariantDetails> {
    let brand_prefix: String = seed.brand.1.to_uppercase().chars().take(3).collect();
    seed.variants
        .iter()
        .enumerate()
        .map(|(index, v)| {
            let id = seed.id * 100 + u32::try_from(index).unwrap_or(0) + 1;
            VariantDetails {
                id,
                sku: format!(
                    "{brand_prefix}-{}-{}-{}-{}",
                    seed.id,
                    v.ram,
                    v.storage,
                    v.storage_type.replace(' ', "")
                ),
                ram: v.ram,
                storage: v.storage,
                storage_type: v.storage_type.to_owned(),
                current_price: price(v.price),
                original_price: price(v.original_price),
                discount_percentage: discount_percentage(v.price, v.original_price),
                discount_amount: price(v.original_price - v.price),
                stock_quantity: v.stock,
                reserved_quantity: v.reserved,
                available_quantity: v.stock.saturating_sub(v.reserved),
                stock_status: StockStatus::from_counts(v.stock, v.reserved),
                reorder_level: 5,
                is_active: true,
                created_at: created_at(),
                updated_at: updated_at(),
            }
        })
        .collect()
}

fn overview(seed: &LaptopSeed) -> LaptopOverview {
    LaptopOverview {
        id: seed.id,
        model_name: seed.model_name.to_owned(),
        processor: seed.processor.to_owned(),
        gpu: seed.gpu.to_owned(),
        screen_size: seed.screen_size.to_owned(),
        has_camera: true,
        has_touch_screen: seed.has_touch_screen,
    }
}

fn details(seed: &LaptopSeed) -> LaptopDetails {
    let summary = summary(seed);
    LaptopDetails {
        description: format!(
            "The {} is a powerful {} laptop featuring the latest {} processor and {} graphics. \
             Perfect for professionals and enthusiasts who demand top-tier performance.",
            seed.model_name,
            seed.category.1.to_lowercase(),
            seed.processor,
            seed.gpu
        ),
        store_location: "123 Tech Street, Silicon Valley, CA 94000".to_owned(),
        store_contact: "+1 (555) 123-4567".to_owned(),
        created_at: created_at(),
        updated_at: updated_at(),
        ports: vec![
            PortSpec {
                id: 1,
                port_type: "USB-C".to_owned(),
                quantity: 2,
            },
            PortSpec {
                id: 2,
                port_type: "USB-A".to_owned(),
                quantity: 2,
            },
            PortSpec {
                id: 3,
                port_type: "HDMI".to_owned(),
                quantity: 1,
            },
            PortSpec {
                id: 4,
                port_type: "Audio Jack".to_owned(),
                quantity: 1,
            },
        ],
        warranty: Warranty {
            id: 1,
            duration_months: 24,
            warranty_type: "Standard".to_owned(),
            coverage: "Covers hardware defects and manufacturing issues".to_owned(),
            provider: seed.brand.1.to_owned(),
        },
        images: vec![LaptopImage {
            id: 1,
            url: seed.main_image.to_owned(),
            is_main: true,
            display_order: 1,
        }],
        variants: variants_of(seed)
            .into_iter()
            .map(|v| VariantSummary {
                id: v.id,
                sku: v.sku,
                ram: v.ram,
                storage: v.storage,
                storage_type: v.storage_type,
                current_price: v.current_price,
                stock_status: v.stock_status,
            })
            .collect(),
        statistics: Statistics {
            average_rating: seed.average_rating,
            // Deterministic stand-ins; mock mode has no review store.
            total_reviews: 50 + seed.id * 37,
            total_sales: 100 + seed.id * 151,
            view_count: 500 + seed.id * 913,
        },
        id: summary.id,
        model_name: summary.model_name,
        brand: summary.brand,
        category: summary.category,
        processor: summary.processor,
        gpu: summary.gpu,
        screen_size: summary.screen_size,
        has_camera: summary.has_camera,
        has_keyboard: summary.has_keyboard,
        has_touch_screen: summary.has_touch_screen,
        release_year: summary.release_year,
        is_active: summary.is_active,
    }
}

/// In-process catalog serving the seeded models.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixtureCatalog;

impl FixtureCatalog {
    fn find_seed(laptop_id: u32) -> Option<&'static LaptopSeed> {
        SEEDS.iter().find(|seed| seed.id == laptop_id)
    }

    /// Locate a variant across all models, with its parent summary.
    ///
    /// The local cart store uses this to price and name new lines.
    pub fn find_variant(variant_id: u32) -> Option<(LaptopSummary, VariantDetails)> {
        SEEDS.iter().find_map(|seed| {
            variants_of(seed)
                .into_iter()
                .find(|variant| variant.id == variant_id)
                .map(|variant| (summary(seed), variant))
        })
    }
}

#[async_trait]
impl CatalogSource for FixtureCatalog {
    async fn list_laptops(
        &self,
        query: &LaptopQuery,
    ) -> Result<Page<LaptopSummary>, CatalogSourceError> {
        let mut matches: Vec<LaptopSummary> = SEEDS
            .iter()
            .filter(|seed| {
                let search_hit = query.search.as_deref().is_none_or(|search| {
                    let needle = search.to_lowercase();
                    needle.is_empty()
                        || seed.model_name.to_lowercase().contains(&needle)
                        || seed.brand.1.to_lowercase().contains(&needle)
                        || seed.processor.to_lowercase().contains(&needle)
                });
                let category_hit = query
                    .category
                    .as_deref()
                    .is_none_or(|category| seed.category.1.eq_ignore_ascii_case(category));
                search_hit && category_hit
            })
            .map(summary)
            .collect();

        let descending = query.sort_direction == Some(SortDirection::Descending);
        match query.sort_by.unwrap_or_default() {
            SortField::Id => matches.sort_by_key(|laptop| laptop.id),
            SortField::ModelName => matches.sort_by(|a, b| a.model_name.cmp(&b.model_name)),
            SortField::Price => matches.sort_by_key(|laptop| laptop.price_range.min),
        }
        if descending {
            matches.reverse();
        }

        Ok(Page::slice(
            &matches,
            query.page.unwrap_or(1),
            query.page_size.unwrap_or(10),
        ))
    }

    async fn laptop_details(&self, laptop_id: u32) -> Result<LaptopDetails, CatalogSourceError> {
        Self::find_seed(laptop_id)
            .map(details)
            .ok_or_else(|| CatalogSourceError::not_found(format!("Laptop {laptop_id}")))
    }

    async fn laptop_variants(
        &self,
        laptop_id: u32,
        query: &VariantQuery,
    ) -> Result<VariantListing, CatalogSourceError> {
        let seed = Self::find_seed(laptop_id)
            .ok_or_else(|| CatalogSourceError::not_found(format!("Laptop {laptop_id}")))?;
        let mut variants = variants_of(seed);
        if query.in_stock_only {
            variants.retain(|variant| variant.stock_status.is_purchasable());
        }
        Ok(VariantListing {
            laptop: overview(seed),
            variants: Page::slice(
                &variants,
                query.page.unwrap_or(1),
                query.page_size.unwrap_or(10),
            ),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[actix_rt::test]
    async fn lists_all_models_on_one_page() {
        let page = FixtureCatalog
            .list_laptops(&LaptopQuery::default())
            .await
            .expect("listing");
        assert_eq!(page.total_count, 6);
        assert_eq!(page.items[0].model_name, "Dell XPS 15");
    }

    #[actix_rt::test]
    async fn search_matches_brand_case_insensitively() {
        let page = FixtureCatalog
            .list_laptops(&LaptopQuery {
                search: Some("apple".to_owned()),
                ..LaptopQuery::default()
            })
            .await
            .expect("listing");
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].model_name, "MacBook Pro 16");
    }

    #[actix_rt::test]
    async fn category_filter_and_price_sort_combine() {
        let page = FixtureCatalog
            .list_laptops(&LaptopQuery {
                category: Some("Gaming".to_owned()),
                sort_by: Some(SortField::Price),
                sort_direction: Some(SortDirection::Descending),
                ..LaptopQuery::default()
            })
            .await
            .expect("listing");
        assert_eq!(page.total_count, 3);
        assert_eq!(page.items[0].model_name, "Lenovo Legion 5 Pro");
    }

    #[actix_rt::test]
    async fn details_include_variant_summaries() {
        let details = FixtureCatalog.laptop_details(1).await.expect("details");
        assert_eq!(details.variants.len(), 3);
        assert_eq!(details.variants[0].id, 101);
        assert!(details.description.contains("Dell XPS 15"));
    }

    #[actix_rt::test]
    async fn unknown_laptop_is_not_found() {
        let error = FixtureCatalog
            .laptop_details(99)
            .await
            .expect_err("missing");
        assert_eq!(error.to_string(), "Laptop 99 not found");
    }

    #[actix_rt::test]
    async fn in_stock_filter_hides_exhausted_variants() {
        let listing = FixtureCatalog
            .laptop_variants(4, &VariantQuery {
                in_stock_only: true,
                ..VariantQuery::default()
            })
            .await
            .expect("variants");
        assert_eq!(listing.variants.total_count, 2);
        assert!(listing
            .variants
            .items
            .iter()
            .all(|variant| variant.stock_status.is_purchasable()));
    }

    #[rstest]
    #[case(101, "Dell XPS 15", 22)]
    #[case(204, "MacBook Pro 16", 2)]
    #[case(403, "Lenovo Legion 5 Pro", 0)]
    fn variants_are_addressable_by_global_id(
        #[case] variant_id: u32,
        #[case] model: &str,
        #[case] available: u32,
    ) {
        let (laptop, variant) =
            FixtureCatalog::find_variant(variant_id).expect("variant exists");
        assert_eq!(laptop.model_name, model);
        assert_eq!(variant.available_quantity, available);
    }

    #[test]
    fn unknown_variant_id_finds_nothing() {
        assert!(FixtureCatalog::find_variant(9_999).is_none());
    }

    #[rstest]
    #[case(1499, 1699, 12)]
    #[case(2199, 2199, 0)]
    #[case(999, 1199, 17)]
    fn discount_percentage_rounds_half_up(
        #[case] current: i64,
        #[case] original: i64,
        #[case] expected: u32,
    ) {
        assert_eq!(discount_percentage(current, original), expected);
    }

    #[test]
    fn variant_101_matches_the_seeded_stock_counts() {
        let (_, variant) = FixtureCatalog::find_variant(101).expect("variant");
        assert_eq!(variant.stock_quantity, 25);
        assert_eq!(variant.reserved_quantity, 3);
        assert_eq!(variant.stock_status, StockStatus::InStock);
        assert_eq!(variant.sku, "DEL-1-16-512-SSD");
        assert_eq!(variant.current_price, Money::from_minor(149_900));
    }
}
