//! Domain model: sessions, catalog entities, the cart, and the driven
//! ports the adapters implement.

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod ports;
pub mod session;
pub mod validation;

pub use cart::{CartData, CartError, CartItem, CartItems, NewLine, LAPTOP_VARIANT};
pub use catalog::{
    Brand, Category, LaptopDetails, LaptopImage, LaptopOverview, LaptopQuery, LaptopSummary, Page,
    PortSpec, PriceRange, SortDirection, SortField, Statistics, StockStatus, VariantDetails,
    VariantListing, VariantQuery, VariantSummary, Warranty,
};
pub use error::{Error, ErrorCode};
pub use money::Money;
pub use session::{SessionData, SessionTokens, SESSION_TTL_DAYS};
