//! In-process adapters backing mock mode: a seeded catalog, a cart held
//! in pluggable storage, and a sign-anyone-in identity gateway.

mod auth;
mod cart_store;
mod catalog;
mod storage;

pub use auth::FixtureAuthGateway;
pub use cart_store::LocalCartStore;
pub use catalog::FixtureCatalog;
pub use storage::{CartStorage, JsonFileStorage, MemoryStorage, StorageError};
