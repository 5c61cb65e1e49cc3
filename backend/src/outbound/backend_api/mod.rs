//! Adapters for the remote backend REST API.
//!
//! One [`BackendApiClient`] is shared by the auth, catalog, and cart
//! adapters so they agree on the base URL, timeout, and envelope handling.

mod auth;
mod cart;
mod catalog;
mod client;
mod dto;
mod envelope;

pub use auth::RemoteAuthGateway;
pub use cart::RemoteCartStore;
pub use catalog::RemoteCatalogSource;
pub use client::{BackendApiClient, DEFAULT_TIMEOUT};
