//! Session-authenticated storefront backend for the TechZone laptop shop.
//!
//! The crate is laid out hexagonally: `domain` holds entities and ports,
//! `inbound::http` exposes the REST surface, and `outbound` provides two
//! interchangeable adapter sets — the remote backend gateway and the
//! local fixture store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
