//! Shared HTTP adapter state.
//!
//! Handlers accept this bundle via `actix_web::web::Data`, so they depend
//! only on the domain ports and stay testable without network I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthGateway, CartStore, CatalogSource};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub auth: Arc<dyn AuthGateway>,
    pub catalog: Arc<dyn CatalogSource>,
    pub cart: Arc<dyn CartStore>,
}

impl HttpState {
    pub fn new(
        auth: Arc<dyn AuthGateway>,
        catalog: Arc<dyn CatalogSource>,
        cart: Arc<dyn CartStore>,
    ) -> Self {
        Self {
            auth,
            catalog,
            cart,
        }
    }
}
