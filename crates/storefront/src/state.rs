//! Application state shared across handlers.

use std::sync::Arc;

use crate::clients::{CartApi, CatalogApi};
use crate::config::StorefrontConfig;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; the two service clients share one
/// `reqwest` connection pool.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    cart: CartApi,
    catalog: CatalogApi,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let client = reqwest::Client::new();
        let cart = CartApi::new(client.clone(), &config.cart_api_url);
        let catalog = CatalogApi::new(client, &config.product_api_url);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                cart,
                catalog,
            }),
        }
    }

    /// The storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// The Cart Store client.
    #[must_use]
    pub fn cart(&self) -> &CartApi {
        &self.inner.cart
    }

    /// The Catalog Gateway client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogApi {
        &self.inner.catalog
    }
}
