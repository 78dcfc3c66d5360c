//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::upstream::CatalogClient;

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; holds the upstream catalog client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: CatalogClient,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let catalog = CatalogClient::new(config);
        Self {
            inner: Arc::new(AppStateInner { catalog }),
        }
    }

    /// The upstream catalog client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }
}
