//! Catalog route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET /health    - Health check
//! GET /products  - Three-way catalog partition {bestSellers, onSale, all}
//! ```

use axum::{Json, Router, extract::State, routing::get};
use kubemart_core::Catalog;
use tracing::instrument;

use crate::state::AppState;
use crate::upstream::CatalogError;

/// Serve the partitioned product catalog.
#[instrument(skip(state))]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Catalog>, CatalogError> {
    let catalog = state.catalog().list_products().await?;
    Ok(Json(catalog))
}

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Create all routes for the catalog gateway.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/products", get(list_products))
}
