//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                     - Home page (catalog sections + cart drawer)
//! GET  /health               - Health check
//!
//! # Cart (HTMX fragments)
//! GET  /cart/items           - Cart drawer contents
//! GET  /cart/count           - Cart count badge
//! GET  /cart/status          - Empty fragment (expired status swap)
//! POST /cart/add             - Add to cart (returns status, triggers cart-updated)
//! POST /cart/{id}/increase   - Bump quantity
//! POST /cart/{id}/decrease   - Lower quantity (removes row at 1)
//! POST /cart/{id}/remove     - Remove line item
//! POST /cart/clear           - Empty the cart
//! ```

pub mod cart;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Create the cart fragment routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/items", get(cart::items))
        .route("/count", get(cart::count))
        .route("/status", get(cart::status_clear))
        .route("/add", post(cart::add))
        .route("/{id}/increase", post(cart::increase))
        .route("/{id}/decrease", post(cart::decrease))
        .route("/{id}/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/health", get(health))
        .nest("/cart", cart_routes())
}
