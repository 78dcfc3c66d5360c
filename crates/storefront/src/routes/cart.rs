//! Cart route handlers.
//!
//! Cart updates use HTMX fragments. Every mutation issues exactly one
//! request to the Cart Store and re-renders from the snapshot in the
//! store's response - the store is authoritative, there is no optimistic
//! local state. Derived totals are recomputed from the snapshot on every
//! render and never stored.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    http::StatusCode,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use kubemart_core::{CartTotals, LineItem};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use crate::clients::AddToCart;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: i64,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub item_count: u32,
    /// Transient status line; the fragment removes itself after 3 seconds.
    pub status: Option<String>,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self::from_snapshot(&[], Decimal::ZERO, None)
    }

    /// Build display data from an authoritative cart snapshot.
    #[must_use]
    pub fn from_snapshot(items: &[LineItem], tax_rate: Decimal, status: Option<String>) -> Self {
        let totals = CartTotals::compute(items, tax_rate);
        Self {
            items: items
                .iter()
                .map(|item| CartItemView {
                    id: item.id,
                    name: item.name.clone(),
                    quantity: item.quantity,
                    price: format_price(item.price),
                    line_price: format_price(item.line_price()),
                })
                .collect(),
            subtotal: format_price(totals.subtotal),
            tax: format_price(totals.tax),
            total: format_price(totals.total),
            item_count: count_quantities(items),
            status,
        }
    }
}

/// Format a decimal amount as a price string.
fn format_price(amount: Decimal) -> String {
    format!("${amount:.2}")
}

/// Total number of units in the cart, saturating instead of wrapping.
fn count_quantities(items: &[LineItem]) -> u32 {
    items
        .iter()
        .map(|item| item.quantity)
        .fold(0, u32::saturating_add)
}

/// Add to cart form data, posted from a product card.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: Option<u32>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Transient status message fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/status.html")]
pub struct StatusTemplate {
    pub message: String,
}

/// Fetch the current cart and build its display data.
///
/// A cart service failure degrades to an empty view rather than a broken
/// page.
async fn current_cart(state: &AppState, status: Option<String>) -> CartView {
    match state.cart().items().await {
        Ok(items) => CartView::from_snapshot(&items, state.config().tax_rate, status),
        Err(e) => {
            tracing::warn!("Failed to fetch cart: {e}");
            CartView::empty()
        }
    }
}

/// Cart items fragment (HTMX).
#[instrument(skip(state))]
pub async fn items(State(state): State<AppState>) -> impl IntoResponse {
    CartItemsTemplate {
        cart: current_cart(&state, None).await,
    }
}

/// Add item to cart (HTMX).
///
/// Returns a transient status fragment and an HTMX trigger so the cart
/// drawer and count badge refresh themselves from the store.
#[instrument(skip(state, form), fields(id = form.id))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<AddToCartForm>,
) -> Response {
    let item = AddToCart {
        id: form.id,
        name: form.name,
        price: form.price,
        quantity: form.quantity,
    };

    match state.cart().add(&item).await {
        Ok(mutation) => (
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            StatusTemplate {
                message: mutation.message,
            },
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to add item to cart: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                StatusTemplate {
                    message: "Could not add item to cart".to_string(),
                },
            )
                .into_response()
        }
    }
}

/// Increase a line item's quantity (HTMX).
#[instrument(skip(state))]
pub async fn increase(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    adjust(state, id, "increase").await
}

/// Decrease a line item's quantity, removing it at quantity one (HTMX).
#[instrument(skip(state))]
pub async fn decrease(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    adjust(state, id, "decrease").await
}

async fn adjust(state: AppState, id: i64, action: &str) -> Response {
    match state.cart().adjust(id, action).await {
        Ok(mutation) => render_snapshot(&state, &mutation.cart, mutation.message),
        Err(e) => {
            tracing::error!("Failed to adjust cart item {id}: {e}");
            stale_cart_response(&state).await
        }
    }
}

/// Remove a line item from the cart (HTMX).
#[instrument(skip(state))]
pub async fn remove(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match state.cart().remove(id).await {
        Ok(mutation) => render_snapshot(&state, &mutation.cart, mutation.message),
        Err(e) => {
            tracing::error!("Failed to remove cart item {id}: {e}");
            stale_cart_response(&state).await
        }
    }
}

/// Empty the cart (HTMX).
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Response {
    match state.cart().clear().await {
        Ok(mutation) => render_snapshot(&state, &[], mutation.message),
        Err(e) => {
            tracing::error!("Failed to clear cart: {e}");
            stale_cart_response(&state).await
        }
    }
}

/// Cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    let count = state
        .cart()
        .items()
        .await
        .map(|items| count_quantities(&items))
        .unwrap_or(0);

    CartCountTemplate { count }
}

/// Expired status message placeholder (HTMX swaps the fragment away).
pub async fn status_clear() -> Html<&'static str> {
    Html("")
}

/// Render a mutation's authoritative snapshot with its status message.
fn render_snapshot(state: &AppState, items: &[LineItem], message: String) -> Response {
    let cart = CartView::from_snapshot(items, state.config().tax_rate, Some(message));
    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate { cart },
    )
        .into_response()
}

/// After a failed mutation, re-read the store so the page shows its real
/// state alongside an error status.
async fn stale_cart_response(state: &AppState) -> Response {
    let cart = current_cart(state, Some("Could not update cart".to_string())).await;
    (StatusCode::OK, CartItemsTemplate { cart }).into_response()
}
