//! Cart route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health     - Health check
//! GET    /cart       - Current line items (bare array)
//! POST   /cart       - Add item (merges quantity on existing id)
//! PATCH  /cart/{id}  - Adjust quantity (increase | decrease)
//! DELETE /cart/{id}  - Remove item (no-op if absent)
//! DELETE /cart       - Clear cart
//! ```

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use kubemart_core::LineItem;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::state::AppState;
use crate::store::{AddItemInput, CartError, QuantityAction};

/// Mutation response: a confirmation message plus the full updated cart.
#[derive(Debug, Serialize)]
pub struct CartResponse {
    pub message: &'static str,
    pub cart: Vec<LineItem>,
}

/// Confirmation-only response (clear does not echo the empty cart).
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// Adjust request body. The action is parsed as a plain string so an
/// unrecognized value maps to the invalid-action error, not a decode
/// rejection.
#[derive(Debug, Deserialize)]
pub struct AdjustInput {
    pub action: Option<String>,
}

/// Current cart contents.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Json<Vec<LineItem>> {
    Json(state.store().lock().await.snapshot())
}

/// Add an item to the cart.
#[instrument(skip(state), fields(id = ?input.id))]
pub async fn add(
    State(state): State<AppState>,
    Json(input): Json<AddItemInput>,
) -> Result<(StatusCode, Json<CartResponse>), CartError> {
    let mut store = state.store().lock().await;
    let cart = store.add(input)?.to_vec();
    tracing::debug!(items = cart.len(), "item added to cart");

    Ok((
        StatusCode::CREATED,
        Json(CartResponse {
            message: "Item added to cart",
            cart,
        }),
    ))
}

/// Increase or decrease a line item's quantity.
#[instrument(skip(state))]
pub async fn adjust(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(input): Json<AdjustInput>,
) -> Result<Json<CartResponse>, CartError> {
    let action = QuantityAction::parse(input.action.as_deref().unwrap_or(""))?;

    let mut store = state.store().lock().await;
    let cart = store.adjust_quantity(id, action)?.to_vec();

    Ok(Json(CartResponse {
        message: "Cart updated",
        cart,
    }))
}

/// Remove a line item. Removing an absent id is a no-op.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Json<CartResponse> {
    let mut store = state.store().lock().await;
    let cart = store.remove(id).to_vec();

    Json(CartResponse {
        message: "Item removed",
        cart,
    })
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<MessageResponse> {
    state.store().lock().await.clear();
    Json(MessageResponse {
        message: "Cart cleared",
    })
}

/// Liveness health check endpoint.
pub async fn health() -> &'static str {
    "ok"
}

/// Create all routes for the cart service.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/cart", get(list).post(add).delete(clear))
        .route("/cart/{id}", axum::routing::patch(adjust).delete(remove))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;

    use super::*;

    fn app() -> Router {
        routes().with_state(AppState::new())
    }

    fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json parse")
    }

    #[tokio::test]
    async fn get_cart_starts_empty() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/cart")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn post_cart_returns_created_with_message_and_cart() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/cart",
                serde_json::json!({"id": 1, "name": "Mug", "price": 12.5, "quantity": 2}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::CREATED);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Item added to cart");
        assert_eq!(json["cart"][0]["name"], "Mug");
        assert_eq!(json["cart"][0]["quantity"], 2);
    }

    #[tokio::test]
    async fn post_cart_merges_quantity_for_existing_id() {
        let app = app();
        let first = json_request(
            "POST",
            "/cart",
            serde_json::json!({"id": 1, "name": "A", "price": 10, "quantity": 1}),
        );
        let second = json_request(
            "POST",
            "/cart",
            serde_json::json!({"id": 1, "name": "A", "price": 10, "quantity": 2}),
        );

        app.clone().oneshot(first).await.expect("response");
        let response = app.oneshot(second).await.expect("response");

        let json = body_json(response).await;
        let cart = json["cart"].as_array().expect("cart array");
        assert_eq!(cart.len(), 1);
        assert_eq!(cart[0]["quantity"], 3);
    }

    #[tokio::test]
    async fn post_cart_rejects_missing_fields() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/cart",
                serde_json::json!({"id": 1, "name": "Mug"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"], "Missing item fields");
    }

    #[tokio::test]
    async fn post_cart_rejects_zero_price() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/cart",
                serde_json::json!({"id": 1, "name": "Freebie", "price": 0}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn patch_decrease_at_quantity_one_removes_the_row() {
        let app = app();
        app.clone()
            .oneshot(json_request(
                "POST",
                "/cart",
                serde_json::json!({"id": 1, "name": "A", "price": 10}),
            ))
            .await
            .expect("response");

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/cart/1",
                serde_json::json!({"action": "decrease"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["cart"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn patch_increase_bumps_quantity() {
        let app = app();
        app.clone()
            .oneshot(json_request(
                "POST",
                "/cart",
                serde_json::json!({"id": 1, "name": "A", "price": 10, "quantity": 2}),
            ))
            .await
            .expect("response");

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/cart/1",
                serde_json::json!({"action": "increase"}),
            ))
            .await
            .expect("response");

        let json = body_json(response).await;
        assert_eq!(json["cart"][0]["quantity"], 3);
    }

    #[tokio::test]
    async fn patch_unknown_id_is_not_found() {
        let response = app()
            .oneshot(json_request(
                "PATCH",
                "/cart/42",
                serde_json::json!({"action": "increase"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn patch_unknown_action_is_bad_request() {
        let app = app();
        app.clone()
            .oneshot(json_request(
                "POST",
                "/cart",
                serde_json::json!({"id": 1, "name": "A", "price": 10}),
            ))
            .await
            .expect("response");

        let response = app
            .oneshot(json_request(
                "PATCH",
                "/cart/1",
                serde_json::json!({"action": "double"}),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn delete_item_returns_updated_cart_and_tolerates_unknown_ids() {
        let app = app();
        app.clone()
            .oneshot(json_request(
                "POST",
                "/cart",
                serde_json::json!({"id": 1, "name": "A", "price": 10}),
            ))
            .await
            .expect("response");

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/cart/99")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["message"], "Item removed");
        assert_eq!(json["cart"].as_array().expect("cart array").len(), 1);

        let response = app
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/cart/1")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        let json = body_json(response).await;
        assert_eq!(json["cart"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn delete_cart_clears_everything() {
        let app = app();
        for id in 1..=3 {
            app.clone()
                .oneshot(json_request(
                    "POST",
                    "/cart",
                    serde_json::json!({"id": id, "name": "X", "price": 5}),
                ))
                .await
                .expect("response");
        }

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("DELETE")
                    .uri("/cart")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Cart cleared");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/cart")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");
        assert_eq!(body_json(response).await, serde_json::json!([]));
    }
}
