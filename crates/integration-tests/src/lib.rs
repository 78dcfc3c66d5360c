//! Integration tests for KubeMart.
//!
//! Tests drive the real service routers in-process via
//! `tower::ServiceExt::oneshot`; the catalog gateway's upstream is stood
//! up with `wiremock` so no real network traffic is made.
//!
//! # Test Categories
//!
//! - `cart_flow` - full cart lifecycle through the Cart Store router
//! - `catalog_gateway` - partition and failure paths through the gateway

#![cfg_attr(not(test), forbid(unsafe_code))]

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use tower::ServiceExt;

/// Send a JSON request to a router and return status and parsed body.
///
/// # Panics
///
/// Panics when the request cannot be built or the response body is not
/// JSON; tests treat that as a failure.
pub async fn send_json(
    app: Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => Request::builder().method(method).uri(uri).body(Body::empty()),
    }
    .expect("request");

    let response = app.oneshot(request).await.expect("response");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let json = serde_json::from_slice(&bytes).expect("json parse");
    (status, json)
}
