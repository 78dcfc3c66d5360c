//! HTTP mapping for catalog errors.
//!
//! Upstream failures are captured to Sentry and converted into a structured
//! 500 response; they never propagate past the handler boundary.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::upstream::CatalogError;

/// JSON error body served to clients.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
}

impl IntoResponse for CatalogError {
    fn into_response(self) -> Response {
        let event_id = sentry::capture_error(&self);
        tracing::error!(
            error = %self,
            sentry_event_id = %event_id,
            "Failed to fetch products"
        );

        // Upstream details stay in the logs, not in the client response.
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorBody {
                error: "Could not load products",
            }),
        )
            .into_response()
    }
}
