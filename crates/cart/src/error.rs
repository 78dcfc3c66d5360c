//! HTTP mapping for cart errors.
//!
//! Every error is terminal for its request: validation happens before any
//! mutation, so a 4xx never leaves partial cart state behind.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::store::CartError;

/// JSON error body, matching the `{"error": ...}` shape of the service's
/// other responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for CartError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::MissingFields | Self::InvalidAction(_) => StatusCode::BAD_REQUEST,
            Self::ItemNotFound(_) => StatusCode::NOT_FOUND,
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: CartError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn cart_error_status_codes() {
        assert_eq!(status_of(CartError::MissingFields), StatusCode::BAD_REQUEST);
        assert_eq!(
            status_of(CartError::ItemNotFound(7)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(CartError::InvalidAction("double".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn cart_error_display() {
        assert_eq!(CartError::MissingFields.to_string(), "Missing item fields");
        assert_eq!(
            CartError::ItemNotFound(7).to_string(),
            "Item not found: 7"
        );
    }
}
