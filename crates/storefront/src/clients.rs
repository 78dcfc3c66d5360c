//! Service clients for the Cart Store and Catalog Gateway.
//!
//! Thin `reqwest` wrappers. The cart client deserializes the store's
//! `{message, cart}` mutation responses so handlers can re-render from the
//! authoritative snapshot instead of keeping local state.

use kubemart_core::{Catalog, LineItem};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::instrument;

/// Errors from the backing services.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status.
    #[error("{service} returned status {status}: {message}")]
    Service {
        service: &'static str,
        status: u16,
        message: String,
    },
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Cart Store mutation response: confirmation plus the full updated cart.
#[derive(Debug, Deserialize)]
pub struct CartMutation {
    pub message: String,
    #[serde(default)]
    pub cart: Vec<LineItem>,
}

/// Payload for adding a product to the cart.
#[derive(Debug, Serialize)]
pub struct AddToCart {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

async fn decode<T: DeserializeOwned>(
    service: &'static str,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .map_or_else(|_| "unknown error".to_string(), |body| body.error);
    Err(ApiError::Service {
        service,
        status: status.as_u16(),
        message,
    })
}

/// Client for the Catalog Gateway.
#[derive(Clone)]
pub struct CatalogApi {
    client: reqwest::Client,
    base_url: String,
}

impl CatalogApi {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch the partitioned catalog.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the gateway is unreachable or reports a
    /// failure.
    #[instrument(skip(self))]
    pub async fn catalog(&self) -> Result<Catalog, ApiError> {
        let response = self
            .client
            .get(format!("{}/products", self.base_url))
            .send()
            .await?;
        decode("catalog gateway", response).await
    }
}

/// Client for the Cart Store.
#[derive(Clone)]
pub struct CartApi {
    client: reqwest::Client,
    base_url: String,
}

impl CartApi {
    #[must_use]
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Current cart contents.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the cart service is unreachable.
    #[instrument(skip(self))]
    pub async fn items(&self) -> Result<Vec<LineItem>, ApiError> {
        let response = self
            .client
            .get(format!("{}/cart", self.base_url))
            .send()
            .await?;
        decode("cart service", response).await
    }

    /// Add a product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on connection failure or a 400 validation
    /// rejection.
    #[instrument(skip(self, item), fields(id = item.id))]
    pub async fn add(&self, item: &AddToCart) -> Result<CartMutation, ApiError> {
        let response = self
            .client
            .post(format!("{}/cart", self.base_url))
            .json(item)
            .send()
            .await?;
        decode("cart service", response).await
    }

    /// Increase or decrease a line item's quantity.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on connection failure, unknown id, or
    /// unrecognized action.
    #[instrument(skip(self))]
    pub async fn adjust(&self, id: i64, action: &str) -> Result<CartMutation, ApiError> {
        let response = self
            .client
            .patch(format!("{}/cart/{id}", self.base_url))
            .json(&serde_json::json!({ "action": action }))
            .send()
            .await?;
        decode("cart service", response).await
    }

    /// Remove a line item (no-op on the service side if absent).
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the cart service is unreachable.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: i64) -> Result<CartMutation, ApiError> {
        let response = self
            .client
            .delete(format!("{}/cart/{id}", self.base_url))
            .send()
            .await?;
        decode("cart service", response).await
    }

    /// Empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` if the cart service is unreachable.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<CartMutation, ApiError> {
        let response = self
            .client
            .delete(format!("{}/cart", self.base_url))
            .send()
            .await?;
        decode("cart service", response).await
    }
}
