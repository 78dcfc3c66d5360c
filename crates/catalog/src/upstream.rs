//! Upstream product catalog client.
//!
//! Fetches the third-party catalog, reshapes each raw record into the
//! [`CatalogProduct`] projection, and partitions the set into the
//! best-sellers / on-sale / all views. Successful catalogs are cached with
//! a short TTL; failures are never cached.

use std::sync::Arc;
use std::time::Duration;

use kubemart_core::{Catalog, CatalogProduct};
use moka::future::Cache;
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::CatalogConfig;

const CACHE_KEY: &str = "catalog";

/// Errors that can occur when talking to the upstream catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {0}")]
    UpstreamStatus(u16),

    /// Upstream body was not the expected product-list shape.
    #[error("Malformed upstream payload: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Raw upstream product record. Field names follow the upstream API;
/// everything beyond id/title/price is optional so one sparse record does
/// not sink the whole catalog.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawProduct {
    id: i64,
    title: String,
    price: Decimal,
    #[serde(default)]
    category: String,
    thumbnail: Option<String>,
    discount_percentage: Option<Decimal>,
    stock: Option<i64>,
    brand: Option<String>,
    description: Option<String>,
    rating: Option<Decimal>,
}

#[derive(Debug, Deserialize)]
struct RawCatalog {
    products: Vec<RawProduct>,
}

impl From<RawProduct> for CatalogProduct {
    fn from(raw: RawProduct) -> Self {
        Self {
            id: raw.id,
            name: raw.title,
            price: raw.price,
            category: raw.category,
            image: raw.thumbnail.unwrap_or_default(),
            discount: raw.discount_percentage,
            stock: raw.stock,
            brand: raw.brand,
            description: raw.description,
            rating: raw.rating,
        }
    }
}

/// Client for the upstream product catalog.
///
/// Stateless across requests apart from the read cache; clones share the
/// same connection pool and cache.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    best_seller_stock: i64,
    on_sale_discount: Decimal,
    cache: Cache<&'static str, Catalog>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(config.cache_ttl_secs))
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.upstream_url.trim_end_matches('/').to_string(),
                best_seller_stock: config.best_seller_stock,
                on_sale_discount: config.on_sale_discount,
                cache,
            }),
        }
    }

    /// Fetch, project, and partition the full product catalog.
    ///
    /// `all` preserves upstream ordering; the two filtered views are
    /// subsets of it selected by the configured thresholds.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` when the upstream call fails, answers with a
    /// non-success status, or returns a payload without a product array.
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> Result<Catalog, CatalogError> {
        if let Some(catalog) = self.inner.cache.get(CACHE_KEY).await {
            debug!("Cache hit for catalog");
            return Ok(catalog);
        }

        let url = format!("{}/products?limit=100", self.inner.base_url);
        let response = self.inner.client.get(&url).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "Upstream catalog returned non-success status"
            );
            return Err(CatalogError::UpstreamStatus(status.as_u16()));
        }

        let raw: RawCatalog = serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body.chars().take(500).collect::<String>(),
                "Failed to parse upstream catalog payload"
            );
            e
        })?;

        let catalog = self.partition(raw.products);
        self.inner.cache.insert(CACHE_KEY, catalog.clone()).await;

        Ok(catalog)
    }

    fn partition(&self, products: Vec<RawProduct>) -> Catalog {
        let all: Vec<CatalogProduct> = products.into_iter().map(CatalogProduct::from).collect();

        let best_sellers = all
            .iter()
            .filter(|p| p.stock.is_some_and(|s| s > self.inner.best_seller_stock))
            .cloned()
            .collect();
        let on_sale = all
            .iter()
            .filter(|p| p.discount.is_some_and(|d| d > self.inner.on_sale_discount))
            .cloned()
            .collect();

        Catalog {
            best_sellers,
            on_sale,
            all,
        }
    }

    /// Drop any cached catalog.
    pub async fn invalidate(&self) {
        self.inner.cache.invalidate(CACHE_KEY).await;
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn test_config(upstream_url: String) -> CatalogConfig {
        CatalogConfig {
            host: "127.0.0.1".parse().expect("addr"),
            port: 0,
            upstream_url,
            best_seller_stock: 80,
            on_sale_discount: Decimal::from(5),
            cache_ttl_secs: 300,
            sentry_dsn: None,
        }
    }

    fn raw_product(id: i64, stock: i64, discount: f64) -> serde_json::Value {
        json!({
            "id": id,
            "title": format!("Product {id}"),
            "price": 9.99,
            "category": "misc",
            "thumbnail": format!("https://cdn.example.com/{id}.png"),
            "discountPercentage": discount,
            "stock": stock,
        })
    }

    #[tokio::test]
    async fn partitions_catalog_by_thresholds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .and(query_param("limit", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [
                    raw_product(1, 90, 2.0),  // best seller only
                    raw_product(2, 10, 12.5), // on sale only
                    raw_product(3, 85, 7.0),  // both
                    raw_product(4, 5, 1.0),   // neither
                ]
            })))
            .mount(&server)
            .await;

        let client = CatalogClient::new(&test_config(server.uri()));
        let catalog = client.list_products().await.expect("catalog");

        let ids = |items: &[CatalogProduct]| items.iter().map(|p| p.id).collect::<Vec<_>>();
        assert_eq!(ids(&catalog.best_sellers), vec![1, 3]);
        assert_eq!(ids(&catalog.on_sale), vec![2, 3]);
        assert_eq!(ids(&catalog.all), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn projects_upstream_field_names() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [{
                    "id": 7,
                    "title": "Espresso Machine",
                    "price": 129.99,
                    "category": "kitchen",
                    "thumbnail": "https://cdn.example.com/espresso.png",
                    "discountPercentage": 8.5,
                    "stock": 42,
                    "brand": "Illy",
                    "rating": 4.5,
                }]
            })))
            .mount(&server)
            .await;

        let client = CatalogClient::new(&test_config(server.uri()));
        let catalog = client.list_products().await.expect("catalog");

        let product = catalog.all.first().expect("one product");
        assert_eq!(product.name, "Espresso Machine");
        assert_eq!(product.image, "https://cdn.example.com/espresso.png");
        assert_eq!(product.discount, Some(Decimal::new(85, 1)));
        assert_eq!(product.brand.as_deref(), Some("Illy"));
        assert_eq!(product.description, None);
    }

    #[tokio::test]
    async fn non_array_payload_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"products": "unavailable"})),
            )
            .mount(&server)
            .await;

        let client = CatalogClient::new(&test_config(server.uri()));
        let err = client.list_products().await.expect_err("parse failure");
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn upstream_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = CatalogClient::new(&test_config(server.uri()));
        let err = client.list_products().await.expect_err("upstream failure");
        assert!(matches!(err, CatalogError::UpstreamStatus(503)));
    }

    #[tokio::test]
    async fn second_fetch_is_served_from_cache() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [raw_product(1, 90, 2.0)]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CatalogClient::new(&test_config(server.uri()));
        let first = client.list_products().await.expect("first fetch");
        let second = client.list_products().await.expect("cached fetch");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn invalidate_forces_a_fresh_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [raw_product(1, 90, 2.0)]
            })))
            .expect(2)
            .mount(&server)
            .await;

        let client = CatalogClient::new(&test_config(server.uri()));
        client.list_products().await.expect("first fetch");
        client.invalidate().await;
        client.list_products().await.expect("refetch after invalidate");
    }

    #[tokio::test]
    async fn failures_are_not_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(500))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [raw_product(1, 90, 2.0)]
            })))
            .mount(&server)
            .await;

        let client = CatalogClient::new(&test_config(server.uri()));
        client.list_products().await.expect_err("first fetch fails");
        let catalog = client.list_products().await.expect("retry succeeds");
        assert_eq!(catalog.all.len(), 1);
    }
}
