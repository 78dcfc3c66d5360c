//! Catalog gateway configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `CATALOG_HOST` - Bind address (default: 127.0.0.1)
//! - `CATALOG_PORT` - Listen port (default: 3002)
//! - `UPSTREAM_URL` - Base URL of the upstream product API
//!   (default: <https://dummyjson.com>)
//! - `BEST_SELLER_STOCK_THRESHOLD` - Stock above which a product counts as
//!   a best seller (default: 80)
//! - `ON_SALE_DISCOUNT_THRESHOLD` - Discount percentage above which a
//!   product counts as on sale (default: 5)
//! - `CATALOG_CACHE_TTL_SECS` - TTL for cached upstream catalogs
//!   (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN (optional)

use std::net::{IpAddr, SocketAddr};

use kubemart_core::config::{ConfigError, get_env_or_default, parse_env};
use rust_decimal::Decimal;

/// Catalog gateway configuration.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Base URL of the upstream product catalog API
    pub upstream_url: String,
    /// Stock threshold for the best-sellers view
    pub best_seller_stock: i64,
    /// Discount threshold for the on-sale view
    pub on_sale_discount: Decimal,
    /// How long a fetched catalog stays cached, in seconds
    pub cache_ttl_secs: u64,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl CatalogConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = parse_env("CATALOG_HOST", "127.0.0.1")?;
        let port = parse_env("CATALOG_PORT", "3002")?;
        let upstream_url = get_env_or_default("UPSTREAM_URL", "https://dummyjson.com");
        let best_seller_stock = parse_env("BEST_SELLER_STOCK_THRESHOLD", "80")?;
        let on_sale_discount = parse_env("ON_SALE_DISCOUNT_THRESHOLD", "5")?;
        let cache_ttl_secs = parse_env("CATALOG_CACHE_TTL_SECS", "300")?;
        let sentry_dsn = std::env::var("SENTRY_DSN").ok();

        Ok(Self {
            host,
            port,
            upstream_url,
            best_seller_stock,
            on_sale_discount,
            cache_ttl_secs,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
