//! Cart service configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! - `CART_HOST` - Bind address (default: 127.0.0.1)
//! - `CART_PORT` - Listen port (default: 3001)
//! - `SENTRY_DSN` - Sentry error tracking DSN (optional)

use std::net::{IpAddr, SocketAddr};

use kubemart_core::config::{ConfigError, parse_env};

/// Cart service configuration.
#[derive(Debug, Clone)]
pub struct CartConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

impl CartConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but unparseable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();

        let host = parse_env("CART_HOST", "127.0.0.1")?;
        let port = parse_env("CART_PORT", "3001")?;
        let sentry_dsn = std::env::var("SENTRY_DSN").ok();

        Ok(Self {
            host,
            port,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn socket_addr_combines_host_and_port() {
        let config = CartConfig {
            host: "127.0.0.1".parse().unwrap(),
            port: 3001,
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3001);
    }
}
