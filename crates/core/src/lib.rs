//! KubeMart Core - Shared types library.
//!
//! This crate provides common types used across all KubeMart components:
//! - `cart` - Cart Store service (in-memory line items)
//! - `catalog` - Catalog Gateway service (upstream product proxy)
//! - `storefront` - Server-rendered consumer of the two services
//!
//! # Architecture
//!
//! The core crate contains types plus the shared env-config plumbing - no
//! HTTP clients, no service logic. This keeps it lightweight and allows it
//! to be used anywhere.
//!
//! # Modules
//!
//! - [`cart`] - Cart line items and derived totals
//! - [`catalog`] - Catalog product projection and partition views
//! - [`config`] - Env-var parsing helpers and the shared `ConfigError`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod config;

pub use cart::{CartTotals, LineItem, default_tax_rate};
pub use catalog::{Catalog, CatalogProduct};
pub use config::ConfigError;
