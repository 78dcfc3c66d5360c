//! KubeMart Cart Store library.
//!
//! This crate provides the cart service as a library, allowing the router
//! and store to be exercised in tests without a running server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod store;
