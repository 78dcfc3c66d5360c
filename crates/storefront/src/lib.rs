//! KubeMart Storefront library.
//!
//! This crate provides the storefront as a library, allowing the router
//! and service clients to be exercised in tests without a running server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod clients;
pub mod config;
pub mod routes;
pub mod state;
