//! KubeMart Catalog Gateway library.
//!
//! This crate provides the catalog gateway as a library, allowing the
//! router and upstream client to be exercised in tests without a running
//! server.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod upstream;
