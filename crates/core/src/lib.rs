//! Rocketshoes Core - Shared types library.
//!
//! This crate provides the types shared by all Rocketshoes components:
//! - `storefront` - Cart store, catalog and storage adapters, HTTP API
//! - `cli` - Command-line cart client
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, and the cart/catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
