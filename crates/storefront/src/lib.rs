//! Rocketshoes storefront library.
//!
//! The shopping cart store and the adapters around it: product catalogs,
//! cart storage, notifications and the JSON HTTP API. The binary in
//! `main.rs` and the CLI are thin shells over this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod notify;
pub mod routes;
pub mod services;
pub mod state;
pub mod storage;

pub use routes::routes;
