//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - The cart store: add, remove and update products against the
//!   catalog's stock, persisting every change

pub mod cart;
