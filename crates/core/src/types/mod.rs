//! Core types for Rocketshoes.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod cart;
pub mod id;
pub mod price;

pub use cart::{CartItem, ProductRecord, Stock, UpdateProductAmount};
pub use id::*;
pub use price::{Price, PriceError};
