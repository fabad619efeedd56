//! Cart line items and the catalog records they are built from.

use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// A product as the catalog describes it, before it is placed in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    /// Image URL.
    pub image: String,
}

/// Units of a product available for sale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

/// A product selected into the cart, with the quantity the shopper wants.
///
/// `amount` is always at least 1 while the item is in a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: ProductId,
    pub title: String,
    pub price: Price,
    pub image: String,
    pub amount: u32,
}

impl CartItem {
    /// Place a catalog product into the cart with a quantity of one.
    #[must_use]
    pub fn from_record(record: ProductRecord) -> Self {
        Self {
            id: record.id,
            title: record.title,
            price: record.price,
            image: record.image,
            amount: 1,
        }
    }

    /// Line total: unit price times amount.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.price.times(self.amount)
    }
}

/// Request to set the quantity of a product already in the cart.
///
/// `amount` is signed so that zero and negative requests can be received and
/// rejected rather than failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}
