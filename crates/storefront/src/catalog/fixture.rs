//! In-memory catalog loaded from a json-server style fixture.
//!
//! ```json
//! {
//!   "products": [{ "id": 1, "title": "Shoe", "price": 179.9, "image": "https://..." }],
//!   "stock": [{ "id": 1, "amount": 3 }]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use rocketshoes_core::{ProductId, ProductRecord, Stock};
use serde::Deserialize;

use super::{CatalogError, ProductCatalog};

#[derive(Debug, Deserialize)]
struct Fixture {
    #[serde(default)]
    products: Vec<ProductRecord>,
    #[serde(default)]
    stock: Vec<Stock>,
}

/// A catalog that answers from a fixed set of products and stock levels.
///
/// A product without a stock entry fails stock lookups with
/// `CatalogError::NotFound`.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    products: Vec<ProductRecord>,
    stock: HashMap<ProductId, u32>,
}

impl StaticCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a product with the given stock level.
    #[must_use]
    pub fn with_product(mut self, product: ProductRecord, stock: u32) -> Self {
        self.stock.insert(product.id, stock);
        self.products.retain(|p| p.id != product.id);
        self.products.push(product);
        self
    }

    /// Set the stock level of a product id, whether or not the product exists.
    #[must_use]
    pub fn with_stock(mut self, id: ProductId, amount: u32) -> Self {
        self.stock.insert(id, amount);
        self
    }

    /// Parse a fixture document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` if the document is not a valid fixture.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let fixture: Fixture = serde_json::from_str(json)?;

        Ok(Self {
            products: fixture.products,
            stock: fixture.stock.into_iter().map(|s| (s.id, s.amount)).collect(),
        })
    }

    /// Load a fixture document from disk.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Fixture` if the file cannot be read, or
    /// `CatalogError::Parse` if it is not a valid fixture.
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path)
            .map_err(|e| CatalogError::Fixture(format!("{}: {e}", path.display())))?;
        Self::from_json(&json)
    }
}

#[async_trait]
impl ProductCatalog for StaticCatalog {
    async fn get_product(&self, id: ProductId) -> Result<ProductRecord, CatalogError> {
        self.products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| CatalogError::NotFound(format!("products/{id}")))
    }

    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
        self.stock
            .get(&id)
            .map(|&amount| Stock { id, amount })
            .ok_or_else(|| CatalogError::NotFound(format!("stock/{id}")))
    }

    async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogError> {
        Ok(self.products.clone())
    }
}
