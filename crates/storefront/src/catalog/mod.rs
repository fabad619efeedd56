//! Product and stock lookup.
//!
//! # Architecture
//!
//! - [`ProductCatalog`] is the port the cart store depends on
//! - [`HttpCatalog`] talks to the remote products/stock REST API with `reqwest`
//! - [`StaticCatalog`] serves a json-server style fixture from memory
//!
//! Product records are cached by [`HttpCatalog`] (5 minute default TTL).
//! Stock levels are never cached: every lookup reflects the remote service.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocketshoes_storefront::catalog::{HttpCatalog, ProductCatalog};
//!
//! let catalog = HttpCatalog::new(&config.catalog);
//! let product = catalog.get_product(ProductId::new(1)).await?;
//! let stock = catalog.get_stock(product.id).await?;
//! ```

mod fixture;
mod http;

pub use fixture::StaticCatalog;
pub use http::HttpCatalog;

use async_trait::async_trait;
use rocketshoes_core::{ProductId, ProductRecord, Stock};
use thiserror::Error;

/// Errors that can occur when looking up products or stock.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL could not be joined with a resource path.
    #[error("Invalid catalog URL: {0}")]
    Url(#[from] url::ParseError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The API answered with a non-success status.
    #[error("Catalog API returned status {0}")]
    Status(u16),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The fixture file could not be read.
    #[error("Fixture error: {0}")]
    Fixture(String),
}

/// Read access to products and their stock levels.
#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// Fetch a product by id.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the id is unknown.
    async fn get_product(&self, id: ProductId) -> Result<ProductRecord, CatalogError>;

    /// Fetch the current stock level of a product.
    async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError>;

    /// List every product in the catalog.
    async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogError>;
}
