//! CLI command implementations.

pub mod cart;
pub mod products;

use std::sync::Arc;

use rocketshoes_storefront::catalog::{CatalogError, ProductCatalog};
use rocketshoes_storefront::config::{ConfigError, StorefrontConfig};
use rocketshoes_storefront::notify::TracingNotifier;
use rocketshoes_storefront::services::cart::CartStore;
use rocketshoes_storefront::state::create_catalog;
use rocketshoes_storefront::storage::FileStorage;
use thiserror::Error;

/// Errors that abort a command.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// Catalog and cart store built from the environment.
pub struct Context {
    pub catalog: Arc<dyn ProductCatalog>,
    pub store: CartStore,
}

impl Context {
    /// Open the configured catalog and the cart stored on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the catalog
    /// fixture cannot be loaded.
    pub fn from_env() -> Result<Self, CommandError> {
        let config = StorefrontConfig::from_env()?;
        let catalog = create_catalog(&config.catalog)?;
        let storage = Arc::new(FileStorage::new(&config.cart.storage_path));

        tracing::debug!(path = %config.cart.storage_path.display(), "Opening cart storage");
        let store = CartStore::with_options(
            catalog.clone(),
            storage,
            Arc::new(TracingNotifier),
            config.cart.options(),
        );

        Ok(Self { catalog, store })
    }
}
