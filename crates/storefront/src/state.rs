//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::catalog::{CatalogError, HttpCatalog, ProductCatalog, StaticCatalog};
use crate::config::{CatalogConfig, StorefrontConfig};
use crate::notify::ToastQueue;
use crate::services::cart::{CartOptions, CartStore};
use crate::storage::{CartStorage, FileStorage};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The cart store sits behind an
/// async mutex so each cart operation runs to completion, catalog lookups
/// included, before the next one sees the cart.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    catalog: Arc<dyn ProductCatalog>,
    cart: Mutex<CartStore>,
    toasts: Arc<ToastQueue>,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Uses the fixture catalog when `CATALOG_FIXTURE_PATH` is set, otherwise
    /// the HTTP catalog, and file-backed cart storage.
    ///
    /// # Errors
    ///
    /// Returns an error if the catalog fixture cannot be loaded.
    pub fn new(config: &StorefrontConfig) -> Result<Self, CatalogError> {
        let catalog = create_catalog(&config.catalog)?;
        let storage = Arc::new(FileStorage::new(&config.cart.storage_path));
        Ok(Self::from_parts(catalog, storage, config.cart.options()))
    }

    /// Create application state from already-built collaborators.
    #[must_use]
    pub fn from_parts(
        catalog: Arc<dyn ProductCatalog>,
        storage: Arc<dyn CartStorage>,
        options: CartOptions,
    ) -> Self {
        let toasts = Arc::new(ToastQueue::new());
        let store = CartStore::with_options(catalog.clone(), storage, toasts.clone(), options);

        Self {
            inner: Arc::new(AppStateInner {
                catalog,
                cart: Mutex::new(store),
                toasts,
            }),
        }
    }

    /// Get a reference to the product catalog.
    #[must_use]
    pub fn catalog(&self) -> &dyn ProductCatalog {
        self.inner.catalog.as_ref()
    }

    /// Lock the cart store for one operation.
    pub async fn cart(&self) -> MutexGuard<'_, CartStore> {
        self.inner.cart.lock().await
    }

    /// Messages the cart store has emitted since the last drain.
    #[must_use]
    pub fn toasts(&self) -> &ToastQueue {
        &self.inner.toasts
    }
}

/// Build the catalog selected by configuration.
///
/// # Errors
///
/// Returns an error if the catalog fixture cannot be loaded.
pub fn create_catalog(config: &CatalogConfig) -> Result<Arc<dyn ProductCatalog>, CatalogError> {
    if let Some(path) = &config.fixture_path {
        tracing::info!(path = %path.display(), "Using fixture catalog");
        return Ok(Arc::new(StaticCatalog::from_path(path)?));
    }

    tracing::info!(url = %config.api_url, "Using HTTP catalog");
    Ok(Arc::new(HttpCatalog::new(config)))
}
