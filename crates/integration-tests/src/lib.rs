//! Integration tests for Rocketshoes.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p rocketshoes-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_store` - Cart store scenarios against the fixture catalog
//! - `persistence` - Carts surviving a restart through file storage
//! - `http_api` - The storefront API served on a local port
//!
//! Everything runs in-process; no external services are needed.

use std::sync::Arc;

use rocketshoes_core::{CartItem, ProductId};
use rocketshoes_storefront::catalog::StaticCatalog;
use rocketshoes_storefront::notify::ToastQueue;
use rocketshoes_storefront::services::cart::{CartOptions, CartStore};
use rocketshoes_storefront::storage::{CartStorage, MemoryStorage};

/// The storefront's catalog fixture: six products, product 1 has 3 units in
/// stock and product 4 a single unit.
pub const CATALOG_FIXTURE: &str = include_str!("../../storefront/fixtures/catalog.json");

/// Load the fixture catalog.
///
/// # Panics
///
/// Panics if the fixture is not valid JSON.
#[must_use]
#[allow(clippy::expect_used)]
pub fn fixture_catalog() -> StaticCatalog {
    StaticCatalog::from_json(CATALOG_FIXTURE).expect("catalog fixture should parse")
}

/// A cart store wired to in-memory collaborators that tests can inspect.
pub struct TestCart {
    pub store: CartStore,
    pub storage: Arc<dyn CartStorage>,
    pub toasts: Arc<ToastQueue>,
    pub key: String,
}

impl TestCart {
    /// Open an empty cart over the fixture catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::open(
            Arc::new(fixture_catalog()),
            Arc::new(MemoryStorage::new()),
            CartOptions::default(),
        )
    }

    /// Open a cart over the given collaborators, loading whatever is stored.
    #[must_use]
    pub fn open(
        catalog: Arc<StaticCatalog>,
        storage: Arc<dyn CartStorage>,
        options: CartOptions,
    ) -> Self {
        let toasts = Arc::new(ToastQueue::new());
        let key = options.storage_key.clone();
        let store = CartStore::with_options(catalog, storage.clone(), toasts.clone(), options);
        Self {
            store,
            storage,
            toasts,
            key,
        }
    }

    /// Line items currently persisted, or `None` if nothing was written.
    ///
    /// # Panics
    ///
    /// Panics if storage fails or the blob is not a valid cart.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn stored(&self) -> Option<Vec<CartItem>> {
        self.storage
            .get(&self.key)
            .expect("storage read should succeed")
            .map(|blob| serde_json::from_str(&blob).expect("stored cart should parse"))
    }

    /// `(id, amount)` pairs of the in-memory cart, in order.
    #[must_use]
    pub fn amounts(&self) -> Vec<(i32, u32)> {
        self.store
            .cart()
            .iter()
            .map(|item| (item.id.as_i32(), item.amount))
            .collect()
    }

    /// Assert the persisted blob matches the in-memory cart.
    ///
    /// # Panics
    ///
    /// Panics if they differ.
    pub fn assert_persisted(&self) {
        assert_eq!(
            self.stored().unwrap_or_default(),
            self.store.cart(),
            "persisted cart should match the in-memory cart"
        );
    }

    /// Assert no two line items share an id.
    ///
    /// # Panics
    ///
    /// Panics on a duplicate id.
    pub fn assert_unique_ids(&self) {
        let mut ids: Vec<ProductId> = self.store.cart().iter().map(|item| item.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total, "cart has duplicate line items");
    }
}

impl Default for TestCart {
    fn default() -> Self {
        Self::new()
    }
}
