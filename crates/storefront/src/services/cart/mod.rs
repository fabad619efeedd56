//! Cart store.
//!
//! Holds the shopper's line items, validates changes against the catalog's
//! stock levels, and writes the cart to storage after every successful change.
//!
//! Failed operations do not return errors. They are logged, turned into a
//! shopper-facing message for the [`Notifier`], and otherwise ignored: the
//! cart and the stored blob are left exactly as they were.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut store = CartStore::new(catalog, storage, notifier);
//! store.add_product(ProductId::new(1)).await;
//! store.update_product_amount(UpdateProductAmount { product_id: ProductId::new(1), amount: 3 }).await;
//! store.remove_product(ProductId::new(1));
//! ```

mod error;

pub use error::CartError;

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rocketshoes_core::{CartItem, Price, ProductId, UpdateProductAmount};
use tracing::instrument;

use crate::catalog::ProductCatalog;
use crate::notify::Notifier;
use crate::storage::{CART_KEY, CartStorage};

/// What `add_product` does with a product that is already in the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddPolicy {
    /// Add one more unit, up to the available stock.
    #[default]
    Increment,
    /// Reject the add with `CartError::AlreadyInCart`.
    Reject,
}

impl FromStr for AddPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increment" => Ok(Self::Increment),
            "reject" => Ok(Self::Reject),
            other => Err(format!("unknown add policy '{other}' (expected increment or reject)")),
        }
    }
}

impl fmt::Display for AddPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Increment => f.write_str("increment"),
            Self::Reject => f.write_str("reject"),
        }
    }
}

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartOptions {
    /// Storage key of the serialized cart.
    pub storage_key: String,
    /// Behaviour of `add_product` for products already in the cart.
    pub add_policy: AddPolicy,
}

impl Default for CartOptions {
    fn default() -> Self {
        Self {
            storage_key: CART_KEY.to_string(),
            add_policy: AddPolicy::default(),
        }
    }
}

/// The shopper's cart.
///
/// Operations take `&mut self` and run one at a time. Consumers that share a
/// store across tasks wrap it in an async mutex held for the whole operation.
pub struct CartStore {
    cart: Vec<CartItem>,
    catalog: Arc<dyn ProductCatalog>,
    storage: Arc<dyn CartStorage>,
    notifier: Arc<dyn Notifier>,
    options: CartOptions,
}

impl CartStore {
    /// Open the cart with default options, loading any stored line items.
    #[must_use]
    pub fn new(
        catalog: Arc<dyn ProductCatalog>,
        storage: Arc<dyn CartStorage>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self::with_options(catalog, storage, notifier, CartOptions::default())
    }

    /// Open the cart, loading any line items stored under `options.storage_key`.
    ///
    /// A missing or unreadable blob starts an empty cart.
    #[must_use]
    pub fn with_options(
        catalog: Arc<dyn ProductCatalog>,
        storage: Arc<dyn CartStorage>,
        notifier: Arc<dyn Notifier>,
        options: CartOptions,
    ) -> Self {
        let cart = load_cart(storage.as_ref(), &options.storage_key);
        tracing::debug!(items = cart.len(), key = %options.storage_key, "Cart loaded");

        Self {
            cart,
            catalog,
            storage,
            notifier,
            options,
        }
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Current line items, in the order they were added.
    #[must_use]
    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    /// Number of distinct products in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cart.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cart.is_empty()
    }

    /// Quantity of `product_id` in the cart, zero if absent.
    #[must_use]
    pub fn amount_of(&self, product_id: ProductId) -> u32 {
        self.find(product_id).map_or(0, |item| item.amount)
    }

    /// Subtotal of the line item for `product_id`, if it is in the cart.
    #[must_use]
    pub fn subtotal(&self, product_id: ProductId) -> Option<Price> {
        self.find(product_id).map(CartItem::subtotal)
    }

    /// Sum of all line item amounts.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.cart.iter().map(|item| u64::from(item.amount)).sum()
    }

    /// Sum of all line subtotals.
    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.iter().map(CartItem::subtotal).sum()
    }

    /// Active settings.
    #[must_use]
    pub const fn options(&self) -> &CartOptions {
        &self.options
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add one unit of a product.
    ///
    /// A new product is fetched from the catalog and appended with amount 1.
    /// A product already in the cart gets one more unit unless that would
    /// exceed its stock.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn add_product(&mut self, product_id: ProductId) {
        if let Err(err) = self.try_add_product(product_id).await {
            self.report(err);
        }
    }

    /// Remove a product from the cart.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub fn remove_product(&mut self, product_id: ProductId) {
        if let Err(err) = self.try_remove_product(product_id) {
            self.report(err);
        }
    }

    /// Set the quantity of a product already in the cart.
    #[instrument(skip(self, update), fields(product_id = %update.product_id, amount = update.amount))]
    pub async fn update_product_amount(&mut self, update: UpdateProductAmount) {
        if let Err(err) = self.try_update_product_amount(update).await {
            self.report(err);
        }
    }

    async fn try_add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let mut updated = self.cart.clone();

        if let Some(item) = updated.iter_mut().find(|item| item.id == product_id) {
            if self.options.add_policy == AddPolicy::Reject {
                return Err(CartError::AlreadyInCart);
            }

            let stock = self.catalog.get_stock(product_id).await.map_err(|e| {
                tracing::warn!(error = %e, "Stock lookup failed");
                CartError::AddFailed
            })?;

            if item.amount >= stock.amount {
                return Err(CartError::OutOfStock);
            }

            item.amount += 1;
        } else {
            let product = self.catalog.get_product(product_id).await.map_err(|e| {
                tracing::warn!(error = %e, "Product lookup failed");
                CartError::AddFailed
            })?;

            if product.id != product_id {
                tracing::error!(returned = %product.id, "Catalog returned a different product");
                return Err(CartError::AddFailed);
            }

            updated.push(CartItem::from_record(product));
        }

        self.commit(updated, CartError::AddFailed)
    }

    fn try_remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        if self.find(product_id).is_none() {
            return Err(CartError::RemoveFailed);
        }

        let updated = self
            .cart
            .iter()
            .filter(|item| item.id != product_id)
            .cloned()
            .collect();

        self.commit(updated, CartError::RemoveFailed)
    }

    async fn try_update_product_amount(
        &mut self,
        update: UpdateProductAmount,
    ) -> Result<(), CartError> {
        let UpdateProductAmount { product_id, amount } = update;

        if self.find(product_id).is_none() {
            return Err(CartError::UpdateFailed);
        }

        let stock = self.catalog.get_stock(product_id).await.map_err(|e| {
            tracing::warn!(error = %e, "Stock lookup failed");
            CartError::UpdateFailed
        })?;

        if amount > i64::from(stock.amount) {
            return Err(CartError::OutOfStock);
        }

        // amount <= stock here, so only zero and negatives fail the conversion
        let amount = u32::try_from(amount)
            .ok()
            .filter(|&amount| amount > 0)
            .ok_or(CartError::InvalidAmount)?;

        let updated = self
            .cart
            .iter()
            .map(|item| {
                if item.id == product_id {
                    CartItem {
                        amount,
                        ..item.clone()
                    }
                } else {
                    item.clone()
                }
            })
            .collect();

        self.commit(updated, CartError::UpdateFailed)
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn find(&self, product_id: ProductId) -> Option<&CartItem> {
        self.cart.iter().find(|item| item.id == product_id)
    }

    /// Persist `updated`, then make it the current cart.
    fn commit(&mut self, updated: Vec<CartItem>, failure: CartError) -> Result<(), CartError> {
        let blob = serde_json::to_string(&updated).map_err(|e| {
            tracing::error!(error = %e, "Failed to serialize cart");
            failure
        })?;

        self.storage
            .set(&self.options.storage_key, &blob)
            .map_err(|e| {
                tracing::error!(error = %e, key = %self.options.storage_key, "Failed to persist cart");
                failure
            })?;

        self.cart = updated;
        Ok(())
    }

    fn report(&self, err: CartError) {
        tracing::info!(reason = ?err, "Cart operation rejected");
        self.notifier.error(&err.to_string());
    }
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

/// Read the stored cart, falling back to an empty one.
///
/// Line items with a zero amount and repeated ids are dropped so the loaded
/// cart upholds the same invariants as one built through the store.
fn load_cart(storage: &dyn CartStorage, key: &str) -> Vec<CartItem> {
    let blob = match storage.get(key) {
        Ok(Some(blob)) => blob,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::error!(error = %e, key = %key, "Failed to read stored cart, starting empty");
            return Vec::new();
        }
    };

    let items: Vec<CartItem> = match serde_json::from_str(&blob) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, key = %key, "Stored cart is not valid, starting empty");
            return Vec::new();
        }
    };

    let stored = items.len();
    let mut seen = HashSet::new();
    let items: Vec<CartItem> = items
        .into_iter()
        .filter(|item| item.amount > 0 && seen.insert(item.id))
        .collect();

    if items.len() != stored {
        tracing::warn!(
            dropped = stored - items.len(),
            "Dropped invalid line items from stored cart"
        );
    }

    items
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rocketshoes_core::{ProductRecord, Stock};

    use super::*;
    use crate::catalog::{CatalogError, StaticCatalog};
    use crate::notify::ToastQueue;
    use crate::storage::{MemoryStorage, StorageError};

    fn record(id: i32, title: &str, price: &str) -> ProductRecord {
        ProductRecord {
            id: ProductId::new(id),
            title: title.to_string(),
            price: Price::parse(price).unwrap(),
            image: "x".to_string(),
        }
    }

    fn item(id: i32, amount: u32) -> CartItem {
        CartItem {
            amount,
            ..CartItem::from_record(record(id, "Shoe", "10"))
        }
    }

    struct Harness {
        store: CartStore,
        storage: Arc<MemoryStorage>,
        toasts: Arc<ToastQueue>,
    }

    impl Harness {
        fn new(catalog: StaticCatalog, cart: &[CartItem]) -> Self {
            Self::with_policy(catalog, cart, AddPolicy::Increment)
        }

        fn with_policy(catalog: StaticCatalog, cart: &[CartItem], add_policy: AddPolicy) -> Self {
            let storage = Arc::new(MemoryStorage::with_entry(
                CART_KEY,
                &serde_json::to_string(cart).unwrap(),
            ));
            let toasts = Arc::new(ToastQueue::new());
            let store = CartStore::with_options(
                Arc::new(catalog),
                storage.clone(),
                toasts.clone(),
                CartOptions {
                    add_policy,
                    ..CartOptions::default()
                },
            );
            Self {
                store,
                storage,
                toasts,
            }
        }

        fn stored(&self) -> Vec<CartItem> {
            serde_json::from_str(&self.storage.get(CART_KEY).unwrap().unwrap()).unwrap()
        }
    }

    /// Storage whose writes always fail.
    struct ReadOnlyStorage(MemoryStorage);

    impl CartStorage for ReadOnlyStorage {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("read-only")))
        }
    }

    /// Catalog that answers every product lookup with the same record.
    struct MislabeledCatalog;

    #[async_trait::async_trait]
    impl ProductCatalog for MislabeledCatalog {
        async fn get_product(&self, _id: ProductId) -> Result<ProductRecord, CatalogError> {
            Ok(record(2, "Boot", "20"))
        }

        async fn get_stock(&self, id: ProductId) -> Result<Stock, CatalogError> {
            Ok(Stock { id, amount: 10 })
        }

        async fn list_products(&self) -> Result<Vec<ProductRecord>, CatalogError> {
            Ok(Vec::new())
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    #[test]
    fn test_load_missing_blob_is_empty() {
        let store = CartStore::new(
            Arc::new(StaticCatalog::new()),
            Arc::new(MemoryStorage::new()),
            Arc::new(ToastQueue::new()),
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_corrupt_blob_is_empty() {
        let store = CartStore::new(
            Arc::new(StaticCatalog::new()),
            Arc::new(MemoryStorage::with_entry(CART_KEY, "{not json")),
            Arc::new(ToastQueue::new()),
        );
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_drops_duplicates_and_zero_amounts() {
        let blob = serde_json::to_string(&[item(1, 2), item(2, 0), item(1, 5), item(3, 1)]).unwrap();
        let store = CartStore::new(
            Arc::new(StaticCatalog::new()),
            Arc::new(MemoryStorage::with_entry(CART_KEY, &blob)),
            Arc::new(ToastQueue::new()),
        );
        assert_eq!(store.cart(), &[item(1, 2), item(3, 1)]);
    }

    #[test]
    fn test_load_uses_configured_key() {
        let blob = serde_json::to_string(&[item(4, 1)]).unwrap();
        let store = CartStore::with_options(
            Arc::new(StaticCatalog::new()),
            Arc::new(MemoryStorage::with_entry("custom", &blob)),
            Arc::new(ToastQueue::new()),
            CartOptions {
                storage_key: "custom".to_string(),
                add_policy: AddPolicy::Increment,
            },
        );
        assert_eq!(store.cart(), &[item(4, 1)]);
    }

    // =========================================================================
    // add_product
    // =========================================================================

    #[tokio::test]
    async fn test_add_new_product_appends_with_amount_one() {
        let catalog = StaticCatalog::new().with_product(record(1, "Shoe", "10"), 5);
        let mut h = Harness::new(catalog, &[]);

        h.store.add_product(ProductId::new(1)).await;

        let expected = CartItem {
            id: ProductId::new(1),
            title: "Shoe".to_string(),
            price: Price::parse("10").unwrap(),
            image: "x".to_string(),
            amount: 1,
        };
        assert_eq!(h.store.cart(), &[expected]);
        assert_eq!(h.stored(), h.store.cart());
        assert!(h.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_add_existing_product_increments_by_one() {
        let catalog = StaticCatalog::new()
            .with_product(record(1, "Renamed", "99"), 3)
            .with_product(record(2, "Boot", "20"), 3);
        let mut h = Harness::new(catalog, &[item(1, 1), item(2, 2)]);

        h.store.add_product(ProductId::new(1)).await;

        // Title and price come from the cart, not the catalog.
        assert_eq!(h.store.cart(), &[item(1, 2), item(2, 2)]);
        assert_eq!(h.stored(), h.store.cart());
    }

    #[tokio::test]
    async fn test_add_existing_product_at_stock_is_rejected() {
        let catalog = StaticCatalog::new().with_product(record(1, "Shoe", "10"), 2);
        let mut h = Harness::new(catalog, &[item(1, 2)]);

        h.store.add_product(ProductId::new(1)).await;

        assert_eq!(h.store.cart(), &[item(1, 2)]);
        assert_eq!(h.stored(), vec![item(1, 2)]);
        assert_eq!(h.toasts.drain(), vec!["Requested quantity out of stock"]);
    }

    #[tokio::test]
    async fn test_add_existing_product_above_stock_is_rejected() {
        let catalog = StaticCatalog::new().with_product(record(1, "Shoe", "10"), 1);
        let mut h = Harness::new(catalog, &[item(1, 4)]);

        h.store.add_product(ProductId::new(1)).await;

        assert_eq!(h.store.cart(), &[item(1, 4)]);
        assert_eq!(h.toasts.drain(), vec!["Requested quantity out of stock"]);
    }

    #[tokio::test]
    async fn test_add_unknown_product_fails() {
        let mut h = Harness::new(StaticCatalog::new(), &[item(1, 1)]);

        h.store.add_product(ProductId::new(9)).await;

        assert_eq!(h.store.cart(), &[item(1, 1)]);
        assert_eq!(h.toasts.drain(), vec!["Error adding product"]);
    }

    #[tokio::test]
    async fn test_add_existing_product_without_stock_record_fails() {
        let mut h = Harness::new(StaticCatalog::new(), &[item(1, 1)]);

        h.store.add_product(ProductId::new(1)).await;

        assert_eq!(h.store.cart(), &[item(1, 1)]);
        assert_eq!(h.toasts.drain(), vec!["Error adding product"]);
    }

    #[tokio::test]
    async fn test_add_with_reject_policy() {
        let catalog = StaticCatalog::new().with_product(record(1, "Shoe", "10"), 5);
        let mut h = Harness::with_policy(catalog, &[item(1, 1)], AddPolicy::Reject);

        h.store.add_product(ProductId::new(1)).await;

        assert_eq!(h.store.cart(), &[item(1, 1)]);
        assert_eq!(h.toasts.drain(), vec!["The product is already in the cart."]);
    }

    #[tokio::test]
    async fn test_add_rejects_mismatched_catalog_record() {
        let storage = Arc::new(MemoryStorage::new());
        let toasts = Arc::new(ToastQueue::new());
        let mut store = CartStore::new(Arc::new(MislabeledCatalog), storage, toasts.clone());

        store.add_product(ProductId::new(1)).await;

        assert!(store.is_empty());
        assert_eq!(toasts.drain(), vec!["Error adding product"]);
    }

    // =========================================================================
    // remove_product
    // =========================================================================

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let mut h = Harness::new(StaticCatalog::new(), &[item(1, 1), item(2, 3), item(3, 2)]);

        h.store.remove_product(ProductId::new(2));

        assert_eq!(h.store.cart(), &[item(1, 1), item(3, 2)]);
        assert_eq!(h.stored(), h.store.cart());
        assert!(h.toasts.is_empty());
    }

    #[test]
    fn test_remove_absent_product_fails() {
        let mut h = Harness::new(StaticCatalog::new(), &[item(1, 1)]);

        h.store.remove_product(ProductId::new(2));

        assert_eq!(h.store.cart(), &[item(1, 1)]);
        assert_eq!(h.toasts.drain(), vec!["Error removing product"]);
    }

    // =========================================================================
    // update_product_amount
    // =========================================================================

    #[tokio::test]
    async fn test_update_sets_amount() {
        let catalog = StaticCatalog::new().with_stock(ProductId::new(1), 5);
        let mut h = Harness::new(catalog, &[item(1, 1), item(2, 1)]);

        h.store
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(1),
                amount: 5,
            })
            .await;

        assert_eq!(h.store.cart(), &[item(1, 5), item(2, 1)]);
        assert_eq!(h.stored(), h.store.cart());
        assert!(h.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_update_to_zero_is_rejected() {
        let catalog = StaticCatalog::new().with_stock(ProductId::new(1), 5);
        let mut h = Harness::new(catalog, &[item(1, 1)]);

        h.store
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(1),
                amount: 0,
            })
            .await;

        assert_eq!(h.store.cart(), &[item(1, 1)]);
        assert_eq!(h.toasts.drain(), vec!["Minimum amount reached"]);
    }

    #[tokio::test]
    async fn test_update_to_negative_is_rejected() {
        let catalog = StaticCatalog::new().with_stock(ProductId::new(1), 5);
        let mut h = Harness::new(catalog, &[item(1, 2)]);

        h.store
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(1),
                amount: -3,
            })
            .await;

        assert_eq!(h.store.cart(), &[item(1, 2)]);
        assert_eq!(h.toasts.drain(), vec!["Minimum amount reached"]);
    }

    #[tokio::test]
    async fn test_update_above_stock_is_rejected() {
        let catalog = StaticCatalog::new().with_stock(ProductId::new(1), 2);
        let mut h = Harness::new(catalog, &[item(1, 1)]);

        h.store
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(1),
                amount: 3,
            })
            .await;

        assert_eq!(h.store.cart(), &[item(1, 1)]);
        assert_eq!(h.toasts.drain(), vec!["Requested quantity out of stock"]);
    }

    #[tokio::test]
    async fn test_update_absent_product_fails() {
        let catalog = StaticCatalog::new().with_stock(ProductId::new(2), 2);
        let mut h = Harness::new(catalog, &[item(1, 1)]);

        h.store
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(2),
                amount: 1,
            })
            .await;

        assert_eq!(h.store.cart(), &[item(1, 1)]);
        assert_eq!(h.toasts.drain(), vec!["Error updating product amount"]);
    }

    #[tokio::test]
    async fn test_update_with_failed_stock_lookup() {
        let mut h = Harness::new(StaticCatalog::new(), &[item(1, 1)]);

        h.store
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(1),
                amount: 2,
            })
            .await;

        assert_eq!(h.store.cart(), &[item(1, 1)]);
        assert_eq!(h.toasts.drain(), vec!["Error updating product amount"]);
    }

    // =========================================================================
    // Persistence failures
    // =========================================================================

    #[tokio::test]
    async fn test_failed_write_leaves_cart_unchanged() {
        let blob = serde_json::to_string(&[item(1, 1)]).unwrap();
        let catalog = StaticCatalog::new()
            .with_product(record(1, "Shoe", "10"), 5)
            .with_product(record(2, "Boot", "20"), 5);
        let toasts = Arc::new(ToastQueue::new());
        let mut store = CartStore::new(
            Arc::new(catalog),
            Arc::new(ReadOnlyStorage(MemoryStorage::with_entry(CART_KEY, &blob))),
            toasts.clone(),
        );

        store.add_product(ProductId::new(2)).await;
        store.add_product(ProductId::new(1)).await;
        store.remove_product(ProductId::new(1));
        store
            .update_product_amount(UpdateProductAmount {
                product_id: ProductId::new(1),
                amount: 3,
            })
            .await;

        assert_eq!(store.cart(), &[item(1, 1)]);
        assert_eq!(
            toasts.drain(),
            vec![
                "Error adding product",
                "Error adding product",
                "Error removing product",
                "Error updating product amount",
            ]
        );
    }

    // =========================================================================
    // Totals
    // =========================================================================

    #[test]
    fn test_totals() {
        let mut boot = item(2, 3);
        boot.price = Price::parse("2.50").unwrap();
        let h = Harness::new(StaticCatalog::new(), &[item(1, 2), boot]);

        assert_eq!(h.store.len(), 2);
        assert_eq!(h.store.total_quantity(), 5);
        assert_eq!(h.store.amount_of(ProductId::new(2)), 3);
        assert_eq!(h.store.amount_of(ProductId::new(7)), 0);
        assert_eq!(h.store.total(), Price::parse("27.50").unwrap());
        assert_eq!(
            h.store.subtotal(ProductId::new(2)),
            Some(Price::parse("7.50").unwrap())
        );
        assert_eq!(h.store.subtotal(ProductId::new(7)), None);
    }

    #[tokio::test]
    async fn test_totals_with_extreme_price_do_not_panic() {
        let catalog = StaticCatalog::new().with_product(
            record(1, "Shoe", "79228162514264337593543950335"),
            5,
        );
        let mut h = Harness::new(catalog, &[]);

        h.store.add_product(ProductId::new(1)).await;
        h.store.add_product(ProductId::new(1)).await;

        assert_eq!(h.store.amount_of(ProductId::new(1)), 2);
        // Saturates at the largest representable price.
        assert_eq!(
            h.store.total(),
            Price::parse("79228162514264337593543950335").unwrap()
        );
        assert!(h.toasts.is_empty());
    }

    #[test]
    fn test_add_policy_from_str() {
        assert_eq!("increment".parse::<AddPolicy>().unwrap(), AddPolicy::Increment);
        assert_eq!(" REJECT ".parse::<AddPolicy>().unwrap(), AddPolicy::Reject);
        assert!("merge".parse::<AddPolicy>().is_err());
        assert_eq!(AddPolicy::Reject.to_string(), "reject");
    }
}
