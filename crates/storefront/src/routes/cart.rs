//! Cart route handlers.
//!
//! Every handler locks the shared cart store for its whole duration, so the
//! messages drained after an operation are exactly the ones it emitted.

use axum::{Json, extract::State};
use rocketshoes_core::{CartItem, Price, ProductId, UpdateProductAmount};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::add_breadcrumb;
use crate::services::cart::CartStore;
use crate::state::AppState;

/// Cart line display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub amount: u32,
    pub price: Price,
    pub price_formatted: String,
    pub subtotal: String,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    /// Number of distinct products.
    pub size: usize,
    pub total_quantity: u64,
}

/// Result of a cart mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartResponse {
    pub cart: CartView,
    /// Messages for the shopper; empty when the operation succeeded.
    pub messages: Vec<String>,
}

/// Cart count badge data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CartCount {
    pub count: usize,
}

/// Add/remove request body.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub product_id: ProductId,
}

// =============================================================================
// Type Conversions
// =============================================================================

impl From<&CartItem> for CartItemView {
    fn from(item: &CartItem) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            image: item.image.clone(),
            amount: item.amount,
            price: item.price,
            price_formatted: item.price.to_string(),
            subtotal: item.subtotal().to_string(),
        }
    }
}

impl From<&CartStore> for CartView {
    fn from(store: &CartStore) -> Self {
        Self {
            items: store.cart().iter().map(CartItemView::from).collect(),
            total: store.total().to_string(),
            size: store.len(),
            total_quantity: store.total_quantity(),
        }
    }
}

/// Build the mutation response, taking the messages the operation queued.
fn respond(state: &AppState, store: &CartStore) -> Json<CartResponse> {
    Json(CartResponse {
        cart: CartView::from(store),
        messages: state.toasts().drain(),
    })
}

// =============================================================================
// Handlers
// =============================================================================

/// Show the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let store = state.cart().await;
    Json(CartView::from(&*store))
}

/// Get cart count badge.
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> Json<CartCount> {
    let store = state.cart().await;
    Json(CartCount { count: store.len() })
}

/// Add one unit of a product.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Json<CartResponse> {
    let id = form.product_id.to_string();
    add_breadcrumb("cart", "Add product", Some(&[("product_id", id.as_str())]));

    let mut store = state.cart().await;
    store.add_product(form.product_id).await;
    respond(&state, &store)
}

/// Set the amount of a product in the cart.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Json(update): Json<UpdateProductAmount>,
) -> Json<CartResponse> {
    let id = update.product_id.to_string();
    let amount = update.amount.to_string();
    add_breadcrumb(
        "cart",
        "Update product amount",
        Some(&[("product_id", id.as_str()), ("amount", amount.as_str())]),
    );

    let mut store = state.cart().await;
    store.update_product_amount(update).await;
    respond(&state, &store)
}

/// Remove a product from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Json(form): Json<ProductForm>,
) -> Json<CartResponse> {
    let id = form.product_id.to_string();
    add_breadcrumb("cart", "Remove product", Some(&[("product_id", id.as_str())]));

    let mut store = state.cart().await;
    store.remove_product(form.product_id);
    respond(&state, &store)
}
