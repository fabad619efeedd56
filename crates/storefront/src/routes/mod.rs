//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products               - Product listing with amounts already in the cart
//! GET  /products/{id}          - Product detail
//!
//! # Cart (JSON)
//! GET  /cart                   - Cart with subtotals and total
//! GET  /cart/count             - Number of distinct products in the cart
//! POST /cart/add               - Add one unit       {"product_id": 1}
//! POST /cart/update            - Set the amount     {"product_id": 1, "amount": 3}
//! POST /cart/remove            - Remove a product   {"product_id": 1}
//! ```
//!
//! Cart mutations always answer `200 OK` with the resulting cart and the
//! messages the operation produced. A rejected operation leaves the cart as it
//! was and carries its reason in `messages`.

pub mod cart;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // Product routes
        .nest("/products", product_routes())
        // Cart routes
        .nest("/cart", cart_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
