//! Product route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use rocketshoes_core::{Price, ProductId, ProductRecord};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::catalog::ProductCatalog;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Product display data for listings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub price: Price,
    pub price_formatted: String,
    /// Units of this product already in the cart.
    pub amount_in_cart: u32,
}

/// Product detail data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDetailView {
    #[serde(flatten)]
    pub product: ProductView,
    /// Units the catalog reports as available.
    pub stock: u32,
}

impl ProductView {
    fn new(record: ProductRecord, amount_in_cart: u32) -> Self {
        Self {
            id: record.id,
            price_formatted: record.price.to_string(),
            title: record.title,
            image: record.image,
            price: record.price,
            amount_in_cart,
        }
    }
}

/// List all products with the amount of each already in the cart.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<ProductView>>> {
    let records = state.catalog().list_products().await?;

    let store = state.cart().await;
    let products = records
        .into_iter()
        .map(|record| {
            let in_cart = store.amount_of(record.id);
            ProductView::new(record, in_cart)
        })
        .collect();

    Ok(Json(products))
}

/// Show a single product with its available stock.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetailView>> {
    let id: ProductId = id
        .parse()
        .map_err(|_| AppError::NotFound(format!("product {id}")))?;

    let record = state.catalog().get_product(id).await?;
    let stock = state.catalog().get_stock(id).await?;
    let in_cart = state.cart().await.amount_of(id);

    Ok(Json(ProductDetailView {
        product: ProductView::new(record, in_cart),
        stock: stock.amount,
    }))
}
