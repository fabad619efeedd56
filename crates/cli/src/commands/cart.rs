//! Cart inspection and management.
//!
//! Every mutating command prints the cart afterwards. A rejected change is
//! reported through the log and leaves the stored cart untouched.

use rocketshoes_core::{ProductId, UpdateProductAmount};
use rocketshoes_storefront::services::cart::CartStore;

use super::{CommandError, Context};

/// Print the stored cart.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn show() -> Result<(), CommandError> {
    let ctx = Context::from_env()?;
    print_cart(&ctx.store);
    Ok(())
}

/// Add one unit of a product.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub async fn add(product_id: ProductId) -> Result<(), CommandError> {
    let mut ctx = Context::from_env()?;
    ctx.store.add_product(product_id).await;
    print_cart(&ctx.store);
    Ok(())
}

/// Remove a product.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub fn remove(product_id: ProductId) -> Result<(), CommandError> {
    let mut ctx = Context::from_env()?;
    ctx.store.remove_product(product_id);
    print_cart(&ctx.store);
    Ok(())
}

/// Set the amount of a product already in the cart.
///
/// # Errors
///
/// Returns an error if the configuration is invalid.
pub async fn update(product_id: ProductId, amount: i64) -> Result<(), CommandError> {
    let mut ctx = Context::from_env()?;
    ctx.store
        .update_product_amount(UpdateProductAmount { product_id, amount })
        .await;
    print_cart(&ctx.store);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_cart(store: &CartStore) {
    if store.is_empty() {
        println!("Cart is empty");
        return;
    }

    println!("{:>4}  {:<56} {:>6} {:>10} {:>11}", "ID", "PRODUCT", "QTY", "PRICE", "SUBTOTAL");
    for item in store.cart() {
        println!(
            "{:>4}  {:<56} {:>6} {:>10} {:>11}",
            item.id,
            item.title,
            item.amount,
            item.price.to_string(),
            item.subtotal().to_string(),
        );
    }
    println!(
        "{} products, {} units, total {}",
        store.len(),
        store.total_quantity(),
        store.total()
    );
}
