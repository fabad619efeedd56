//! Catalog listing.

use rocketshoes_storefront::catalog::ProductCatalog;

use super::{CommandError, Context};

/// Print every catalog product with its stock and the amount in the cart.
///
/// # Errors
///
/// Returns an error if the configuration is invalid or the catalog cannot be
/// listed.
#[allow(clippy::print_stdout)]
pub async fn list() -> Result<(), CommandError> {
    let ctx = Context::from_env()?;
    let products = ctx.catalog.list_products().await?;

    println!("{:>4}  {:<56} {:>10} {:>6} {:>8}", "ID", "PRODUCT", "PRICE", "STOCK", "IN CART");
    for product in products {
        let stock = match ctx.catalog.get_stock(product.id).await {
            Ok(stock) => stock.amount.to_string(),
            Err(e) => {
                tracing::warn!(product_id = %product.id, error = %e, "Stock lookup failed");
                "?".to_string()
            }
        };
        println!(
            "{:>4}  {:<56} {:>10} {:>6} {:>8}",
            product.id,
            product.title,
            product.price.to_string(),
            stock,
            ctx.store.amount_of(product.id),
        );
    }

    Ok(())
}
