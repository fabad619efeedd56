//! Cart error types.

use thiserror::Error;

/// Reasons a cart operation is rejected.
///
/// The `Display` text is the message shown to the shopper.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product is already in the cart and the add policy rejects repeats.
    #[error("The product is already in the cart.")]
    AlreadyInCart,

    /// The requested quantity exceeds the available stock.
    #[error("Requested quantity out of stock")]
    OutOfStock,

    /// The requested quantity is zero or negative.
    #[error("Minimum amount reached")]
    InvalidAmount,

    /// The product could not be added.
    #[error("Error adding product")]
    AddFailed,

    /// The product could not be removed.
    #[error("Error removing product")]
    RemoveFailed,

    /// The product amount could not be updated.
    #[error("Error updating product amount")]
    UpdateFailed,
}
