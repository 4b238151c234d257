//! Checkout error types.

use thiserror::Error;

use crate::db::RepositoryError;

/// Errors that can occur during checkout operations.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Checkout attempted with an empty cart.
    #[error("cart is empty")]
    EmptyCart,

    /// The return callback carried no confirmation token.
    #[error("payment not confirmed")]
    PaymentNotConfirmed,

    /// A confirmation token was replayed; an order with this payment
    /// reference already exists.
    #[error("payment reference already recorded")]
    DuplicateConfirmation,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}
