//! Cart ledger service.
//!
//! Per-user mapping of product to quantity: add accumulates, remove is
//! owner-scoped and idempotent, totals follow current catalog pricing.

use sqlx::SqlitePool;
use thiserror::Error;

use juniper_core::{CartItemId, Price, ProductId, UserId};

use crate::db::RepositoryError;
use crate::db::cart::CartRepository;
use crate::models::CartLine;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// The referenced product does not exist.
    #[error("product not found")]
    ProductNotFound,

    /// Repository/database error.
    #[error("database error: {0}")]
    Repository(#[from] RepositoryError),
}

/// Cart ledger service.
pub struct CartService<'a> {
    cart: CartRepository<'a>,
}

impl<'a> CartService<'a> {
    /// Create a new cart service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            cart: CartRepository::new(pool),
        }
    }

    /// Add one unit of a product to the user's cart.
    ///
    /// Repeated calls accumulate quantity on a single row; this is
    /// accumulation, not idempotence.
    ///
    /// # Errors
    ///
    /// Returns `CartError::ProductNotFound` if the product is absent.
    pub async fn add_item(&self, user: UserId, product_id: ProductId) -> Result<(), CartError> {
        self.cart
            .add_one(user, product_id)
            .await
            .map_err(|e| match e {
                RepositoryError::NotFound => CartError::ProductNotFound,
                other => CartError::Repository(other),
            })?;

        tracing::debug!(user_id = %user, product_id = %product_id, "cart add");
        Ok(())
    }

    /// Remove a cart line if it belongs to the user.
    ///
    /// Removing a nonexistent or foreign-owned line is a no-op, never an
    /// error.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` on database failure.
    pub async fn remove_item(&self, user: UserId, item_id: CartItemId) -> Result<(), CartError> {
        let removed = self.cart.remove(user, item_id).await?;
        if !removed {
            tracing::debug!(user_id = %user, item_id = %item_id, "cart remove was a no-op");
        }
        Ok(())
    }

    /// List the user's cart lines with current product names and prices.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` on database failure.
    pub async fn list_items(&self, user: UserId) -> Result<Vec<CartLine>, CartError> {
        Ok(self.cart.list_for_user(user).await?)
    }

    /// Pre-checkout total: Σ quantity × current product price.
    ///
    /// Expected to differ from the locked-in order pricing when the catalog
    /// changes between add and checkout.
    ///
    /// # Errors
    ///
    /// Returns `CartError::Repository` on database failure.
    pub async fn total(&self, user: UserId) -> Result<Price, CartError> {
        let lines = self.cart.list_for_user(user).await?;
        Ok(lines.iter().map(CartLine::line_total).sum())
    }
}
