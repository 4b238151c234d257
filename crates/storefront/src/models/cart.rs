//! Cart domain types.

use juniper_core::{CartItemId, Price, ProductId, UserId};

/// A cart entry resolved against the catalog.
///
/// Carries the product's *current* name and price; pre-checkout totals follow
/// catalog price changes, unlike the frozen prices on order lines.
#[derive(Debug, Clone)]
pub struct CartLine {
    /// Cart row ID (the handle used for removal).
    pub id: CartItemId,
    /// Owning user.
    pub user_id: UserId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Quantity, always >= 1.
    pub quantity: i64,
    /// Product name at read time.
    pub product_name: String,
    /// Product price at read time.
    pub unit_price: Price,
}

impl CartLine {
    /// Line total at current pricing.
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}
