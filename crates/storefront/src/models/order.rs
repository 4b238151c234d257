//! Order domain types.
//!
//! Orders are immutable snapshots: line items copy the product price at
//! purchase time, so later catalog changes never alter a receipt.

use chrono::{DateTime, Utc};

use juniper_core::{OrderId, OrderItemId, Price, ProductId, UserId};

/// A completed checkout bound to a payment confirmation reference.
#[derive(Debug, Clone)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Purchasing user.
    pub user_id: UserId,
    /// External payment reference (e.g., `2CO:<sale_id>`).
    pub payment_ref: String,
    /// Whether the payment was confirmed.
    pub paid: bool,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
}

/// A single line item under an [`Order`].
#[derive(Debug, Clone)]
pub struct OrderLine {
    /// Unique line item ID.
    pub id: OrderItemId,
    /// Referenced product.
    pub product_id: ProductId,
    /// Product name joined at read time for receipt display.
    pub product_name: String,
    /// Purchased quantity.
    pub quantity: i64,
    /// Unit price frozen at purchase time.
    pub unit_price: Price,
}

impl OrderLine {
    /// Line total at the frozen price.
    #[must_use]
    pub const fn line_total(&self) -> Price {
        self.unit_price.times(self.quantity)
    }
}

/// An order together with its line items, for receipt display.
#[derive(Debug, Clone)]
pub struct OrderWithLines {
    /// The order header.
    pub order: Order,
    /// The frozen line items.
    pub lines: Vec<OrderLine>,
}

impl OrderWithLines {
    /// Order total over the frozen line prices.
    #[must_use]
    pub fn total(&self) -> Price {
        self.lines.iter().map(OrderLine::line_total).sum()
    }
}
