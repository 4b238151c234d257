//! Order repository.
//!
//! Holds the cart-to-order migration: one transaction creates the order,
//! freezes every cart line into an order item, and clears the cart. Partial
//! migration is never observable.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use juniper_core::{OrderId, OrderItemId, Price, ProductId, UserId};

use super::RepositoryError;
use crate::models::{Order, OrderLine, OrderWithLines};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    user_id: i64,
    payment_ref: String,
    paid: bool,
    created_at: DateTime<Utc>,
}

impl From<OrderRow> for Order {
    fn from(row: OrderRow) -> Self {
        Self {
            id: OrderId::new(row.id),
            user_id: UserId::new(row.user_id),
            payment_ref: row.payment_ref,
            paid: row.paid,
            created_at: row.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OrderLineRow {
    id: i64,
    product_id: i64,
    product_name: String,
    quantity: i64,
    unit_price_cents: i64,
}

impl From<OrderLineRow> for OrderLine {
    fn from(row: OrderLineRow) -> Self {
        Self {
            id: OrderItemId::new(row.id),
            product_id: ProductId::new(row.product_id),
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: Price::from_cents(row.unit_price_cents),
        }
    }
}

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Atomically convert a user's cart into a paid order.
    ///
    /// Within one transaction:
    /// 1. Insert the order bound to `payment_ref`.
    /// 2. Copy every cart line into an order item, freezing the product's
    ///    current price as the unit price.
    /// 3. Delete the user's cart lines.
    ///
    /// The cart is re-read inside the transaction, so a concurrent
    /// completion cannot interleave with the migration.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if an order with the same
    /// `payment_ref` already exists (replayed confirmation).
    /// Returns `RepositoryError::NotFound` if the cart has no lines; the
    /// transaction rolls back and no order is created.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn create_from_cart(
        &self,
        user_id: UserId,
        payment_ref: &str,
    ) -> Result<Order, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let order_row = sqlx::query_as::<_, OrderRow>(
            r"
            INSERT INTO orders (user_id, payment_ref, paid)
            VALUES (?1, ?2, 1)
            RETURNING id, user_id, payment_ref, paid, created_at
            ",
        )
        .bind(user_id)
        .bind(payment_ref)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("payment reference already recorded".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        // Freeze the cart into order items at the product's current price.
        let migrated = sqlx::query(
            r"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
            SELECT ?1, ci.product_id, ci.quantity, p.price_cents
            FROM cart_items ci
            JOIN products p ON p.id = ci.product_id
            WHERE ci.user_id = ?2
            ",
        )
        .bind(order_row.id)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;

        if migrated.rows_affected() == 0 {
            // Empty cart: roll back rather than record a zero-line order.
            tx.rollback().await?;
            return Err(RepositoryError::NotFound);
        }

        sqlx::query("DELETE FROM cart_items WHERE user_id = ?1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(Order::from(order_row))
    }

    /// Get an order with its line items, scoped to the owning user.
    ///
    /// Returns `None` for a missing order and for an order owned by someone
    /// else; the caller cannot distinguish the two.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    pub async fn get_for_user(
        &self,
        order_id: OrderId,
        user_id: UserId,
    ) -> Result<Option<OrderWithLines>, RepositoryError> {
        let order_row = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, payment_ref, paid, created_at
            FROM orders
            WHERE id = ?1 AND user_id = ?2
            ",
        )
        .bind(order_id)
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        let Some(order_row) = order_row else {
            return Ok(None);
        };

        let lines = sqlx::query_as::<_, OrderLineRow>(
            r"
            SELECT oi.id, oi.product_id, p.name AS product_name,
                   oi.quantity, oi.unit_price_cents
            FROM order_items oi
            JOIN products p ON p.id = oi.product_id
            WHERE oi.order_id = ?1
            ORDER BY oi.id
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        Ok(Some(OrderWithLines {
            order: Order::from(order_row),
            lines: lines.into_iter().map(OrderLine::from).collect(),
        }))
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(
            r"
            SELECT id, user_id, payment_ref, paid, created_at
            FROM orders
            WHERE user_id = ?1
            ORDER BY id DESC
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Order::from).collect())
    }
}
