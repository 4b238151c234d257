//! Hosted-checkout bridge.
//!
//! Converts a cart snapshot into the field set for 2Checkout's hosted
//! purchase page, and on return converts a confirmation token into a
//! persisted order.
//!
//! Beginning a checkout persists nothing: an abandoned payment leaves no
//! trace and the cart untouched, so retrying is harmless. Completion trusts
//! the client-supplied token as proof of payment; there is no server-side
//! verification against the processor. That trust gap is a known limitation
//! of the hosted-checkout flow; replayed tokens are at least rejected via
//! the unique payment reference.

mod error;

pub use error::CheckoutError;

use sqlx::SqlitePool;

use juniper_core::{OrderId, UserId};

use crate::config::PaymentConfig;
use crate::db::RepositoryError;
use crate::db::cart::CartRepository;
use crate::db::orders::OrderRepository;
use crate::models::CartLine;

/// 2Checkout hosted purchase endpoint.
const PURCHASE_URL: &str = "https://www.2checkout.com/checkout/purchase";

/// Prefix distinguishing 2Checkout sale IDs in `payment_ref`.
const PAYMENT_REF_PREFIX: &str = "2CO:";

/// A single hidden form field in the checkout handoff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadField {
    /// Field name (e.g., `li_0_price`).
    pub name: String,
    /// Field value.
    pub value: String,
}

impl PayloadField {
    fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The auto-posting form payload handed to the hosted payment page.
#[derive(Debug, Clone)]
pub struct CheckoutPayload {
    /// Form action URL (the processor's purchase endpoint).
    pub action_url: String,
    /// Ordered hidden fields.
    pub fields: Vec<PayloadField>,
}

/// Checkout bridge service.
pub struct CheckoutService<'a> {
    cart: CartRepository<'a>,
    orders: OrderRepository<'a>,
    payment: &'a PaymentConfig,
}

impl<'a> CheckoutService<'a> {
    /// Create a new checkout service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, payment: &'a PaymentConfig) -> Self {
        Self {
            cart: CartRepository::new(pool),
            orders: OrderRepository::new(pool),
            payment,
        }
    }

    /// Begin a checkout: snapshot the cart into a hosted-payment payload.
    ///
    /// Nothing is persisted; the user either comes back through
    /// [`complete_checkout`](Self::complete_checkout) or abandons the
    /// payment with the cart intact.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if the cart has no lines.
    pub async fn begin_checkout(&self, user: UserId) -> Result<CheckoutPayload, CheckoutError> {
        let lines = self.cart.list_for_user(user).await?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        tracing::info!(user_id = %user, lines = lines.len(), "checkout started");
        Ok(build_payload(&lines, self.payment))
    }

    /// Complete a checkout from the processor's return callback.
    ///
    /// The token is accepted as proof of payment without verification (see
    /// module docs). In one transaction the cart becomes an order with
    /// frozen unit prices and is cleared; a replayed token or an empty cart
    /// creates nothing.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::PaymentNotConfirmed` if `token` is absent or
    /// empty.
    /// Returns `CheckoutError::DuplicateConfirmation` if an order already
    /// holds this payment reference.
    /// Returns `CheckoutError::EmptyCart` if there is nothing to migrate.
    pub async fn complete_checkout(
        &self,
        user: UserId,
        token: Option<&str>,
    ) -> Result<OrderId, CheckoutError> {
        let token = match token {
            Some(t) if !t.trim().is_empty() => t.trim(),
            _ => return Err(CheckoutError::PaymentNotConfirmed),
        };

        let payment_ref = format!("{PAYMENT_REF_PREFIX}{token}");
        let order = self
            .orders
            .create_from_cart(user, &payment_ref)
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => CheckoutError::DuplicateConfirmation,
                RepositoryError::NotFound => CheckoutError::EmptyCart,
                other => CheckoutError::Repository(other),
            })?;

        tracing::info!(user_id = %user, order_id = %order.id, "checkout completed");
        Ok(order.id)
    }
}

/// Build the hosted-payment form payload from a cart snapshot.
///
/// Pure function with deterministic field order: seller and mode fields
/// first, then `li_{i}_name` / `li_{i}_price` / `li_{i}_quantity` per line.
/// Prices are rendered as decimal dollars from integer cents.
#[must_use]
pub fn build_payload(lines: &[CartLine], payment: &PaymentConfig) -> CheckoutPayload {
    let mut fields = vec![
        PayloadField::new("sid", payment.seller_id.clone()),
        PayloadField::new("mode", "2CO"),
    ];

    if payment.demo_mode {
        fields.push(PayloadField::new("demo", "Y"));
    }

    fields.push(PayloadField::new(
        "x_receipt_link_url",
        payment.return_url.clone(),
    ));

    for (i, line) in lines.iter().enumerate() {
        fields.push(PayloadField::new(
            format!("li_{i}_name"),
            line.product_name.clone(),
        ));
        fields.push(PayloadField::new(
            format!("li_{i}_price"),
            line.unit_price.to_decimal_string(),
        ));
        fields.push(PayloadField::new(
            format!("li_{i}_quantity"),
            line.quantity.to_string(),
        ));
    }

    CheckoutPayload {
        action_url: PURCHASE_URL.to_owned(),
        fields,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use juniper_core::{CartItemId, Price, ProductId};

    use super::*;

    fn line(name: &str, cents: i64, quantity: i64) -> CartLine {
        CartLine {
            id: CartItemId::new(1),
            user_id: UserId::new(1),
            product_id: ProductId::new(1),
            quantity,
            product_name: name.to_owned(),
            unit_price: Price::from_cents(cents),
        }
    }

    fn payment() -> PaymentConfig {
        PaymentConfig {
            seller_id: "901234567".to_owned(),
            demo_mode: true,
            return_url: "https://shop.example/checkout/success".to_owned(),
        }
    }

    fn get<'a>(payload: &'a CheckoutPayload, name: &str) -> &'a str {
        payload
            .fields
            .iter()
            .find(|f| f.name == name)
            .map(|f| f.value.as_str())
            .unwrap()
    }

    #[test]
    fn test_payload_header_fields() {
        let payload = build_payload(&[line("Tea", 500, 1)], &payment());

        assert_eq!(payload.action_url, PURCHASE_URL);
        assert_eq!(get(&payload, "sid"), "901234567");
        assert_eq!(get(&payload, "mode"), "2CO");
        assert_eq!(get(&payload, "demo"), "Y");
        assert_eq!(
            get(&payload, "x_receipt_link_url"),
            "https://shop.example/checkout/success"
        );
    }

    #[test]
    fn test_payload_line_items() {
        let lines = vec![line("Juniper Candle", 2499, 2), line("Tea Towel", 999, 1)];
        let payload = build_payload(&lines, &payment());

        assert_eq!(get(&payload, "li_0_name"), "Juniper Candle");
        assert_eq!(get(&payload, "li_0_price"), "24.99");
        assert_eq!(get(&payload, "li_0_quantity"), "2");
        assert_eq!(get(&payload, "li_1_name"), "Tea Towel");
        assert_eq!(get(&payload, "li_1_price"), "9.99");
        assert_eq!(get(&payload, "li_1_quantity"), "1");
    }

    #[test]
    fn test_demo_flag_omitted_in_live_mode() {
        let mut config = payment();
        config.demo_mode = false;
        let payload = build_payload(&[line("Tea", 500, 1)], &config);

        assert!(!payload.fields.iter().any(|f| f.name == "demo"));
    }

    #[test]
    fn test_field_order_is_deterministic() {
        let payload = build_payload(&[line("Tea", 500, 1)], &payment());
        let names: Vec<&str> = payload.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "sid",
                "mode",
                "demo",
                "x_receipt_link_url",
                "li_0_name",
                "li_0_price",
                "li_0_quantity"
            ]
        );
    }
}
