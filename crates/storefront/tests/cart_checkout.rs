//! Integration tests for the cart ledger and the hosted-checkout flow.
//!
//! Each test runs against a fresh in-memory database with the full schema
//! applied. Checkout tests drive the real cart-to-order migration, including
//! price freezing, cart clearing, and replayed-confirmation rejection.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

mod common;

use juniper_core::{CartItemId, Price, ProductId};
use juniper_storefront::db::OrderRepository;
use juniper_storefront::db::ProductRepository;
use juniper_storefront::services::{CartError, CartService, CheckoutError, CheckoutService};

use common::{register_user, seed_product, setup_db, test_payment_config};

// ============================================================================
// Cart ledger
// ============================================================================

#[tokio::test]
async fn repeated_adds_accumulate_on_one_row() {
    let pool = setup_db().await;
    let user = register_user(&pool, "shopper@example.com").await;
    let board = seed_product(&pool, "Walnut Serving Board", 2499).await;
    let cart = CartService::new(&pool);

    cart.add_item(user.id, board.id).await.unwrap();
    cart.add_item(user.id, board.id).await.unwrap();

    let lines = cart.list_items(user.id).await.unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].quantity, 2);
    assert_eq!(lines[0].product_id, board.id);
}

#[tokio::test]
async fn adding_unknown_product_is_rejected() {
    let pool = setup_db().await;
    let user = register_user(&pool, "shopper@example.com").await;
    let cart = CartService::new(&pool);

    let result = cart.add_item(user.id, ProductId::new(9999)).await;
    assert!(matches!(result, Err(CartError::ProductNotFound)));
    assert!(cart.list_items(user.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_is_owner_scoped_and_idempotent() {
    let pool = setup_db().await;
    let alice = register_user(&pool, "alice@example.com").await;
    let bob = register_user(&pool, "bob@example.com").await;
    let board = seed_product(&pool, "Walnut Serving Board", 2499).await;
    let cart = CartService::new(&pool);

    cart.add_item(alice.id, board.id).await.unwrap();
    let line_id = cart.list_items(alice.id).await.unwrap()[0].id;

    // Another user cannot remove the line; the owner's cart is unchanged.
    cart.remove_item(bob.id, line_id).await.unwrap();
    assert_eq!(cart.list_items(alice.id).await.unwrap().len(), 1);

    // A nonexistent line is a silent no-op.
    cart.remove_item(alice.id, CartItemId::new(9999)).await.unwrap();
    assert_eq!(cart.list_items(alice.id).await.unwrap().len(), 1);

    // The owner's remove works.
    cart.remove_item(alice.id, line_id).await.unwrap();
    assert!(cart.list_items(alice.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn cart_total_follows_current_catalog_price() {
    let pool = setup_db().await;
    let user = register_user(&pool, "shopper@example.com").await;
    let board = seed_product(&pool, "Walnut Serving Board", 2499).await;
    let towel = seed_product(&pool, "Tea Towel", 999).await;
    let cart = CartService::new(&pool);

    cart.add_item(user.id, board.id).await.unwrap();
    cart.add_item(user.id, board.id).await.unwrap();
    cart.add_item(user.id, towel.id).await.unwrap();

    assert_eq!(cart.total(user.id).await.unwrap(), Price::from_cents(5997));

    // A catalog price change is reflected immediately in the pending cart.
    ProductRepository::new(&pool)
        .set_price(board.id, Price::from_cents(2999))
        .await
        .unwrap();
    assert_eq!(cart.total(user.id).await.unwrap(), Price::from_cents(6997));
}

// ============================================================================
// Checkout handoff
// ============================================================================

#[tokio::test]
async fn begin_checkout_rejects_empty_cart() {
    let pool = setup_db().await;
    let user = register_user(&pool, "shopper@example.com").await;
    let payment = test_payment_config();
    let checkout = CheckoutService::new(&pool, &payment);

    let result = checkout.begin_checkout(user.id).await;
    assert!(matches!(result, Err(CheckoutError::EmptyCart)));
}

#[tokio::test]
async fn begin_checkout_snapshots_cart_without_persisting() {
    let pool = setup_db().await;
    let user = register_user(&pool, "shopper@example.com").await;
    let board = seed_product(&pool, "Walnut Serving Board", 2499).await;
    let payment = test_payment_config();
    let cart = CartService::new(&pool);
    let checkout = CheckoutService::new(&pool, &payment);

    cart.add_item(user.id, board.id).await.unwrap();

    let payload = checkout.begin_checkout(user.id).await.unwrap();
    let price = payload
        .fields
        .iter()
        .find(|f| f.name == "li_0_price")
        .map(|f| f.value.as_str());
    assert_eq!(price, Some("24.99"));

    // Abandoning at this point leaves the cart intact and no orders exist.
    assert_eq!(cart.list_items(user.id).await.unwrap().len(), 1);
    let orders = OrderRepository::new(&pool).list_for_user(user.id).await.unwrap();
    assert!(orders.is_empty());
}

// ============================================================================
// Checkout completion
// ============================================================================

#[tokio::test]
async fn completion_without_token_creates_nothing() {
    let pool = setup_db().await;
    let user = register_user(&pool, "shopper@example.com").await;
    let board = seed_product(&pool, "Walnut Serving Board", 2499).await;
    let payment = test_payment_config();
    let cart = CartService::new(&pool);
    let checkout = CheckoutService::new(&pool, &payment);

    cart.add_item(user.id, board.id).await.unwrap();

    let missing = checkout.complete_checkout(user.id, None).await;
    assert!(matches!(missing, Err(CheckoutError::PaymentNotConfirmed)));

    let blank = checkout.complete_checkout(user.id, Some("   ")).await;
    assert!(matches!(blank, Err(CheckoutError::PaymentNotConfirmed)));

    assert_eq!(cart.list_items(user.id).await.unwrap().len(), 1);
    let orders = OrderRepository::new(&pool).list_for_user(user.id).await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn completion_with_empty_cart_creates_no_order() {
    let pool = setup_db().await;
    let user = register_user(&pool, "shopper@example.com").await;
    let payment = test_payment_config();
    let checkout = CheckoutService::new(&pool, &payment);

    let result = checkout.complete_checkout(user.id, Some("SALE-1")).await;
    assert!(matches!(result, Err(CheckoutError::EmptyCart)));

    // The rolled-back order left no trace.
    let orders = OrderRepository::new(&pool).list_for_user(user.id).await.unwrap();
    assert!(orders.is_empty());
}

#[tokio::test]
async fn completion_freezes_prices_and_empties_cart() {
    let pool = setup_db().await;
    let user = register_user(&pool, "shopper@example.com").await;
    let board = seed_product(&pool, "Walnut Serving Board", 2499).await;
    let towel = seed_product(&pool, "Tea Towel", 999).await;
    let payment = test_payment_config();
    let cart = CartService::new(&pool);
    let checkout = CheckoutService::new(&pool, &payment);

    cart.add_item(user.id, board.id).await.unwrap();
    cart.add_item(user.id, board.id).await.unwrap();
    cart.add_item(user.id, towel.id).await.unwrap();

    let order_id = checkout
        .complete_checkout(user.id, Some("SALE-42"))
        .await
        .unwrap();

    // The cart is fully migrated.
    assert!(cart.list_items(user.id).await.unwrap().is_empty());

    let receipt = OrderRepository::new(&pool)
        .get_for_user(order_id, user.id)
        .await
        .unwrap()
        .expect("order should exist for its owner");

    assert!(receipt.order.paid);
    assert_eq!(receipt.order.payment_ref, "2CO:SALE-42");
    assert_eq!(receipt.lines.len(), 2);
    assert_eq!(receipt.lines[0].product_id, board.id);
    assert_eq!(receipt.lines[0].quantity, 2);
    assert_eq!(receipt.lines[0].unit_price, Price::from_cents(2499));
    assert_eq!(receipt.lines[1].product_id, towel.id);
    assert_eq!(receipt.lines[1].quantity, 1);
    assert_eq!(receipt.lines[1].unit_price, Price::from_cents(999));
    assert_eq!(receipt.total(), Price::from_cents(5997));

    // A later catalog change never alters the receipt.
    ProductRepository::new(&pool)
        .set_price(board.id, Price::from_cents(9999))
        .await
        .unwrap();
    let after = OrderRepository::new(&pool)
        .get_for_user(order_id, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(after.lines[0].unit_price, Price::from_cents(2499));
    assert_eq!(after.total(), Price::from_cents(5997));
}

#[tokio::test]
async fn replayed_confirmation_token_is_rejected() {
    let pool = setup_db().await;
    let user = register_user(&pool, "shopper@example.com").await;
    let board = seed_product(&pool, "Walnut Serving Board", 2499).await;
    let payment = test_payment_config();
    let cart = CartService::new(&pool);
    let checkout = CheckoutService::new(&pool, &payment);

    cart.add_item(user.id, board.id).await.unwrap();
    checkout
        .complete_checkout(user.id, Some("SALE-7"))
        .await
        .unwrap();

    // Refill the cart, then replay the same confirmation.
    cart.add_item(user.id, board.id).await.unwrap();
    let replay = checkout.complete_checkout(user.id, Some("SALE-7")).await;
    assert!(matches!(replay, Err(CheckoutError::DuplicateConfirmation)));

    // Exactly one order exists and the refilled cart is untouched.
    let orders = OrderRepository::new(&pool).list_for_user(user.id).await.unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(cart.list_items(user.id).await.unwrap().len(), 1);
}

// ============================================================================
// Order visibility
// ============================================================================

#[tokio::test]
async fn orders_are_owner_scoped_and_listed_newest_first() {
    let pool = setup_db().await;
    let alice = register_user(&pool, "alice@example.com").await;
    let bob = register_user(&pool, "bob@example.com").await;
    let board = seed_product(&pool, "Walnut Serving Board", 2499).await;
    let payment = test_payment_config();
    let cart = CartService::new(&pool);
    let checkout = CheckoutService::new(&pool, &payment);

    cart.add_item(alice.id, board.id).await.unwrap();
    let first = checkout
        .complete_checkout(alice.id, Some("SALE-A"))
        .await
        .unwrap();
    cart.add_item(alice.id, board.id).await.unwrap();
    let second = checkout
        .complete_checkout(alice.id, Some("SALE-B"))
        .await
        .unwrap();

    let orders = OrderRepository::new(&pool).list_for_user(alice.id).await.unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].id, second);
    assert_eq!(orders[1].id, first);

    // Another user sees neither the list entries nor the receipt.
    let repo = OrderRepository::new(&pool);
    assert!(repo.list_for_user(bob.id).await.unwrap().is_empty());
    assert!(repo.get_for_user(first, bob.id).await.unwrap().is_none());
}
