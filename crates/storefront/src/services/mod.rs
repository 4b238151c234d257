//! Business services for the storefront.
//!
//! Services wrap the repositories in [`crate::db`] and hold the component
//! logic: credential handling, the cart ledger, and the hosted-checkout
//! bridge. Route handlers stay thin and call into these.

pub mod auth;
pub mod cart;
pub mod checkout;

pub use auth::{AuthError, AuthService};
pub use cart::{CartError, CartService};
pub use checkout::{CheckoutError, CheckoutService};
