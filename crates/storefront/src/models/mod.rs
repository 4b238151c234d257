//! Domain models for the storefront.
//!
//! These types represent validated domain objects separate from database row
//! types; repositories in [`crate::db`] map rows into them.

pub mod cart;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use cart::CartLine;
pub use order::{Order, OrderLine, OrderWithLines};
pub use product::Product;
pub use session::CurrentUser;
pub use user::User;
