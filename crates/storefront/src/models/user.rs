//! User domain types.

use chrono::{DateTime, Utc};

use juniper_core::{Email, UserId};

/// A registered storefront user (domain type).
///
/// The password hash never leaves the repository layer; this type carries
/// only the identity.
#[derive(Debug, Clone)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// User's email address.
    pub email: Email,
    /// When the user registered.
    pub created_at: DateTime<Utc>,
}
