//! Integration tests for registration and login.
//!
//! Each test runs against a fresh in-memory database with the full schema
//! applied, exercising the real service and repository code paths.

#![allow(clippy::unwrap_used)]

mod common;

use juniper_core::Email;
use juniper_storefront::db::UserRepository;
use juniper_storefront::services::{AuthError, AuthService};

use common::{register_user, setup_db};

// ============================================================================
// Registration
// ============================================================================

#[tokio::test]
async fn register_creates_retrievable_user() {
    let pool = setup_db().await;

    let user = register_user(&pool, "shopper@example.com").await;

    let fetched = UserRepository::new(&pool)
        .get_by_id(user.id)
        .await
        .unwrap()
        .expect("user should exist after registration");
    assert_eq!(fetched.email.as_str(), "shopper@example.com");
}

#[tokio::test]
async fn register_rejects_password_mismatch_without_side_effects() {
    let pool = setup_db().await;
    let auth = AuthService::new(&pool);

    let result = auth
        .register("shopper@example.com", "password one", "password two")
        .await;
    assert!(matches!(result, Err(AuthError::PasswordMismatch)));

    // No user row was created.
    let email = Email::parse("shopper@example.com").unwrap();
    let lookup = UserRepository::new(&pool).get_by_email(&email).await.unwrap();
    assert!(lookup.is_none());
}

#[tokio::test]
async fn register_rejects_duplicate_email() {
    let pool = setup_db().await;
    let auth = AuthService::new(&pool);

    register_user(&pool, "shopper@example.com").await;

    let result = auth
        .register("shopper@example.com", "another password", "another password")
        .await;
    assert!(matches!(result, Err(AuthError::UserAlreadyExists)));
}

#[tokio::test]
async fn register_rejects_invalid_email_and_weak_password() {
    let pool = setup_db().await;
    let auth = AuthService::new(&pool);

    let bad_email = auth.register("not-an-email", "long enough", "long enough").await;
    assert!(matches!(bad_email, Err(AuthError::InvalidEmail(_))));

    let weak = auth.register("shopper@example.com", "short", "short").await;
    assert!(matches!(weak, Err(AuthError::WeakPassword(_))));
}

// ============================================================================
// Login
// ============================================================================

#[tokio::test]
async fn authenticate_succeeds_with_correct_password() {
    let pool = setup_db().await;
    let auth = AuthService::new(&pool);

    let registered = register_user(&pool, "shopper@example.com").await;

    let user = auth
        .authenticate("shopper@example.com", "a sturdy password")
        .await
        .unwrap();
    assert_eq!(user.id, registered.id);
}

#[tokio::test]
async fn authenticate_rejects_wrong_password_and_unknown_email_alike() {
    let pool = setup_db().await;
    let auth = AuthService::new(&pool);

    register_user(&pool, "shopper@example.com").await;

    let wrong_password = auth
        .authenticate("shopper@example.com", "not the password")
        .await;
    assert!(matches!(wrong_password, Err(AuthError::InvalidCredentials)));

    let unknown_email = auth
        .authenticate("nobody@example.com", "a sturdy password")
        .await;
    assert!(matches!(unknown_email, Err(AuthError::InvalidCredentials)));
}
