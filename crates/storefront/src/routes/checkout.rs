//! Checkout route handlers.
//!
//! `POST /checkout` renders a page whose form auto-posts the cart snapshot
//! to the hosted payment page. The processor sends the user back to
//! `GET /checkout/success` with a `sale_id` query parameter; its presence is
//! taken as proof of payment (see [`crate::services::checkout`]).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::Result;
use crate::middleware::RequireAuth;
use crate::services::{CheckoutError, CheckoutService};
use crate::state::AppState;

/// Query parameters on the payment return callback.
#[derive(Debug, Deserialize)]
pub struct ReturnQuery {
    /// Confirmation token from the payment processor; absence means
    /// "not paid".
    pub sale_id: Option<String>,
}

/// Auto-posting handoff form template.
///
/// Standalone page (no site chrome): it submits itself to the payment page
/// as soon as it loads.
#[derive(Template, WebTemplate)]
#[template(path = "checkout_redirect.html")]
pub struct CheckoutRedirectTemplate {
    pub action_url: String,
    pub fields: Vec<(String, String)>,
}

/// Begin a checkout: hand the cart snapshot to the payment page.
pub async fn begin(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Response> {
    match CheckoutService::new(state.pool(), state.payment())
        .begin_checkout(user.id)
        .await
    {
        Ok(payload) => Ok(CheckoutRedirectTemplate {
            action_url: payload.action_url,
            fields: payload
                .fields
                .into_iter()
                .map(|f| (f.name, f.value))
                .collect(),
        }
        .into_response()),
        Err(CheckoutError::EmptyCart) => Ok(Redirect::to("/cart?error=empty").into_response()),
        Err(e) => Err(e.into()),
    }
}

/// Handle the return from the payment page.
pub async fn success(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<ReturnQuery>,
) -> Result<Response> {
    match CheckoutService::new(state.pool(), state.payment())
        .complete_checkout(user.id, query.sale_id.as_deref())
        .await
    {
        Ok(order_id) => Ok(Redirect::to(&format!("/orders/{order_id}")).into_response()),
        Err(CheckoutError::PaymentNotConfirmed) => {
            Ok(Redirect::to("/cart?error=payment").into_response())
        }
        Err(CheckoutError::DuplicateConfirmation) => {
            Ok(Redirect::to("/orders?error=duplicate").into_response())
        }
        Err(CheckoutError::EmptyCart) => Ok(Redirect::to("/cart?error=empty").into_response()),
        Err(e) => Err(e.into()),
    }
}
