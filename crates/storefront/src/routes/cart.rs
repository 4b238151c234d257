//! Cart route handlers.
//!
//! All cart operations require a logged-in user; the identity comes from the
//! `RequireAuth` extractor and is passed explicitly to the cart service.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;

use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::CartLine;
use crate::routes::auth::MessageQuery;
use crate::services::{CartError, CartService};
use crate::state::AppState;

/// Cart line display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: i64,
    pub product_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id.as_i64(),
            product_id: line.product_id.as_i64(),
            name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.to_string(),
            line_total: line.line_total().to_string(),
        }
    }
}

/// Add-to-cart form data.
#[derive(Debug, Deserialize)]
pub struct AddForm {
    pub product_id: i64,
}

/// Remove-from-cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveForm {
    pub item_id: i64,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartTemplate {
    pub items: Vec<CartLineView>,
    pub total: String,
    pub error: Option<String>,
    pub success: Option<String>,
}

/// Translate a cart feedback code into display text.
fn cart_message(code: &str) -> &'static str {
    match code {
        "added" => "Added to cart.",
        "removed" => "Removed from cart.",
        "missing" => "Product not found.",
        "empty" => "Your cart is empty.",
        "payment" => "Payment not completed.",
        _ => "Something went wrong. Please try again.",
    }
}

/// Display the current user's cart and total.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let cart = CartService::new(state.pool());
    let lines = cart.list_items(user.id).await?;
    let total = cart.total(user.id).await?;

    Ok(CartTemplate {
        items: lines.iter().map(CartLineView::from).collect(),
        total: total.to_string(),
        error: query.error.as_deref().map(cart_message).map(String::from),
        success: query.success.as_deref().map(cart_message).map(String::from),
    })
}

/// Add one unit of a product to the cart.
pub async fn add(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<AddForm>,
) -> Response {
    match CartService::new(state.pool())
        .add_item(user.id, form.product_id.into())
        .await
    {
        Ok(()) => Redirect::to("/cart?success=added").into_response(),
        Err(CartError::ProductNotFound) => Redirect::to("/cart?error=missing").into_response(),
        Err(e) => {
            tracing::error!("Cart add failed: {e}");
            Redirect::to("/cart?error=internal").into_response()
        }
    }
}

/// Remove a cart line; unknown or foreign lines are silently ignored.
pub async fn remove(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Form(form): Form<RemoveForm>,
) -> Result<Response> {
    CartService::new(state.pool())
        .remove_item(user.id, form.item_id.into())
        .await?;

    Ok(Redirect::to("/cart?success=removed").into_response())
}
