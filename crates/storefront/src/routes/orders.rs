//! Order route handlers: history and receipts.
//!
//! Orders are read-only after checkout; lookups are scoped to the owning
//! user by the repository query itself.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
};

use crate::db::OrderRepository;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::{Order, OrderLine};
use crate::routes::auth::MessageQuery;
use crate::state::AppState;

/// Order summary display data.
#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: i64,
    pub payment_ref: String,
    pub created_at: String,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id.as_i64(),
            payment_ref: order.payment_ref.clone(),
            created_at: order.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
        }
    }
}

/// Receipt line display data.
#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub name: String,
    pub quantity: i64,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&OrderLine> for OrderLineView {
    fn from(line: &OrderLine) -> Self {
        Self {
            name: line.product_name.clone(),
            quantity: line.quantity,
            unit_price: line.unit_price.to_string(),
            line_total: line.line_total().to_string(),
        }
    }
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "orders.html")]
pub struct OrdersTemplate {
    pub orders: Vec<OrderView>,
    pub error: Option<String>,
}

/// Receipt template.
#[derive(Template, WebTemplate)]
#[template(path = "order.html")]
pub struct OrderTemplate {
    pub order: OrderView,
    pub lines: Vec<OrderLineView>,
    pub total: String,
}

/// Display the current user's order history.
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Query(query): Query<MessageQuery>,
) -> Result<impl IntoResponse> {
    let orders = OrderRepository::new(state.pool())
        .list_for_user(user.id)
        .await?;

    let error = query.error.as_deref().map(|code| {
        match code {
            "duplicate" => "This payment was already recorded.",
            _ => "Something went wrong. Please try again.",
        }
        .to_owned()
    });

    Ok(OrdersTemplate {
        orders: orders.iter().map(OrderView::from).collect(),
        error,
    })
}

/// Display a receipt for one of the current user's orders.
pub async fn show(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse> {
    let order = OrderRepository::new(state.pool())
        .get_for_user(id.into(), user.id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("order {id}")))?;

    Ok(OrderTemplate {
        order: OrderView::from(&order.order),
        total: order.total().to_string(),
        lines: order.lines.iter().map(OrderLineView::from).collect(),
    })
}
