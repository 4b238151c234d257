//! Home page and health check.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use axum::response::IntoResponse;

use crate::db::ProductRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::OptionalAuth;
use crate::routes::products::ProductView;
use crate::state::AppState;

/// Home page template: the product grid.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub products: Vec<ProductView>,
    pub logged_in: bool,
}

/// Display the product grid.
pub async fn index(
    State(state): State<AppState>,
    OptionalAuth(user): OptionalAuth,
) -> Result<impl IntoResponse> {
    let products = ProductRepository::new(state.pool()).list_all().await?;

    Ok(IndexTemplate {
        products: products.iter().map(ProductView::from).collect(),
        logged_in: user.is_some(),
    })
}

/// Health check endpoint.
pub async fn health() -> &'static str {
    "OK"
}
