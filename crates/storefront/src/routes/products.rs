//! Product detail route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use orchard_core::{ProductId, pricing};
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;
use crate::views::{NavView, format_price};

/// Product detail display data.
#[derive(Clone)]
pub struct ProductDetailView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: String,
    /// Undiscounted price, present only for sale items.
    pub full_price: Option<String>,
    pub image: String,
    /// Option name to its ordered choices, for the select inputs.
    pub options: Vec<(String, Vec<String>)>,
}

/// Product detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub nav: NavView,
    pub product: ProductDetailView,
}

/// Display the product detail page.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse> {
    let id = ProductId::new(id);
    let product = state
        .catalog()
        .product(&id)
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ProductShowTemplate {
        nav: NavView::build(&state),
        product: ProductDetailView {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: format_price(pricing::unit_price(product)),
            full_price: product.sale.then(|| format_price(product.price)),
            image: product.image.clone(),
            options: product
                .options
                .iter()
                .map(|(name, choices)| (name.clone(), choices.clone()))
                .collect(),
        },
    })
}
