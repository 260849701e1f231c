//! Catalog listing route handlers.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use orchard_core::CategoryId;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;
use crate::views::{CategoryLink, NavView, ProductCardView};

/// Full catalog listing template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/index.html")]
pub struct CatalogIndexTemplate {
    pub nav: NavView,
    pub products: Vec<ProductCardView>,
}

/// Category section template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog/section.html")]
pub struct CatalogSectionTemplate {
    pub nav: NavView,
    pub category_name: String,
    pub subcategories: Vec<CategoryLink>,
    pub products: Vec<ProductCardView>,
}

/// Display all products.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    CatalogIndexTemplate {
        nav: NavView::build(&state),
        products: state.catalog().products().iter().map(Into::into).collect(),
    }
}

/// Display one category: its own products followed by the products of
/// its direct subcategories.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Result<impl IntoResponse> {
    let catalog = state.catalog();
    let id = CategoryId::new(category);
    let category = catalog
        .category(&id)
        .ok_or_else(|| AppError::NotFound(format!("category {id}")))?;

    let subcategories = catalog.subcategories(&id);
    let mut products: Vec<ProductCardView> =
        catalog.products_in(&id).into_iter().map(Into::into).collect();
    for sub in &subcategories {
        products.extend(catalog.products_in(&sub.id).into_iter().map(Into::into));
    }

    Ok(CatalogSectionTemplate {
        nav: NavView::build(&state),
        category_name: category.name.clone(),
        subcategories: subcategories
            .into_iter()
            .map(|c| CategoryLink {
                id: c.id.to_string(),
                name: c.name.clone(),
            })
            .collect(),
        products,
    })
}
