//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::views::{NavView, ProductCardView};

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub nav: NavView,
    pub popular: Vec<ProductCardView>,
    pub on_sale: Vec<ProductCardView>,
}

/// Display the home page.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    let catalog = state.catalog();

    HomeTemplate {
        nav: NavView::build(&state),
        popular: catalog.popular().into_iter().map(Into::into).collect(),
        on_sale: catalog.on_sale().into_iter().map(Into::into).collect(),
    }
}
