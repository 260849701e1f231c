//! Search route handlers.
//!
//! The header search form posts the term, which is stashed as an
//! ephemeral storage record before redirecting to the results view. The
//! results view consumes (and deletes) the stashed term; a `q` query
//! parameter takes precedence so results pages stay linkable.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::views::{NavView, ProductCardView};

/// Search form data (header form).
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    pub term: String,
}

/// Search query parameters.
#[derive(Debug, Deserialize, Default)]
pub struct SearchQuery {
    pub q: Option<String>,
}

/// Search results page template.
#[derive(Template, WebTemplate)]
#[template(path = "search/results.html")]
pub struct SearchResultsTemplate {
    pub nav: NavView,
    pub term: String,
    pub products: Vec<ProductCardView>,
}

/// Stash the search term and redirect to the results view.
#[instrument(skip(state))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> impl IntoResponse {
    state.session().stash_search_term(form.term.trim());
    Redirect::to("/search")
}

/// Display search results for the query parameter or the stashed term.
#[instrument(skip(state))]
pub async fn results(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    let term = query
        .q
        .or_else(|| state.session().take_search_term())
        .unwrap_or_default();

    SearchResultsTemplate {
        nav: NavView::build(&state),
        products: state.catalog().search(&term).into_iter().map(Into::into).collect(),
        term,
    }
}
