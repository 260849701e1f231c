//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page
//! reloads. Mutations return fragments plus an `HX-Trigger: cart-updated`
//! header so the header badge refreshes itself.
//!
//! Form input is coerced, never rejected: an unparsable quantity falls
//! back to 1 on add, and out-of-range indices are silent no-ops inside
//! the cart store.

use std::collections::BTreeMap;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, IntoResponse, Response},
};
use orchard_core::ProductId;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::views::{CartView, NavView};

/// Option form fields carry this prefix, e.g. `option_colour=charcoal`.
const OPTION_FIELD_PREFIX: &str = "option_";

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub nav: NavView,
    pub cart: CartView,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Update cart form data.
#[derive(Debug, serde::Deserialize)]
pub struct UpdateCartForm {
    pub index: usize,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, serde::Deserialize)]
pub struct RemoveFromCartForm {
    pub index: usize,
}

/// Display the cart page.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    CartShowTemplate {
        nav: NavView::build(&state),
        cart: CartView::build(&state),
    }
}

/// Add an item to the cart (HTMX).
///
/// The add-to-cart form carries a variable set of option selects, so the
/// body is taken as a flat map: `product_id`, `quantity`, and any number
/// of `option_*` fields.
#[instrument(skip(state, form))]
pub async fn add(
    State(state): State<AppState>,
    Form(form): Form<BTreeMap<String, String>>,
) -> Response {
    let Some(product_id) = form.get("product_id") else {
        tracing::warn!("add-to-cart form without a product_id");
        return CartCountTemplate {
            count: state.cart().count(),
        }
        .into_response();
    };

    let quantity = form
        .get("quantity")
        .and_then(|q| q.parse::<u32>().ok())
        .filter(|q| *q > 0)
        .unwrap_or(1);

    let options: BTreeMap<String, String> = form
        .iter()
        .filter_map(|(key, value)| {
            key.strip_prefix(OPTION_FIELD_PREFIX)
                .map(|name| (name.to_owned(), value.clone()))
        })
        .collect();

    state
        .cart()
        .add(ProductId::new(product_id.as_str()), quantity, options);

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartCountTemplate {
            count: state.cart().count(),
        },
    )
        .into_response()
}

/// Update a cart line's quantity (HTMX). Quantity zero removes the line.
#[instrument(skip(state))]
pub async fn update(
    State(state): State<AppState>,
    Form(form): Form<UpdateCartForm>,
) -> impl IntoResponse {
    state.cart().set_quantity(form.index, form.quantity);

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::build(&state),
        },
    )
}

/// Remove a cart line (HTMX).
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    Form(form): Form<RemoveFromCartForm>,
) -> impl IntoResponse {
    state.cart().remove(form.index);

    (
        AppendHeaders([("HX-Trigger", "cart-updated")]),
        CartItemsTemplate {
            cart: CartView::build(&state),
        },
    )
}

/// Get the cart count badge (HTMX).
#[instrument(skip(state))]
pub async fn count(State(state): State<AppState>) -> impl IntoResponse {
    CartCountTemplate {
        count: state.cart().count(),
    }
}
