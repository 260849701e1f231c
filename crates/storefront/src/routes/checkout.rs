//! Checkout route handlers.
//!
//! The totals preview re-quotes as the shopper changes shipping or
//! payment method (HTMX fragment). Submission's only observable effect is
//! clearing the persisted cart record: no order is stored or transmitted
//! anywhere, a documented limitation of the demo.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use orchard_core::pricing::{PaymentMethod, ShippingMethod};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::views::{CartView, NavView, TotalsView};

/// Shipping/payment selection form data. Unknown or missing values mean
/// "no method selected yet".
#[derive(Debug, Deserialize, Default)]
pub struct MethodsForm {
    pub shipping: Option<String>,
    pub payment: Option<String>,
}

impl MethodsForm {
    fn shipping_method(&self) -> Option<ShippingMethod> {
        self.shipping.as_deref().and_then(ShippingMethod::parse)
    }

    fn payment_method(&self) -> Option<PaymentMethod> {
        self.payment.as_deref().and_then(PaymentMethod::parse)
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutShowTemplate {
    pub nav: NavView,
    pub cart: CartView,
    pub totals: TotalsView,
}

/// Totals breakdown fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/totals.html")]
pub struct TotalsTemplate {
    pub totals: TotalsView,
}

/// Order confirmation page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/confirm.html")]
pub struct CheckoutConfirmTemplate {
    pub nav: NavView,
    pub totals: TotalsView,
}

/// Display the checkout page with no method selected yet.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> impl IntoResponse {
    CheckoutShowTemplate {
        nav: NavView::build(&state),
        cart: CartView::build(&state),
        totals: TotalsView::build(&state, None, None),
    }
}

/// Re-quote the totals for the selected methods (HTMX).
#[instrument(skip(state))]
pub async fn quote(
    State(state): State<AppState>,
    Form(form): Form<MethodsForm>,
) -> impl IntoResponse {
    TotalsTemplate {
        totals: TotalsView::build(&state, form.shipping_method(), form.payment_method()),
    }
}

/// Confirm the order: quote one last time, then clear the cart.
#[instrument(skip(state))]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<MethodsForm>,
) -> impl IntoResponse {
    let totals = TotalsView::build(&state, form.shipping_method(), form.payment_method());
    state.cart().clear();
    tracing::info!("checkout confirmed, cart cleared");

    CheckoutConfirmTemplate {
        nav: NavView::build(&state),
        totals,
    }
}
