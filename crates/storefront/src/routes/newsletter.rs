//! Newsletter subscription route handlers.
//!
//! Subscriptions go into the append-only persisted subscriber set.
//! Membership is exact-string: the set keeps whatever casing the shopper
//! typed, and a repeat subscription of the same string reads as already
//! subscribed.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, extract::State, response::IntoResponse};
use orchard_core::Email;
use serde::Deserialize;
use tracing::instrument;

use crate::state::AppState;

/// Newsletter subscription form data.
#[derive(Debug, Deserialize)]
pub struct SubscribeForm {
    pub email: String,
}

/// Success fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_success.html")]
pub struct SubscribeSuccessTemplate {
    pub email: String,
}

/// Error fragment template (replaces the form via HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "newsletter/subscribe_error.html")]
pub struct SubscribeErrorTemplate {
    pub message: String,
    pub email: String,
}

/// Subscribe to the newsletter (HTMX).
///
/// A duplicate subscription shows the success message: the address is in
/// the set either way.
#[instrument(skip(state), fields(email = %form.email))]
pub async fn subscribe(
    State(state): State<AppState>,
    Form(form): Form<SubscribeForm>,
) -> impl IntoResponse {
    let email = form.email.trim().to_owned();

    if let Err(err) = Email::parse(&email) {
        tracing::debug!(error = %err, "rejected newsletter email");
        return SubscribeErrorTemplate {
            message: "Please enter a valid email address.".to_owned(),
            email,
        }
        .into_response();
    }

    let newly_added = state.session().subscribe(&email);
    if newly_added {
        tracing::info!("newsletter subscription added");
    } else {
        tracing::info!("email already subscribed");
    }

    SubscribeSuccessTemplate { email }.into_response()
}
