//! Authentication route handlers.
//!
//! The demo has no credentials: "logging in" persists a name and email as
//! the single current-user record. Login always overwrites, logout always
//! clears. The only gate is email validation at the form boundary.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use orchard_core::{Email, User};
use serde::Deserialize;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::views::NavView;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub name: String,
    pub email: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub nav: NavView,
    pub error: Option<String>,
}

/// Display the login page.
#[instrument(skip(state))]
pub async fn login_page(State(state): State<AppState>) -> impl IntoResponse {
    LoginTemplate {
        nav: NavView::build(&state),
        error: None,
    }
}

/// Log in: overwrite the persisted user record.
#[instrument(skip(state, form), fields(email = %form.email))]
pub async fn login(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let email = match Email::parse(form.email.trim()) {
        Ok(email) => email,
        Err(err) => {
            return LoginTemplate {
                nav: NavView::build(&state),
                error: Some(err.to_string()),
            }
            .into_response();
        }
    };

    let name = form.name.trim();
    let user = User {
        name: if name.is_empty() {
            email.as_str().to_owned()
        } else {
            name.to_owned()
        },
        email,
    };

    state.session().log_in(&user);
    tracing::info!("user logged in");
    Redirect::to("/").into_response()
}

/// Log out: clear the persisted user record.
#[instrument(skip(state))]
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    state.session().log_out();
    Redirect::to("/")
}
