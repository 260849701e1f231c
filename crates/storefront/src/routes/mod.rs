//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /health                 - Health check
//!
//! # Catalog
//! GET  /catalog                - All products
//! GET  /catalog/{category}     - Category section
//! GET  /products/{id}          - Product detail
//!
//! # Search
//! GET  /search?q=              - Search results
//! POST /search                 - Stash the term, redirect to results
//!
//! # Cart (HTMX fragments)
//! GET  /cart                   - Cart page
//! POST /cart/add               - Add to cart (returns count badge, triggers cart-updated)
//! POST /cart/update            - Update quantity (returns cart_items fragment)
//! POST /cart/remove            - Remove item (returns cart_items fragment)
//! GET  /cart/count             - Cart count badge (fragment)
//!
//! # Checkout
//! GET  /checkout               - Totals preview with method selectors
//! POST /checkout/quote         - Re-quote fragment on method change
//! POST /checkout               - Confirm order (clears the cart)
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action (always overwrites)
//! POST /auth/logout            - Logout action
//!
//! # Newsletter
//! POST /newsletter/subscribe   - Subscribe fragment (HTMX)
//! ```

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod home;
pub mod newsletter;
pub mod products;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show).post(checkout::submit))
        .route("/quote", post(checkout::quote))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/catalog", get(catalog::index))
        .route("/catalog/{category}", get(catalog::show))
        .route("/products/{id}", get(products::show))
        .route("/search", get(search::results).post(search::submit))
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/auth", auth_routes())
        .route("/newsletter/subscribe", post(newsletter::subscribe))
}
