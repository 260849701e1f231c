//! In-process router tests.
//!
//! The full application router is exercised with `tower::ServiceExt::oneshot`
//! over an in-memory storage backend, so these run hermetically.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use orchard_core::MemoryStorage;
use orchard_storefront::config::StorefrontConfig;
use orchard_storefront::state::AppState;
use tower::ServiceExt;

fn test_app() -> Router {
    let state = AppState::new(StorefrontConfig::default(), Arc::new(MemoryStorage::new()));
    orchard_storefront::app(state)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

fn post_form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf8 body")
}

#[tokio::test]
async fn health_returns_ok() {
    let response = test_app().oneshot(get("/health")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await, "ok");
}

#[tokio::test]
async fn home_page_renders() {
    let response = test_app().oneshot(get("/")).await.expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Popular right now"));
    assert!(body.contains("On sale"));
}

#[tokio::test]
async fn product_detail_renders_and_unknown_id_is_404() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(get("/products/garden-honey"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Garden Honey"));

    let response = app
        .oneshot(get("/products/no-such-product"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn category_section_includes_subcategory_products() {
    let response = test_app()
        .oneshot(get("/catalog/pantry"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    // Pantry has no direct products; honey and preserves roll up into it.
    assert!(body.contains("Garden Honey"));
    assert!(body.contains("Cherry Jam"));
}

#[tokio::test]
async fn unknown_category_is_404() {
    let response = test_app()
        .oneshot(get("/catalog/electronics"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn add_to_cart_returns_badge_and_trigger() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_form("/cart/add", "product_id=garden-honey&quantity=2"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response
            .headers()
            .get("HX-Trigger")
            .and_then(|v| v.to_str().ok()),
        Some("cart-updated")
    );
    assert_eq!(body_string(response).await.trim(), "2");

    // The badge endpoint sees the same persisted cart.
    let response = app.oneshot(get("/cart/count")).await.expect("response");
    assert_eq!(body_string(response).await.trim(), "2");
}

#[tokio::test]
async fn add_to_cart_coerces_bad_quantity_to_one() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_form(
            "/cart/add",
            "product_id=garden-honey&quantity=banana",
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_string(response).await.trim(), "1");
}

#[tokio::test]
async fn cart_update_to_zero_removes_the_line() {
    let app = test_app();

    app.clone()
        .oneshot(post_form("/cart/add", "product_id=cherry-jam&quantity=1"))
        .await
        .expect("add");

    let response = app
        .clone()
        .oneshot(post_form("/cart/update", "index=0&quantity=0"))
        .await
        .expect("update");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Your cart is empty"));
}

#[tokio::test]
async fn checkout_submit_clears_the_cart() {
    let app = test_app();

    app.clone()
        .oneshot(post_form("/cart/add", "product_id=harvest-gift-box"))
        .await
        .expect("add");

    let response = app
        .clone()
        .oneshot(post_form("/checkout", "shipping=delivery&payment=card"))
        .await
        .expect("submit");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("Thank you"));

    let response = app.oneshot(get("/cart/count")).await.expect("count");
    assert_eq!(body_string(response).await.trim(), "0");
}

#[tokio::test]
async fn login_personalizes_the_header() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_form("/auth/login", "name=Ada&email=ada%40example.com"))
        .await
        .expect("login");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.clone().oneshot(get("/")).await.expect("home");
    assert!(body_string(response).await.contains("Hello, Ada"));

    let response = app
        .clone()
        .oneshot(post_form("/auth/logout", ""))
        .await
        .expect("logout");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.oneshot(get("/")).await.expect("home");
    assert!(body_string(response).await.contains("Log in"));
}

#[tokio::test]
async fn invalid_login_email_rerenders_the_form() {
    let response = test_app()
        .oneshot(post_form("/auth/login", "name=Ada&email=not-an-email"))
        .await
        .expect("login");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("class=\"error\""));
}

#[tokio::test]
async fn newsletter_subscribe_fragments() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_form("/newsletter/subscribe", "email=ada%40example.com"))
        .await
        .expect("subscribe");
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("on the list"));

    let response = app
        .oneshot(post_form("/newsletter/subscribe", "email=nope"))
        .await
        .expect("subscribe");
    assert!(body_string(response).await.contains("valid email"));
}

#[tokio::test]
async fn search_renders_matches() {
    let response = test_app()
        .oneshot(get("/search?q=honey"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    assert!(body.contains("Garden Honey"));
    assert!(body.contains("Wildflower Honey"));
    assert!(!body.contains("Cherry Jam"));
}

#[tokio::test]
async fn posted_search_term_is_stashed_then_consumed() {
    let app = test_app();

    let response = app
        .clone()
        .oneshot(post_form("/search", "term=mug"))
        .await
        .expect("submit");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = app.clone().oneshot(get("/search")).await.expect("results");
    assert!(body_string(response).await.contains("Stoneware Mug"));

    // The stashed term is deleted after being consumed.
    let response = app.oneshot(get("/search")).await.expect("results");
    assert!(body_string(response).await.contains("Type something"));
}
