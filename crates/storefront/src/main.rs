//! Orchard Storefront - server-rendered demo shop.
//!
//! # Architecture
//!
//! - Axum web framework with HTMX for cart and newsletter interactivity
//! - Askama templates for server-side rendering
//! - Static in-memory catalog (`orchard-core`)
//! - Durable state (cart, user, subscribers) in a file-per-key store
//!   under the configured data directory

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use orchard_storefront::config::StorefrontConfig;
use orchard_storefront::state::AppState;
use orchard_storefront::storage_fs::FileStorage;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "orchard_storefront=info,orchard_core=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Open the file-backed record store
    let storage = FileStorage::open(&config.data_dir).expect("Failed to open data directory");
    tracing::info!(dir = %config.data_dir.display(), "record store opened");

    // Build application state and router
    let addr = config.socket_addr();
    let state = AppState::new(config, Arc::new(storage));
    let app = orchard_storefront::app(state)
        .layer(tower_http::trace::TraceLayer::new_for_http());

    // Start server
    tracing::info!("storefront listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
