//! QuoteKit API Server - Back office for a renovation contractor
//!
//! Provides REST endpoints for:
//! - Admin authentication with login throttling
//! - Quote CRUD, PDF export, and email delivery
//! - Clients, booking requests, analytics, and the service catalog

use anyhow::Result;
use axum::{
    routing::{get, post, put},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

mod auth;
mod config;
mod error;
mod handlers;
mod models;
mod rate_limit;
mod state;
mod store;

use config::Config;
use state::AppState;

/// Build the router. Tests drive this directly with `tower::ServiceExt`.
pub fn app(state: Arc<AppState>) -> Router {
    // CORS configuration for the admin SPA
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check
        .route("/health", get(handlers::health))
        // Auth
        .route("/api/auth/login", post(handlers::login))
        .route("/api/auth/check", get(handlers::auth_check))
        .route("/api/auth/logout", post(handlers::logout))
        // Quotes
        .route("/api/quotes", get(handlers::list_quotes).post(handlers::create_quote))
        .route(
            "/api/quotes/:id",
            get(handlers::get_quote)
                .put(handlers::update_quote)
                .delete(handlers::delete_quote),
        )
        .route("/api/quotes/:id/pdf", get(handlers::quote_pdf))
        .route("/api/quotes/:id/email", post(handlers::email_quote))
        // Clients
        .route("/api/clients", get(handlers::list_clients).post(handlers::upsert_client))
        .route("/api/clients/:id", get(handlers::get_client))
        // Booking requests (create is public, the rest is admin-only)
        .route(
            "/api/quote-requests",
            get(handlers::list_quote_requests).post(handlers::create_quote_request),
        )
        .route("/api/quote-requests/:id", axum::routing::delete(handlers::delete_quote_request))
        .route(
            "/api/quote-requests/:id/status",
            put(handlers::update_quote_request_status),
        )
        // Analytics and catalog
        .route("/api/analytics", get(handlers::analytics))
        .route("/api/services", get(handlers::services))
        // Add middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("quote_api=info".parse()?)
                .add_directive("tower_http=debug".parse()?),
        )
        .init();

    // Initialize application state
    info!("Initializing QuoteKit API...");
    let config = Config::from_env();
    let port = config.port;
    let state = Arc::new(AppState::new(config).await?);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("Starting QuoteKit API on http://{}", addr);

    // Start server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
