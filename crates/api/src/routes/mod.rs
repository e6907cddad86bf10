//! API routes.

pub mod contact;
pub mod health;
pub mod portfolio;

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/contact", post(contact::submit_handler))
        .route("/api/contact", get(contact::list_handler))
        .route("/api/contact/stats", get(contact::stats_handler))
        .route("/api/contact/:id", get(contact::get_handler))
        .route("/api/contact/:id/status", put(contact::update_status_handler))
        .route("/api/contact/:id/reply", post(contact::reply_handler))
        .route("/api/portfolio", get(portfolio::list_handler))
        .route("/api/portfolio", post(portfolio::create_handler))
        .route("/api/portfolio/featured", get(portfolio::featured_handler))
        .route("/api/portfolio/:slug", get(portfolio::get_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
