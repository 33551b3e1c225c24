use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Status
        .route("/", get(handlers::status_page))
        .route("/health", get(handlers::health_check))
        // Batch processing
        .route("/process-calls", post(handlers::process_calls))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
