use std::time::Duration;

use axum::Router;
use axum::routing::{get, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout);

    Router::new()
        .route("/health", get(handlers::health))
        // form submission, field `Url`
        .route("/data", post(handlers::analyze_form))
        .route("/api/analyze", post(handlers::analyze_json))
        .route("/api/users/{email}/analyses", get(handlers::user_history))
        .route("/api/analyses", get(handlers::dashboard))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(timeout))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
