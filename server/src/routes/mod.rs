use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::config::create_cors_layer;
use crate::handlers::{get_event, health_check, missing_slug};
use crate::state::AppState;

pub fn create_routes(state: AppState, cors_origins: Option<&str>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/events", get(missing_slug))
        .route("/events/", get(missing_slug))
        .route("/events/:slug", get(get_event))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(create_cors_layer(cors_origins))
}
