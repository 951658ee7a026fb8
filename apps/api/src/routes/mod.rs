pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::screening::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_mb * 1024 * 1024;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/jobs/summaries", post(handlers::handle_summaries))
        .route("/api/v1/screenings", post(handlers::handle_screening))
        .route("/api/v1/notifications", post(handlers::handle_notify))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
