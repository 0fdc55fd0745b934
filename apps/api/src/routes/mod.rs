pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::auth;
use crate::jobs::handlers;
use crate::state::AppState;

/// Headroom above the file limit for multipart framing and text fields.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/auth", post(auth::handle_auth))
        .route("/resume/upload", post(handlers::handle_upload))
        .route("/fetchJobs", post(handlers::handle_fetch_jobs))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
