pub mod health;
pub mod ui;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.config.max_upload_bytes);

    Router::new()
        .route("/", get(ui::index_handler))
        .route("/health", get(health::health_handler))
        // Tailoring API
        .route("/api/v1/resumes/tailor", post(handlers::handle_tailor))
        .route(
            "/api/v1/resumes/tailor/download",
            post(handlers::handle_tailor_download),
        )
        .layer(body_limit)
        .with_state(state)
}
