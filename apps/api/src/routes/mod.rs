pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export_handlers;
use crate::extraction::handlers as extraction_handlers;
use crate::interview::handlers as interview_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume upload & summary download
        .route("/api/v1/resume", post(extraction_handlers::handle_upload))
        .route(
            "/api/v1/resume/summary",
            get(export_handlers::handle_download_summary),
        )
        // Interview session
        .route("/api/v1/roles", get(interview_handlers::handle_list_roles))
        .route(
            "/api/v1/interview",
            get(interview_handlers::handle_session_status),
        )
        .route(
            "/api/v1/interview/start",
            post(interview_handlers::handle_start),
        )
        .route(
            "/api/v1/interview/answer",
            post(interview_handlers::handle_answer),
        )
        // Transcript export
        .route(
            "/api/v1/transcript",
            get(export_handlers::handle_download_transcript),
        )
        .with_state(state)
}
