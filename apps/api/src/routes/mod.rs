pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::state::AppState;

/// Room left in the request body for the JSON part of a photo upload.
pub const BODY_HEADROOM_BYTES: usize = 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_photo_bytes
        .saturating_add(BODY_HEADROOM_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(generation::handle_list_templates))
        // Drafting
        .route("/api/v1/resumes/generate", post(generation::handle_generate))
        .route("/api/v1/resumes/refine", post(generation::handle_refine))
        // Rendering and downloads
        .route("/api/v1/resumes/preview", post(render::handle_preview))
        .route(
            "/api/v1/resumes/export/text",
            post(render::handle_export_text),
        )
        .route("/api/v1/resumes/export/pdf", post(render::handle_export_pdf))
        .route(
            "/api/v1/resumes/export/pdf/upload",
            post(render::handle_export_pdf_upload),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
