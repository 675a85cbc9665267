pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::extraction::handlers as extraction;
use crate::letter::handlers as letter;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction API
        .route("/api/v1/extract", post(extraction::handle_extract))
        // Letter API
        .route("/api/v1/fields/defaults", get(letter::handle_field_defaults))
        .route("/api/v1/letter/preview", post(letter::handle_preview))
        .route("/api/v1/letter/pdf", post(letter::handle_pdf))
        .with_state(state)
}
