//! Axum route handlers for the Letter API.

use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::{AppError, AppJson};
use crate::letter::{render_letter, to_document, LetterFields, RenderedLetter, PDF_CONTENT_TYPE};
use crate::state::AppState;

pub const PAGE_COUNT_HEADER: &str = "x-page-count";

#[derive(Debug, Serialize)]
pub struct PreviewResponse {
    pub letter: RenderedLetter,
}

/// GET /api/v1/fields/defaults
///
/// Initial values for the five editable fields.
pub async fn handle_field_defaults() -> Json<LetterFields> {
    Json(LetterFields::initial())
}

/// POST /api/v1/letter/preview
///
/// Returns the letter text with the supplied fields substituted.
pub async fn handle_preview(
    AppJson(fields): AppJson<LetterFields>,
) -> Result<Json<PreviewResponse>, AppError> {
    Ok(Json(PreviewResponse {
        letter: render_letter(&fields),
    }))
}

/// POST /api/v1/letter/pdf
///
/// Renders the letter and returns it as a PDF download.
pub async fn handle_pdf(
    State(state): State<AppState>,
    AppJson(fields): AppJson<LetterFields>,
) -> Result<Response, AppError> {
    let page_config = state.page_config.clone();
    let document = tokio::task::spawn_blocking(move || {
        let letter = render_letter(&fields);
        to_document(&letter, &page_config)
    })
    .await
    .context("PDF export task failed")??;

    info!(
        pages = document.page_count,
        bytes = document.bytes.len(),
        "letter exported"
    );

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        state.config.pdf_file_name
    ))
    .context("download file name is not a valid header value")?;

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(PDF_CONTENT_TYPE));
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    headers.insert(PAGE_COUNT_HEADER, HeaderValue::from(document.page_count));

    Ok((headers, document.bytes).into_response())
}
