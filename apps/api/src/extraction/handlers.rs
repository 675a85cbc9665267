//! Axum route handlers for the Extraction API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, AppJson};
use crate::extraction::{ExtractedFields, ExtractionStrategy, JobDescription};
use crate::letter::LetterFields;
use crate::state::AppState;

/// Longest job description accepted, in characters.
pub const MAX_JD_CHARS: usize = 100_000;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub jd_text: String,
    /// Overrides the configured strategy for this request.
    #[serde(default)]
    pub strategy: Option<ExtractionStrategy>,
    /// The session's current field values. Defaults to `LetterFields::initial()`.
    #[serde(default)]
    pub fields: Option<LetterFields>,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub extracted: ExtractedFields,
    /// `extracted.value_phrases` joined for display.
    pub company_value: String,
    /// The session fields after auto-fill.
    pub fields: LetterFields,
    pub strategy: ExtractionStrategy,
    /// False when the pasted text was blank and `fields` came back unchanged.
    pub autofilled: bool,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/extract
///
/// Seeds job title, company name and company value from a pasted job
/// description. Blank text leaves the supplied fields untouched.
pub async fn handle_extract(
    State(state): State<AppState>,
    AppJson(request): AppJson<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    if request.jd_text.chars().count() > MAX_JD_CHARS {
        return Err(AppError::Validation(format!(
            "jd_text cannot exceed {MAX_JD_CHARS} characters"
        )));
    }

    let extractor = state.extractor_for(request.strategy);
    let jd = JobDescription::new(&request.jd_text);
    let extracted = extractor.extract(&jd);

    let mut fields = request.fields.unwrap_or_else(LetterFields::initial);
    let autofilled = !jd.is_blank();
    if autofilled {
        fields.apply_extracted(&extracted);
    }

    info!(
        strategy = %extractor.strategy(),
        lines = jd.lines().len(),
        value_phrases = extracted.value_phrases.len(),
        autofilled,
        "job description extracted"
    );

    Ok(Json(ExtractResponse {
        company_value: extracted.company_value(),
        extracted,
        fields,
        strategy: extractor.strategy(),
        autofilled,
    }))
}
