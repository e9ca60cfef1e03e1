//! Axum route handlers for the Match API.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_pdf_text, is_pdf_filename};
use crate::matching::pipeline::MatchReport;
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "job_description";

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct MatchTextRequest {
    pub resume_text: String,
    pub job_description: String,
}

/// Fields collected from the multipart upload.
#[derive(Default)]
struct MatchUpload {
    resume: Option<(String, Bytes)>,
    job_description: Option<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/match
///
/// Multipart upload: `resume` (PDF file) and `job_description` (text).
/// Input problems are rejected before any text extraction.
pub async fn handle_match_upload(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<MatchReport>, AppError> {
    let upload = read_upload(multipart, state.config.max_upload_bytes).await?;

    let (filename, pdf) = upload
        .resume
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    if filename.trim().is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }
    if !is_pdf_filename(&filename) {
        return Err(AppError::Validation("Invalid file type".to_string()));
    }
    let job_description = require_job_description(upload.job_description)?;

    info!(%filename, bytes = pdf.len(), "Resume upload received");
    let resume_text = extract_pdf_text(pdf).await?;

    let report = state.pipeline.run(&resume_text, &job_description).await;
    Ok(Json(report))
}

/// POST /api/v1/match/text
///
/// Same pipeline for callers that already hold the resume as plain text.
pub async fn handle_match_text(
    State(state): State<AppState>,
    Json(request): Json<MatchTextRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let job_description = require_job_description(Some(request.job_description))?;

    let report = state
        .pipeline
        .run(&request.resume_text, &job_description)
        .await;
    Ok(Json(report))
}

async fn read_upload(mut multipart: Multipart, limit: usize) -> Result<MatchUpload, AppError> {
    let mut upload = MatchUpload::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, "Malformed multipart body", limit))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, "Failed to read resume", limit))?;
                upload.resume = Some((filename, data));
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, "Failed to read job description", limit))?;
                upload.job_description = Some(text);
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Body-limit overruns surface as 413; anything else is a malformed request.
fn multipart_error(e: MultipartError, context: &str, limit: usize) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(format!("Upload exceeds the {limit} byte limit"))
    } else {
        AppError::Validation(format!("{context}: {e}"))
    }
}

fn require_job_description(job_description: Option<String>) -> Result<String, AppError> {
    match job_description {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        )),
        None => Err(AppError::Validation(
            "job_description is required".to_string(),
        )),
    }
}
