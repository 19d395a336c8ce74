//! Axum route handlers for the Analysis API.

use std::time::Instant;

use anyhow::Context;
use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::info;

use crate::analysis::prompts::build_analysis_prompt;
use crate::errors::AppError;
use crate::extraction::extract_resume_text;
use crate::models::analysis::AnalyzeResponse;
use crate::state::AppState;

/// Minimum length of `job_description`, in characters.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 20;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct ResumeUpload {
    pub content_type: Option<String>,
    pub data: Bytes,
}

/// A validated `POST /analyze` form.
#[derive(Debug)]
pub struct AnalysisRequest {
    pub resume: ResumeUpload,
    pub job_description: String,
    pub role_title: Option<String>,
}

impl AnalysisRequest {
    /// Reads the multipart form and validates it. Unknown fields are ignored.
    pub async fn from_multipart(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut resume = None;
        let mut job_description = None;
        let mut role_title = None;

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            let name = field.name().map(String::from);
            match name.as_deref() {
                Some("resume") => {
                    let content_type = field.content_type().map(String::from);
                    let data = field.bytes().await.map_err(multipart_error)?;
                    resume = Some(ResumeUpload { content_type, data });
                }
                Some("job_description") => {
                    job_description = Some(field.text().await.map_err(multipart_error)?);
                }
                Some("role_title") => {
                    role_title = Some(field.text().await.map_err(multipart_error)?);
                }
                _ => {}
            }
        }

        let job_description = job_description
            .ok_or_else(|| AppError::Validation("job_description is required".to_string()))?;
        if job_description.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
            return Err(AppError::Validation(format!(
                "job_description must be at least {MIN_JOB_DESCRIPTION_CHARS} characters"
            )));
        }

        let resume =
            resume.ok_or_else(|| AppError::Validation("resume file is required".to_string()))?;

        Ok(AnalysisRequest {
            resume,
            job_description,
            role_title: role_title.filter(|t| !t.is_empty()),
        })
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return AppError::PayloadTooLarge(
            "Upload exceeds the maximum allowed size".to_string(),
        );
    }
    AppError::Validation(format!("Invalid multipart body: {}", err.body_text()))
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /analyze
///
/// Extracts the resume text, asks the model for a fit assessment and returns it
/// with the wall-clock time the request took.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    let started = Instant::now();

    let multipart = multipart.map_err(|e| AppError::Validation(e.body_text()))?;
    let AnalysisRequest {
        resume,
        job_description,
        role_title,
    } = AnalysisRequest::from_multipart(multipart).await?;

    let resume_text = tokio::task::spawn_blocking(move || {
        extract_resume_text(resume.content_type.as_deref(), &resume.data)
    })
    .await
    .context("Resume extraction task failed")??;

    let prompt = build_analysis_prompt(role_title.as_deref(), &job_description, &resume_text);
    let result = state.analyzer.analyze(&prompt).await?;

    let elapsed_ms = (started.elapsed().as_secs_f64() * 1000.0).round() as u64;
    info!(
        "Analysis complete: fit_score={} resume_chars={} elapsed_ms={}",
        result.fit_score.value(),
        resume_text.chars().count(),
        elapsed_ms
    );

    Ok(Json(AnalyzeResponse { result, elapsed_ms }))
}
