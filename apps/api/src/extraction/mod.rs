//! Resume text extraction: turns an uploaded PDF into bounded plain text.
//!
//! Page failures are tolerated one page at a time; only a document that yields
//! no text at all is rejected.

use std::fmt::Display;

use thiserror::Error;
use tracing::{debug, warn};

#[cfg(test)]
pub mod fixtures;
pub mod pdf;

/// Content types accepted for the resume upload. Browsers sometimes label
/// PDFs as octet-stream, so both are allowed.
pub const ALLOWED_CONTENT_TYPES: [&str; 2] = ["application/pdf", "application/octet-stream"];
/// Only the first pages of a resume are read.
pub const MAX_PAGES: usize = 12;
/// Hard cap on extracted characters handed to the prompt.
pub const MAX_RESUME_CHARS: usize = 20_000;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Resume must be a PDF file")]
    UnsupportedMediaType,

    #[error("Could not read PDF content")]
    EmptyPayload,

    #[error("Could not parse PDF: {0}")]
    Unreadable(String),

    #[error("No extractable text found in PDF")]
    NoText,
}

/// Extracts resume text from an upload, enforcing the content-type,
/// page and character limits.
pub fn extract_resume_text(content_type: Option<&str>, data: &[u8]) -> Result<String, ExtractError> {
    if !content_type.is_some_and(|ct| ALLOWED_CONTENT_TYPES.iter().any(|allowed| *allowed == ct)) {
        warn!("Rejected resume upload with content type {content_type:?}");
        return Err(ExtractError::UnsupportedMediaType);
    }

    if data.is_empty() {
        return Err(ExtractError::EmptyPayload);
    }

    let pages = pdf::read_pages(data, MAX_PAGES)?;
    debug!("Read {} page(s) from resume PDF", pages.len());

    let text = join_pages(pages)?;
    Ok(truncate_chars(&text, MAX_RESUME_CHARS).to_string())
}

/// Joins per-page extraction results in page order. Failed pages are skipped,
/// blank pages are dropped, the rest are trimmed and newline-joined.
pub fn join_pages<I, E>(pages: I) -> Result<String, ExtractError>
where
    I: IntoIterator<Item = Result<String, E>>,
    E: Display,
{
    let mut parts = Vec::new();
    for (idx, page) in pages.into_iter().enumerate() {
        match page {
            Ok(text) => {
                let trimmed = text.trim();
                if !trimmed.is_empty() {
                    parts.push(trimmed.to_string());
                }
            }
            Err(e) => warn!("Skipping resume page {}: {e}", idx + 1),
        }
    }

    if parts.is_empty() {
        return Err(ExtractError::NoText);
    }
    Ok(parts.join("\n"))
}

/// Returns at most the first `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}
