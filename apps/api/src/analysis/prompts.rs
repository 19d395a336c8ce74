// Prompt composition for the analysis call.

use crate::extraction::truncate_chars;

/// Job descriptions beyond this many characters are cut before prompting.
pub const MAX_JOB_DESCRIPTION_CHARS: usize = 6_000;
/// Placeholder used when the caller gives no role title.
pub const UNSPECIFIED_ROLE: &str = "Not specified";

/// Builds the user prompt from the role title, job description and resume text.
pub fn build_analysis_prompt(
    role_title: Option<&str>,
    job_description: &str,
    resume_text: &str,
) -> String {
    format!(
        "ROLE TITLE: {}\n\nJOB DESCRIPTION:\n{}\n\nRESUME:\n{}",
        role_title.unwrap_or(UNSPECIFIED_ROLE),
        truncate_chars(job_description, MAX_JOB_DESCRIPTION_CHARS),
        resume_text
    )
}
