// Resume analysis: multipart intake, prompt composition, model call.
// All model calls go through llm_client via the ResumeAnalyzer seam.

pub mod analyzer;
pub mod handlers;
pub mod prompts;
