//! Resume analyzer: the seam between the request handler and the model.
//!
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>`; production wires in
//! `LlmClient`, tests swap in fakes.

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::info;

use crate::llm_client::prompts::ROLEREADY_SYSTEM;
use crate::llm_client::{LlmClient, LlmError};
use crate::models::analysis::AnalysisResult;

#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, prompt: &str) -> Result<AnalysisResult, LlmError>;
}

#[async_trait]
impl ResumeAnalyzer for LlmClient {
    async fn analyze(&self, prompt: &str) -> Result<AnalysisResult, LlmError> {
        info!("Requesting analysis from {}", self.model());
        self.call_structured::<AnalysisResult>(prompt, ROLEREADY_SYSTEM, &analysis_schema())
            .await
    }
}

/// JSON Schema of `AnalysisResult`, sent as the output tool's parameters.
pub fn analysis_schema() -> Value {
    let string_list = json!({ "type": "array", "items": { "type": "string" } });
    json!({
        "type": "object",
        "properties": {
            "fit_score": { "type": "integer", "minimum": 0, "maximum": 100 },
            "summary": { "type": "string" },
            "strengths": string_list,
            "gaps": string_list,
            "tailored_bullets": string_list,
            "interview_questions": string_list,
        },
        "required": [
            "fit_score",
            "summary",
            "strengths",
            "gaps",
            "tailored_bullets",
            "interview_questions"
        ],
        "additionalProperties": false,
    })
}
