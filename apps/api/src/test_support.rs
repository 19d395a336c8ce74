//! Shared helpers for router tests: a fake analyzer, app state and a
//! multipart body builder.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::config::Config;
use crate::llm_client::LlmError;
use crate::models::analysis::{AnalysisResult, FitScore};
use crate::routes::build_router;
use crate::state::AppState;

pub const VALID_JOB_DESCRIPTION: &str =
    "Senior Rust engineer to build and operate async HTTP services on tokio.";
const BOUNDARY: &str = "roleready-test-boundary";

type Responder = Box<dyn Fn() -> Result<AnalysisResult, LlmError> + Send + Sync>;

/// Records every prompt it receives and answers from a fixed responder.
pub struct FakeAnalyzer {
    respond: Responder,
    prompts: Mutex<Vec<String>>,
}

impl FakeAnalyzer {
    pub fn succeeding(score: u8) -> Arc<Self> {
        let fit_score = FitScore::try_from(f64::from(score)).expect("score in range");
        Arc::new(Self {
            respond: Box::new(move || {
                Ok(AnalysisResult {
                    fit_score,
                    summary: "Good match.".to_string(),
                    strengths: vec!["Rust".to_string()],
                    gaps: vec!["Go".to_string()],
                    tailored_bullets: vec!["Shipped a Rust API".to_string()],
                    interview_questions: vec!["Why Rust?".to_string()],
                })
            }),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn failing<F>(make_error: F) -> Arc<Self>
    where
        F: Fn() -> LlmError + Send + Sync + 'static,
    {
        Arc::new(Self {
            respond: Box::new(move || Err(make_error())),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResumeAnalyzer for FakeAnalyzer {
    async fn analyze(&self, prompt: &str) -> Result<AnalysisResult, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        (self.respond)()
    }
}

pub fn test_config() -> Config {
    let vars = HashMap::from([("OPENROUTER_API_KEY", "sk-test".to_string())]);
    Config::from_lookup(|key| vars.get(key).cloned()).unwrap()
}

pub fn test_state(analyzer: &Arc<FakeAnalyzer>) -> AppState {
    AppState {
        analyzer: analyzer.clone(),
        config: test_config(),
    }
}

/// Sends `request` through a fresh router and returns status and JSON body.
pub async fn send(analyzer: &Arc<FakeAnalyzer>, request: Request<Body>) -> (StatusCode, Value) {
    send_with_state(test_state(analyzer), request).await
}

pub async fn send_with_state(state: AppState, request: Request<Body>) -> (StatusCode, Value) {
    let response = build_router(state)
        .oneshot(request)
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub enum Part<'a> {
    Text(&'a str, &'a str),
    File {
        name: &'a str,
        content_type: Option<&'a str>,
        data: &'a [u8],
    },
}

/// Encodes `parts` as a multipart/form-data body.
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text(name, value) => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                content_type,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"resume.pdf\"\r\n"
                    )
                    .as_bytes(),
                );
                if let Some(ct) = content_type {
                    body.extend_from_slice(format!("Content-Type: {ct}\r\n").as_bytes());
                }
                body.extend_from_slice(b"\r\n");
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub fn analyze_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/analyze")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}
