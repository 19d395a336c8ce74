//! LLM Client: the single point of entry for all OpenRouter calls in RoleReady.
//!
//! One chat-completions request per call. Structured output is obtained by
//! forcing a single `final_result` tool call whose parameters are the JSON
//! Schema of the expected type. No retries.

use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

pub mod prompts;

/// Name of the tool the model must call with its structured answer.
pub const OUTPUT_TOOL_NAME: &str = "final_result";
const OUTPUT_TOOL_DESCRIPTION: &str = "The final response which ends this conversation";

#[derive(Debug, Error)]
pub enum LlmError {
    /// Upstream answered with a non-success HTTP status.
    #[error("status_code: {status}, model_name: {model}, body: {body}")]
    Status {
        status: u16,
        model: String,
        body: Value,
    },

    /// The call failed without an HTTP status (transport, timeout, provider fault).
    #[error("{message}")]
    Api { model: String, message: String },

    #[error("Model output did not match the expected schema: {0}")]
    InvalidOutput(String),
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    tools: Vec<ToolDefinition<'a>>,
    tool_choice: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ToolDefinition<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    function: FunctionDefinition<'a>,
}

#[derive(Debug, Serialize)]
struct FunctionDefinition<'a> {
    name: &'a str,
    description: &'a str,
    parameters: &'a Value,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
    /// OpenRouter can report provider failures inside a 200 body.
    pub error: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
    #[serde(default)]
    pub tool_calls: Vec<ToolCall>,
}

#[derive(Debug, Deserialize)]
pub struct ToolCall {
    pub function: FunctionCall,
}

#[derive(Debug, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub arguments: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Raw JSON text of the structured answer: the output tool's arguments,
    /// or the plain message content if the model ignored the tool.
    pub fn structured_text(&self) -> Option<&str> {
        let message = &self.choices.first()?.message;
        message
            .tool_calls
            .iter()
            .find(|call| call.function.name == OUTPUT_TOOL_NAME)
            .map(|call| call.function.arguments.as_str())
            .or(message.content.as_deref())
    }
}

/// The single LLM client used by RoleReady.
/// Built once at startup; the underlying reqwest client pools connections.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl LlmClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.openrouter_timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: config.openrouter_api_key.clone(),
            model: config.openrouter_model.clone(),
            endpoint: format!("{}/chat/completions", config.openrouter_base_url),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn api_error(&self, message: impl Into<String>) -> LlmError {
        LlmError::Api {
            model: self.model.clone(),
            message: message.into(),
        }
    }

    /// Makes one chat-completions call that forces the output tool,
    /// returning the full response object.
    pub async fn call(
        &self,
        prompt: &str,
        system: &str,
        schema: &Value,
    ) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            tools: vec![ToolDefinition {
                kind: "function",
                function: FunctionDefinition {
                    name: OUTPUT_TOOL_NAME,
                    description: OUTPUT_TOOL_DESCRIPTION,
                    parameters: schema,
                },
            }],
            tool_choice: "required",
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| self.api_error(format!("Request to model provider failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.api_error(format!("Failed to read model provider response: {e}")))?;

        if !status.is_success() {
            warn!("LLM API returned {}: {}", status, body);
            // Keep the body as JSON when it is JSON so callers see it verbatim
            let body = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
            return Err(LlmError::Status {
                status: status.as_u16(),
                model: self.model.clone(),
                body,
            });
        }

        let chat: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::InvalidOutput(format!("unexpected response body: {e}")))?;

        if let Some(error) = &chat.error {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(String::from)
                .unwrap_or_else(|| error.to_string());
            return Err(self.api_error(message));
        }

        if let Some(usage) = &chat.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(chat)
    }

    /// Calls the LLM and deserializes the structured answer into `T`.
    pub async fn call_structured<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        schema: &Value,
    ) -> Result<T, LlmError> {
        let response = self.call(prompt, system, schema).await?;

        let text = response
            .structured_text()
            .ok_or_else(|| LlmError::InvalidOutput("model returned no output".to_string()))?;

        // Strip markdown code fences if the model wraps JSON in them
        let text = strip_json_fences(text);

        serde_json::from_str(text).map_err(|e| LlmError::InvalidOutput(e.to_string()))
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => {
            let stripped = stripped.trim_start();
            stripped
                .strip_suffix("```")
                .map(str::trim)
                .unwrap_or(stripped)
        }
        None => text,
    }
}
