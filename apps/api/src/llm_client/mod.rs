//! LLM Client: the single point of entry for all model calls in the ATS API.
//!
//! ARCHITECTURAL RULE: No other module may call the Anthropic API directly.
//! Flows talk to a [`ModelBackend`]; production wires in [`LlmClient`].
//!
//! Model: claude-sonnet-4-5 (hardcoded, not configurable)
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::llm_client::schema::SchemaDescriptor;

#[cfg(test)]
pub mod mock;
pub mod prompts;
pub mod schema;
pub mod structured;

pub const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
/// The model used for all LLM calls.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "claude-sonnet-4-5";
const MAX_TOKENS: u32 = 4096;
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Model call timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// One structured-output call: a rendered prompt plus the schema the answer must satisfy.
#[derive(Debug, Clone, Copy)]
pub struct ModelRequest<'a> {
    pub system: &'a str,
    pub prompt: &'a str,
    pub schema: &'a SchemaDescriptor,
}

/// The provider seam. Implementations send the prompt with the schema as a
/// structured-output constraint and hand back the raw payload, unvalidated.
///
/// A call is a single attempt. Dropping the future abandons it.
#[async_trait]
pub trait ModelBackend: Send + Sync {
    async fn invoke(&self, request: ModelRequest<'_>) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct AnthropicRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<AnthropicMessage<'a>>,
    tools: Vec<AnthropicTool<'a>>,
    tool_choice: ToolChoice<'a>,
}

#[derive(Debug, Serialize)]
struct AnthropicMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// The schema travels as a tool definition; forcing the tool makes the model
/// answer with an `input` object shaped by `input_schema`.
#[derive(Debug, Serialize)]
struct AnthropicTool<'a> {
    name: &'a str,
    description: &'a str,
    input_schema: Value,
}

#[derive(Debug, Serialize)]
struct ToolChoice<'a> {
    #[serde(rename = "type")]
    choice_type: &'a str,
    name: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct LlmResponse {
    pub content: Vec<ContentBlock>,
    pub usage: Usage,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
    pub name: Option<String>,
    pub input: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl LlmResponse {
    /// Extracts the text content from the first text block.
    pub fn text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|b| b.block_type == "text")
            .and_then(|b| b.text.as_deref())
    }

    /// The forced tool call's input, or failing that the first text block.
    pub fn structured_payload(&self, tool_name: &str) -> Option<String> {
        self.content
            .iter()
            .find(|b| b.block_type == "tool_use" && b.name.as_deref() == Some(tool_name))
            .and_then(|b| b.input.as_ref())
            .map(Value::to_string)
            .or_else(|| self.text().map(str::to_string))
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// Production [`ModelBackend`] over the Anthropic Messages API.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, api_url: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?,
            api_key,
            api_url,
        })
    }

    /// Makes a single call to the Messages API with the schema forced as a tool.
    /// Rate limits and 5xx responses are surfaced, not retried.
    pub async fn call(&self, request: ModelRequest<'_>) -> Result<LlmResponse, LlmError> {
        let request_body = build_request(&request);

        let response = self
            .client
            .post(&self.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("LLM API returned {}: {}", status, body);
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let llm_response: LlmResponse = response.json().await?;

        debug!(
            "LLM call succeeded: schema={}, input_tokens={}, output_tokens={}",
            request.schema.name, llm_response.usage.input_tokens, llm_response.usage.output_tokens
        );

        Ok(llm_response)
    }
}

#[async_trait]
impl ModelBackend for LlmClient {
    async fn invoke(&self, request: ModelRequest<'_>) -> Result<String, LlmError> {
        let response = self.call(request).await?;
        response
            .structured_payload(request.schema.name)
            .ok_or(LlmError::EmptyContent)
    }
}

fn build_request<'a>(request: &ModelRequest<'a>) -> AnthropicRequest<'a> {
    AnthropicRequest {
        model: MODEL,
        max_tokens: MAX_TOKENS,
        system: request.system,
        messages: vec![AnthropicMessage {
            role: "user",
            content: request.prompt,
        }],
        tools: vec![AnthropicTool {
            name: request.schema.name,
            description: request.schema.description,
            input_schema: request.schema.to_json_schema(),
        }],
        tool_choice: ToolChoice {
            choice_type: "tool",
            name: request.schema.name,
        },
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub(crate) fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::schema::{FieldKind, FieldSpec};

    static NOTE: SchemaDescriptor = SchemaDescriptor {
        name: "note",
        description: "A short note.",
        fields: &[FieldSpec::new("body", FieldKind::Text, "The note body.")],
    };

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_request_forces_schema_tool() {
        let request = ModelRequest {
            system: "sys",
            prompt: "write a note",
            schema: &NOTE,
        };
        let body = serde_json::to_value(build_request(&request)).unwrap();

        assert_eq!(body["model"], MODEL);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "write a note");
        assert_eq!(body["tools"][0]["name"], "note");
        assert_eq!(body["tools"][0]["input_schema"]["required"][0], "body");
        assert_eq!(body["tool_choice"]["type"], "tool");
        assert_eq!(body["tool_choice"]["name"], "note");
    }

    #[test]
    fn test_structured_payload_prefers_tool_input() {
        let json = r#"{
            "content": [
                {"type": "text", "text": "Here you go"},
                {"type": "tool_use", "id": "toolu_1", "name": "note", "input": {"body": "hi"}}
            ],
            "usage": {"input_tokens": 10, "output_tokens": 4}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.structured_payload("note").as_deref(),
            Some(r#"{"body":"hi"}"#)
        );
    }

    #[test]
    fn test_structured_payload_falls_back_to_text() {
        let json = r#"{
            "content": [{"type": "text", "text": "{\"body\": \"hi\"}"}],
            "usage": {"input_tokens": 10, "output_tokens": 4}
        }"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.structured_payload("note").as_deref(),
            Some(r#"{"body": "hi"}"#)
        );
    }

    #[test]
    fn test_structured_payload_empty_content() {
        let json = r#"{"content": [], "usage": {"input_tokens": 1, "output_tokens": 0}}"#;
        let response: LlmResponse = serde_json::from_str(json).unwrap();
        assert!(response.structured_payload("note").is_none());
    }
}
