//! Scripted in-process model backend for tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use crate::llm_client::structured::StructuredClient;
use crate::llm_client::{LlmError, ModelBackend, ModelRequest};

enum Reply {
    Payload(String),
    ApiFailure { status: u16, message: String },
    Stall,
}

/// Answers every call the same way and records what it was asked.
pub struct ScriptedBackend {
    reply: Reply,
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub system: String,
    pub prompt: String,
    pub schema: &'static str,
}

impl ScriptedBackend {
    pub fn replying(payload: impl Into<String>) -> Arc<Self> {
        Self::with(Reply::Payload(payload.into()))
    }

    pub fn failing(status: u16, message: &str) -> Arc<Self> {
        Self::with(Reply::ApiFailure {
            status,
            message: message.to_string(),
        })
    }

    /// Never answers within any reasonable timeout.
    pub fn stalling() -> Arc<Self> {
        Self::with(Reply::Stall)
    }

    fn with(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn client(self: &Arc<Self>) -> StructuredClient {
        StructuredClient::new(self.clone(), Duration::from_secs(5))
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn invoke(&self, request: ModelRequest<'_>) -> Result<String, LlmError> {
        self.calls.lock().unwrap().push(RecordedCall {
            system: request.system.to_string(),
            prompt: request.prompt.to_string(),
            schema: request.schema.name,
        });

        match &self.reply {
            Reply::Payload(payload) => Ok(payload.clone()),
            Reply::ApiFailure { status, message } => Err(LlmError::Api {
                status: *status,
                message: message.clone(),
            }),
            Reply::Stall => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Err(LlmError::EmptyContent)
            }
        }
    }
}
