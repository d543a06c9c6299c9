//! Schema-constrained invoke: the one routine both flows share.
//!
//! Send a rendered prompt plus a schema, bound the call by a timeout, then
//! parse and validate the payload before deserializing it. Any shape problem
//! is a `SchemaMismatch`; nothing partially populated ever leaves this module.

use std::sync::Arc;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::llm_client::schema::SchemaDescriptor;
use crate::llm_client::{strip_json_fences, LlmError, ModelBackend, ModelRequest};

/// Cheap to clone; shared by every handler through `AppState`.
#[derive(Clone)]
pub struct StructuredClient {
    backend: Arc<dyn ModelBackend>,
    timeout: Duration,
}

impl StructuredClient {
    pub fn new(backend: Arc<dyn ModelBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    /// Single attempt, single outcome: a validated `T` or a terminal error.
    pub async fn invoke<T: DeserializeOwned>(
        &self,
        prompt: &str,
        system: &str,
        schema: &'static SchemaDescriptor,
    ) -> Result<T, AppError> {
        let request = ModelRequest {
            system,
            prompt,
            schema,
        };

        let raw = tokio::time::timeout(self.timeout, self.backend.invoke(request))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;

        parse_structured(&raw, schema)
    }
}

/// Parses a raw model payload against `schema`.
pub fn parse_structured<T: DeserializeOwned>(
    raw: &str,
    schema: &'static SchemaDescriptor,
) -> Result<T, AppError> {
    let text = strip_json_fences(raw);

    let value: Value = serde_json::from_str(text)
        .map_err(|e| mismatch(schema, format!("response is not valid JSON: {e}")))?;

    schema
        .validate(&value)
        .map_err(|violation| mismatch(schema, violation.to_string()))?;

    serde_json::from_value(value).map_err(|e| mismatch(schema, e.to_string()))
}

fn mismatch(schema: &'static SchemaDescriptor, reason: String) -> AppError {
    warn!("Model output rejected by schema '{}': {}", schema.name, reason);
    AppError::SchemaMismatch {
        schema: schema.name,
        reason,
    }
}
