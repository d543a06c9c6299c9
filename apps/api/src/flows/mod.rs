// Schema-constrained LLM flows: job-listing extraction and candidate ranking.
// All model calls go through llm_client::structured, never to a provider directly.

use serde::Serialize;

use crate::errors::AppError;
use crate::llm_client::schema::SchemaDescriptor;

pub mod candidate_ranking;
pub mod handlers;
pub mod job_import;
pub mod prompts;

/// Checks a flow request against its request-shape descriptor.
/// Any violation is the caller's fault and surfaces as `AppError::Validation`.
pub(crate) fn validate_request<T: Serialize>(
    request: &T,
    schema: &SchemaDescriptor,
) -> Result<(), AppError> {
    let value = serde_json::to_value(request).map_err(|e| AppError::Internal(e.into()))?;
    schema
        .validate(&value)
        .map_err(|violation| AppError::Validation(format!("{}: {violation}", schema.name)))
}
