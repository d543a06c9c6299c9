//! Job import: extracts a structured listing from pasted job-board text.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::flows::prompts::{render_extraction_prompt, EXTRACTION_ROLE};
use crate::flows::validate_request;
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::schema::{FieldKind, FieldSpec, SchemaDescriptor};
use crate::llm_client::structured::StructuredClient;

/// Raw listing text as pasted by a recruiter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionRequest {
    pub listing_text: String,
}

/// The seven fields pulled out of a listing. Missing information is an empty
/// string, never null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResult {
    pub title: String,
    pub description: String,
    pub company: String,
    pub location: String,
    pub salary: String,
    pub requirements: String,
    pub application_instructions: String,
}

pub static EXTRACTION_REQUEST_SCHEMA: SchemaDescriptor = SchemaDescriptor {
    name: "extraction_request",
    description: "A job listing to import.",
    fields: &[FieldSpec::new(
        "listingText",
        FieldKind::NonEmptyText,
        "The text content of a job listing from an external job site.",
    )],
};

pub static JOB_LISTING_SCHEMA: SchemaDescriptor = SchemaDescriptor {
    name: "job_listing",
    description: "Structured fields extracted from a job listing.",
    fields: &[
        FieldSpec::new("title", FieldKind::Text, "The title of the job listing."),
        FieldSpec::new("description", FieldKind::Text, "A detailed description of the job."),
        FieldSpec::new("company", FieldKind::Text, "The name of the company offering the job."),
        FieldSpec::new(
            "location",
            FieldKind::Text,
            "The location of the job (e.g., city, state).",
        ),
        FieldSpec::new(
            "salary",
            FieldKind::Text,
            "The salary range or compensation details, if provided.",
        ),
        FieldSpec::new(
            "requirements",
            FieldKind::Text,
            "The key skills and qualifications required for the job.",
        ),
        FieldSpec::new(
            "applicationInstructions",
            FieldKind::Text,
            "Instructions on how to apply for the job.",
        ),
    ],
};

/// Extracts a structured listing from raw text with a single model call.
pub async fn extract(
    request: &ExtractionRequest,
    llm: &StructuredClient,
) -> Result<ExtractionResult, AppError> {
    validate_request(request, &EXTRACTION_REQUEST_SCHEMA)?;

    info!("Extracting job listing ({} chars)", request.listing_text.len());

    let prompt = render_extraction_prompt(&request.listing_text);
    let result: ExtractionResult = llm
        .invoke(&prompt, &system_prompt(EXTRACTION_ROLE), &JOB_LISTING_SCHEMA)
        .await?;

    info!("Job listing extracted: title={:?}", result.title);
    Ok(result)
}
