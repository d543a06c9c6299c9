// In-memory recruiting catalog: jobs, the candidate pipeline, and assessments.
// Also wires the extraction and ranking flows into job import and sourcing.

pub mod fixtures;
pub mod handlers;
pub mod models;
pub mod store;
