use std::sync::Arc;

use crate::catalog::store::Catalog;
use crate::llm_client::structured::StructuredClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Schema-constrained model access shared by both flows.
    pub llm: StructuredClient,
    pub catalog: Arc<Catalog>,
}
