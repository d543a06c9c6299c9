//! Axum route handlers exposing the two flows directly.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::extractors::ValidJson;
use crate::flows::candidate_ranking::{rank, RankingRequest, RankingResult};
use crate::flows::job_import::{extract, ExtractionRequest, ExtractionResult};
use crate::state::AppState;

/// POST /api/v1/flows/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<ExtractionRequest>,
) -> Result<Json<ExtractionResult>, AppError> {
    Ok(Json(extract(&request, &state.llm).await?))
}

/// POST /api/v1/flows/rank
pub async fn handle_rank(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<RankingRequest>,
) -> Result<Json<RankingResult>, AppError> {
    Ok(Json(rank(&request, &state.llm).await?))
}
