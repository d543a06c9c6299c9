//! Axum route handlers for the catalog API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog::models::{
    Assessment, AssessmentDraft, Candidate, DashboardSummary, Job, StageDirection,
};
use crate::errors::AppError;
use crate::extractors::ValidJson;
use crate::flows::candidate_ranking::{rank, RankingRequest};
use crate::flows::job_import::{extract, ExtractionRequest, ExtractionResult};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct JobSearchQuery {
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateFilter {
    pub job_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MoveCandidateRequest {
    pub direction: StageDirection,
}

#[derive(Debug, Serialize)]
pub struct CandidateMatch {
    /// 1-based position in the model's ranking.
    pub rank: usize,
    pub candidate: Candidate,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionsResponse {
    pub job_id: String,
    pub reasoning: String,
    pub ranked_candidate_ids: Vec<String>,
    pub matches: Vec<CandidateMatch>,
}

// ────────────────────────────────────────────────────────────────────────────
// Jobs
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/jobs?q=
pub async fn handle_list_jobs(
    State(state): State<AppState>,
    Query(query): Query<JobSearchQuery>,
) -> Json<Vec<Job>> {
    Json(state.catalog.list_jobs(query.q.as_deref()).await)
}

/// GET /api/v1/jobs/:id
pub async fn handle_get_job(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<Job>, AppError> {
    Ok(Json(state.catalog.get_job(&job_id).await?))
}

/// POST /api/v1/jobs/import
///
/// Extracts a listing from pasted text for the recruiter to review.
/// Nothing is stored until the reviewed listing is posted to /api/v1/jobs.
pub async fn handle_import_preview(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<ExtractionRequest>,
) -> Result<Json<ExtractionResult>, AppError> {
    Ok(Json(extract(&request, &state.llm).await?))
}

/// POST /api/v1/jobs
pub async fn handle_create_job(
    State(state): State<AppState>,
    ValidJson(listing): ValidJson<ExtractionResult>,
) -> (StatusCode, Json<Job>) {
    let job = state.catalog.create_job_from_import(&listing).await;
    (StatusCode::CREATED, Json(job))
}

/// POST /api/v1/jobs/:id/suggestions
///
/// Ranks every candidate in the catalog against the job and resolves the
/// ranked ids back to candidate records.
pub async fn handle_suggest_candidates(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<SuggestionsResponse>, AppError> {
    let job = state.catalog.get_job(&job_id).await?;

    let request = RankingRequest {
        target_description: format!("{}: {}", job.title, job.description),
        candidate_profiles: state.catalog.candidate_profiles().await,
    };
    let ranking = rank(&request, &state.llm).await?;

    let matches: Vec<CandidateMatch> = state
        .catalog
        .resolve_ranked(&ranking.ranked_candidate_ids)
        .await
        .into_iter()
        .enumerate()
        .map(|(index, candidate)| CandidateMatch {
            rank: index + 1,
            candidate,
        })
        .collect();

    info!("Suggested {} candidates for job {}", matches.len(), job.id);

    Ok(Json(SuggestionsResponse {
        job_id: job.id,
        reasoning: ranking.reasoning,
        ranked_candidate_ids: ranking.ranked_candidate_ids,
        matches,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Candidates
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/candidates?jobId=
pub async fn handle_list_candidates(
    State(state): State<AppState>,
    Query(filter): Query<CandidateFilter>,
) -> Json<Vec<Candidate>> {
    Json(state.catalog.list_candidates(filter.job_id.as_deref()).await)
}

/// POST /api/v1/candidates/:id/move
pub async fn handle_move_candidate(
    State(state): State<AppState>,
    Path(candidate_id): Path<String>,
    ValidJson(request): ValidJson<MoveCandidateRequest>,
) -> Result<Json<Candidate>, AppError> {
    Ok(Json(
        state
            .catalog
            .move_candidate(&candidate_id, request.direction)
            .await?,
    ))
}

// ────────────────────────────────────────────────────────────────────────────
// Assessments & dashboard
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/assessments
pub async fn handle_list_assessments(State(state): State<AppState>) -> Json<Vec<Assessment>> {
    Json(state.catalog.list_assessments().await)
}

/// POST /api/v1/assessments
pub async fn handle_create_assessment(
    State(state): State<AppState>,
    ValidJson(draft): ValidJson<AssessmentDraft>,
) -> Result<(StatusCode, Json<Assessment>), AppError> {
    let assessment = state.catalog.create_assessment(draft).await?;
    Ok((StatusCode::CREATED, Json(assessment)))
}

/// GET /api/v1/assessments/:id
pub async fn handle_get_assessment(
    State(state): State<AppState>,
    Path(assessment_id): Path<String>,
) -> Result<Json<Assessment>, AppError> {
    Ok(Json(state.catalog.get_assessment(&assessment_id).await?))
}

/// GET /api/v1/dashboard
pub async fn handle_dashboard(State(state): State<AppState>) -> Json<DashboardSummary> {
    Json(state.catalog.dashboard_summary().await)
}
