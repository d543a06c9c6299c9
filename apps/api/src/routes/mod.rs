pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::catalog::handlers as catalog;
use crate::flows::handlers as flows;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Flows
        .route("/api/v1/flows/extract", post(flows::handle_extract))
        .route("/api/v1/flows/rank", post(flows::handle_rank))
        // Jobs
        .route(
            "/api/v1/jobs",
            get(catalog::handle_list_jobs).post(catalog::handle_create_job),
        )
        .route("/api/v1/jobs/import", post(catalog::handle_import_preview))
        .route("/api/v1/jobs/:id", get(catalog::handle_get_job))
        .route(
            "/api/v1/jobs/:id/suggestions",
            post(catalog::handle_suggest_candidates),
        )
        // Candidates
        .route("/api/v1/candidates", get(catalog::handle_list_candidates))
        .route(
            "/api/v1/candidates/:id/move",
            post(catalog::handle_move_candidate),
        )
        // Assessments
        .route(
            "/api/v1/assessments",
            get(catalog::handle_list_assessments).post(catalog::handle_create_assessment),
        )
        .route(
            "/api/v1/assessments/:id",
            get(catalog::handle_get_assessment),
        )
        .route("/api/v1/dashboard", get(catalog::handle_dashboard))
        .with_state(state)
}
