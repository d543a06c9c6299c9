//! In-memory catalog of jobs, candidates and assessments.
//!
//! Process-local state behind one async `RwLock`, seeded from fixtures at
//! startup. Reads clone out of the lock; nothing holds it across an await.

use std::collections::HashSet;

use chrono::Utc;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::catalog::fixtures::{seed_assessments, seed_candidates, seed_jobs};
use crate::catalog::models::{
    Assessment, AssessmentDraft, Candidate, DashboardSummary, HiringStage, Job, JobStatus,
    Question, QuestionType, StageDirection,
};
use crate::errors::AppError;
use crate::flows::candidate_ranking::{normalize_candidate_id, ID_PREFIX};
use crate::flows::job_import::ExtractionResult;

const UNTITLED_JOB: &str = "Untitled Job";

#[derive(Debug, Default)]
struct CatalogData {
    jobs: Vec<Job>,
    candidates: Vec<Candidate>,
    assessments: Vec<Assessment>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    data: RwLock<CatalogData>,
}

impl Catalog {
    pub fn new(jobs: Vec<Job>, candidates: Vec<Candidate>, assessments: Vec<Assessment>) -> Self {
        Self {
            data: RwLock::new(CatalogData {
                jobs,
                candidates,
                assessments,
            }),
        }
    }

    pub fn seeded() -> Self {
        Self::new(seed_jobs(), seed_candidates(), seed_assessments())
    }

    // ── Jobs ────────────────────────────────────────────────────────────────

    /// Jobs in board order, optionally filtered by a case-insensitive match
    /// on the title or any tag.
    pub async fn list_jobs(&self, query: Option<&str>) -> Vec<Job> {
        let data = self.data.read().await;
        let needle = query
            .map(|q| q.trim().to_lowercase())
            .filter(|q| !q.is_empty());

        match needle {
            None => data.jobs.clone(),
            Some(needle) => data
                .jobs
                .iter()
                .filter(|job| {
                    job.title.to_lowercase().contains(&needle)
                        || job.tags.iter().any(|t| t.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect(),
        }
    }

    pub async fn get_job(&self, id: &str) -> Result<Job, AppError> {
        self.data
            .read()
            .await
            .jobs
            .iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Job {id} not found")))
    }

    /// Turns a confirmed import into an open job at the top of the board.
    pub async fn create_job_from_import(&self, listing: &ExtractionResult) -> Job {
        let mut data = self.data.write().await;

        let title = listing.title.trim();
        let job = Job {
            id: format!("job-{}", Uuid::new_v4()),
            title: if title.is_empty() {
                UNTITLED_JOB.to_string()
            } else {
                title.to_string()
            },
            description: listing.description.clone(),
            status: JobStatus::Open,
            tags: split_tags(&listing.requirements),
            order: data.jobs.len() as u32 + 1,
            imported_at: Some(Utc::now()),
        };

        data.jobs.insert(0, job.clone());
        info!("Created job {} from imported listing", job.id);
        job
    }

    // ── Candidates ──────────────────────────────────────────────────────────

    pub async fn list_candidates(&self, job_id: Option<&str>) -> Vec<Candidate> {
        let data = self.data.read().await;
        data.candidates
            .iter()
            .filter(|c| job_id.map_or(true, |id| c.job_id == id))
            .cloned()
            .collect()
    }

    pub async fn move_candidate(
        &self,
        id: &str,
        direction: StageDirection,
    ) -> Result<Candidate, AppError> {
        let mut data = self.data.write().await;
        let candidate = data
            .candidates
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Candidate {id} not found")))?;

        let from = candidate.stage;
        candidate.stage = from.step(direction);
        info!(
            "Candidate {} moved {:?} -> {:?}",
            candidate.id, from, candidate.stage
        );
        Ok(candidate.clone())
    }

    /// Every candidate as a ranking profile line, in catalog order.
    pub async fn candidate_profiles(&self) -> Vec<String> {
        self.data
            .read()
            .await
            .candidates
            .iter()
            .map(|c| format!("{ID_PREFIX} {}: {}", c.id, c.profile))
            .collect()
    }

    /// Maps ranked ids back to candidates, keeping rank order. Unknown and
    /// repeated ids are skipped.
    pub async fn resolve_ranked(&self, ranked_ids: &[String]) -> Vec<Candidate> {
        let data = self.data.read().await;
        let mut seen = HashSet::new();

        ranked_ids
            .iter()
            .map(|raw| normalize_candidate_id(raw))
            .filter(|id| seen.insert(*id))
            .filter_map(|id| data.candidates.iter().find(|c| c.id == id).cloned())
            .collect()
    }

    // ── Assessments ─────────────────────────────────────────────────────────

    pub async fn list_assessments(&self) -> Vec<Assessment> {
        self.data.read().await.assessments.clone()
    }

    pub async fn get_assessment(&self, id: &str) -> Result<Assessment, AppError> {
        self.data
            .read()
            .await
            .assessments
            .iter()
            .find(|a| a.id == id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Assessment {id} not found")))
    }

    pub async fn create_assessment(&self, draft: AssessmentDraft) -> Result<Assessment, AppError> {
        let assessment = build_assessment(draft)?;
        self.data
            .write()
            .await
            .assessments
            .push(assessment.clone());
        info!(
            "Created assessment {} with {} questions",
            assessment.id,
            assessment.questions.len()
        );
        Ok(assessment)
    }

    // ── Dashboard ───────────────────────────────────────────────────────────

    pub async fn dashboard_summary(&self) -> DashboardSummary {
        let data = self.data.read().await;
        DashboardSummary {
            open_positions: data
                .jobs
                .iter()
                .filter(|j| j.status == JobStatus::Open)
                .count(),
            active_candidates: data.candidates.iter().filter(|c| c.stage.is_active()).count(),
            hired: data
                .candidates
                .iter()
                .filter(|c| c.stage == HiringStage::Hired)
                .count(),
            assessments: data.assessments.len(),
        }
    }
}

fn split_tags(requirements: &str) -> Vec<String> {
    requirements
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn build_assessment(draft: AssessmentDraft) -> Result<Assessment, AppError> {
    let title = draft.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation(
            "Assessment title cannot be empty".to_string(),
        ));
    }

    let mut questions = Vec::with_capacity(draft.questions.len());
    for (index, question) in draft.questions.into_iter().enumerate() {
        let number = index + 1;
        let text = question.text.trim();
        if text.is_empty() {
            return Err(AppError::Validation(format!("Question {number} has no text")));
        }

        let options = match question.question_type {
            QuestionType::MultipleChoice => {
                let options: Vec<String> = question
                    .options
                    .unwrap_or_default()
                    .iter()
                    .map(|o| o.trim())
                    .filter(|o| !o.is_empty())
                    .map(str::to_string)
                    .collect();
                if options.len() < 2 {
                    return Err(AppError::Validation(format!(
                        "Question {number} is multiple choice and needs at least two options"
                    )));
                }
                Some(options)
            }
            QuestionType::Text | QuestionType::Code => None,
        };

        questions.push(Question {
            id: format!("q-{}", Uuid::new_v4()),
            question_type: question.question_type,
            text: text.to_string(),
            options,
        });
    }

    Ok(Assessment {
        id: format!("asmt-{}", Uuid::new_v4()),
        title: title.to_string(),
        description: draft.description.trim().to_string(),
        questions,
    })
}
