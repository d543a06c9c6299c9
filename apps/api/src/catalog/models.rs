use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobStatus {
    Open,
    Interviewing,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: String,
    pub title: String,
    pub description: String,
    pub status: JobStatus,
    pub tags: Vec<String>,
    pub order: u32,
    /// Set for jobs created from an imported listing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imported_at: Option<DateTime<Utc>>,
}

/// Hiring pipeline, in board order. `Rejected` sits at the far end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiringStage {
    Applied,
    Screening,
    #[serde(rename = "Technical Interview")]
    TechnicalInterview,
    Offer,
    Hired,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageDirection {
    Forward,
    Back,
}

impl HiringStage {
    pub const PIPELINE: [HiringStage; 6] = [
        HiringStage::Applied,
        HiringStage::Screening,
        HiringStage::TechnicalInterview,
        HiringStage::Offer,
        HiringStage::Hired,
        HiringStage::Rejected,
    ];

    /// Moves one column along the board, staying put at either end.
    pub fn step(self, direction: StageDirection) -> Self {
        let index = Self::PIPELINE
            .iter()
            .position(|stage| *stage == self)
            .unwrap_or_default();
        let next = match direction {
            StageDirection::Forward => (index + 1).min(Self::PIPELINE.len() - 1),
            StageDirection::Back => index.saturating_sub(1),
        };
        Self::PIPELINE[next]
    }

    /// Still in the running: neither hired nor rejected.
    pub fn is_active(self) -> bool {
        !matches!(self, HiringStage::Hired | HiringStage::Rejected)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub avatar_url: String,
    pub stage: HiringStage,
    pub profile: String,
    pub job_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QuestionType {
    MultipleChoice,
    Text,
    Code,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub id: String,
    pub title: String,
    pub description: String,
    pub questions: Vec<Question>,
}

/// An assessment as submitted by the builder, before ids are assigned.
#[derive(Debug, Clone, Deserialize)]
pub struct AssessmentDraft {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub questions: Vec<QuestionDraft>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuestionDraft {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: String,
    #[serde(default)]
    pub options: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub open_positions: usize,
    pub active_candidates: usize,
    pub hired: usize,
    pub assessments: usize,
}
