//! Candidate ranking: orders candidate profiles by relevance to a job.
//!
//! Profiles are opaque strings that start with an identifier, e.g.
//! `"ID 3: Staff engineer, 9 years of Rust"`. The model answers with
//! identifiers; every one of them must point back at a submitted profile.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::flows::prompts::{render_ranking_prompt, RANKING_ROLE};
use crate::flows::validate_request;
use crate::llm_client::prompts::system_prompt;
use crate::llm_client::schema::{FieldKind, FieldSpec, SchemaDescriptor};
use crate::llm_client::structured::StructuredClient;

/// Prefix the dashboard puts in front of candidate identifiers.
pub const ID_PREFIX: &str = "ID";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingRequest {
    pub target_description: String,
    pub candidate_profiles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingResult {
    /// Most relevant first, exactly as the model wrote them.
    pub ranked_candidate_ids: Vec<String>,
    pub reasoning: String,
}

pub static RANKING_REQUEST_SCHEMA: SchemaDescriptor = SchemaDescriptor {
    name: "ranking_request",
    description: "A job description and the candidate profiles to rank against it.",
    fields: &[
        FieldSpec::new(
            "targetDescription",
            FieldKind::NonEmptyText,
            "The detailed description of the job opening.",
        ),
        FieldSpec::new(
            "candidateProfiles",
            FieldKind::NonEmptyTextList,
            "Candidate profiles, each one string starting with the candidate identifier.",
        ),
    ],
};

pub static CANDIDATE_RANKING_SCHEMA: SchemaDescriptor = SchemaDescriptor {
    name: "candidate_ranking",
    description: "Candidates ranked by relevance to the job description.",
    fields: &[
        FieldSpec::new(
            "rankedCandidateIds",
            FieldKind::TextList,
            "Candidate identifiers, ranked by relevance to the job description.",
        ),
        FieldSpec::new(
            "reasoning",
            FieldKind::Text,
            "A detailed explanation of how the candidates were selected and ranked.",
        ),
    ],
};

/// Strips surrounding whitespace and an optional `ID ` prefix.
pub fn normalize_candidate_id(raw: &str) -> &str {
    let trimmed = raw.trim();
    match trimmed.strip_prefix(ID_PREFIX) {
        Some(rest) if rest.is_empty() || rest.starts_with(char::is_whitespace) => rest.trim(),
        _ => trimmed,
    }
}

/// The identifier embedded in a profile: everything before the first `:`.
pub fn candidate_identifier(profile: &str) -> Option<&str> {
    let (head, _) = profile.split_once(':')?;
    let id = normalize_candidate_id(head);
    (!id.is_empty()).then_some(id)
}

/// Ranks candidate profiles against a job description with a single model call.
pub async fn rank(
    request: &RankingRequest,
    llm: &StructuredClient,
) -> Result<RankingResult, AppError> {
    validate_request(request, &RANKING_REQUEST_SCHEMA)?;
    let known = profile_identifiers(&request.candidate_profiles)?;

    info!(
        "Ranking {} candidate profiles",
        request.candidate_profiles.len()
    );

    let prompt = render_ranking_prompt(&request.target_description, &request.candidate_profiles);
    let result: RankingResult = llm
        .invoke(&prompt, &system_prompt(RANKING_ROLE), &CANDIDATE_RANKING_SCHEMA)
        .await?;

    check_references(&result, &known)?;

    info!(
        "Ranking complete: {} of {} candidates suggested",
        result.ranked_candidate_ids.len(),
        known.len()
    );
    Ok(result)
}

fn profile_identifiers(profiles: &[String]) -> Result<HashSet<&str>, AppError> {
    let mut known = HashSet::with_capacity(profiles.len());

    for (index, profile) in profiles.iter().enumerate() {
        let id = candidate_identifier(profile).ok_or_else(|| {
            AppError::Validation(format!(
                "candidateProfiles[{index}] must start with an identifier such as 'ID 1:'"
            ))
        })?;
        if !known.insert(id) {
            return Err(AppError::Validation(format!(
                "candidateProfiles[{index}] repeats identifier '{id}'"
            )));
        }
    }

    Ok(known)
}

fn check_references(result: &RankingResult, known: &HashSet<&str>) -> Result<(), AppError> {
    let unknown: Vec<String> = result
        .ranked_candidate_ids
        .iter()
        .filter(|id| !known.contains(normalize_candidate_id(id)))
        .cloned()
        .collect();

    if unknown.is_empty() {
        Ok(())
    } else {
        Err(AppError::UnknownCandidateIds(unknown))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::mock::ScriptedBackend;
    use crate::llm_client::LlmError;

    const RANKING_RESPONSE: &str =
        r#"{"rankedCandidateIds":["ID 2","ID 1"],"reasoning":"Candidate 2 has shipped more Rust."}"#;

    fn request() -> RankingRequest {
        RankingRequest {
            target_description: "Senior Rust Engineer: Own our ingestion pipeline".to_string(),
            candidate_profiles: vec![
                "ID 1: Senior engineer".to_string(),
                "ID 2: Junior designer".to_string(),
            ],
        }
    }

    #[test]
    fn test_candidate_identifier_parsing() {
        assert_eq!(candidate_identifier("ID 1: Senior engineer"), Some("1"));
        assert_eq!(candidate_identifier("c-42: Designer"), Some("c-42"));
        assert_eq!(candidate_identifier("ID 7: Knows: Rust, Go"), Some("7"));
        assert_eq!(candidate_identifier("No identifier here"), None);
        assert_eq!(candidate_identifier("ID : blank id"), None);
    }

    #[test]
    fn test_normalize_candidate_id_accepts_prefixed_and_bare() {
        assert_eq!(normalize_candidate_id("ID 3"), "3");
        assert_eq!(normalize_candidate_id("  3 "), "3");
        assert_eq!(normalize_candidate_id("ID  3"), "3");
        assert_eq!(normalize_candidate_id("IDEA"), "IDEA");
    }

    #[tokio::test]
    async fn test_rank_returns_validated_result() {
        let backend = ScriptedBackend::replying(RANKING_RESPONSE);
        let result = rank(&request(), &backend.client()).await.unwrap();

        assert_eq!(result.ranked_candidate_ids, vec!["ID 2", "ID 1"]);
        assert_eq!(result.reasoning, "Candidate 2 has shipped more Rust.");
    }

    #[tokio::test]
    async fn test_rank_prompt_lists_profiles_in_input_order() {
        let backend = ScriptedBackend::replying(RANKING_RESPONSE);
        rank(&request(), &backend.client()).await.unwrap();

        let calls = backend.calls();
        assert_eq!(calls[0].schema, "candidate_ranking");
        let prompt = &calls[0].prompt;
        let first = prompt.find("- ID 1: Senior engineer").unwrap();
        let second = prompt.find("- ID 2: Junior designer").unwrap();
        assert!(first < second);
        assert!(prompt.contains("Senior Rust Engineer: Own our ingestion pipeline"));
    }

    #[tokio::test]
    async fn test_rank_rejects_empty_profiles() {
        let backend = ScriptedBackend::replying(RANKING_RESPONSE);
        let mut req = request();
        req.candidate_profiles.clear();

        let err = rank(&req, &backend.client()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rank_rejects_empty_target_description() {
        let backend = ScriptedBackend::replying(RANKING_RESPONSE);
        let mut req = request();
        req.target_description = "  ".to_string();

        let err = rank(&req, &backend.client()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_rank_rejects_profiles_without_or_with_duplicate_identifiers() {
        let backend = ScriptedBackend::replying(RANKING_RESPONSE);

        let mut missing = request();
        missing.candidate_profiles.push("Freelance illustrator".to_string());
        let err = rank(&missing, &backend.client()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("[2]")));

        let mut duplicate = request();
        duplicate.candidate_profiles.push("ID 1: Someone else".to_string());
        let err = rank(&duplicate, &backend.client()).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg.contains("repeats")));

        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_rank_missing_reasoning_is_schema_mismatch() {
        let backend = ScriptedBackend::replying(r#"{"rankedCandidateIds":["ID 1"]}"#);
        let err = rank(&request(), &backend.client()).await.unwrap_err();

        match err {
            AppError::SchemaMismatch { schema, reason } => {
                assert_eq!(schema, "candidate_ranking");
                assert!(reason.contains("reasoning"));
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rank_non_string_ids_is_schema_mismatch() {
        let backend =
            ScriptedBackend::replying(r#"{"rankedCandidateIds":[1, 2],"reasoning":"numbers"}"#);
        let err = rank(&request(), &backend.client()).await.unwrap_err();
        assert!(matches!(err, AppError::SchemaMismatch { .. }));
    }

    #[tokio::test]
    async fn test_rank_rejects_identifiers_outside_input_set() {
        let backend = ScriptedBackend::replying(
            r#"{"rankedCandidateIds":["ID 2","ID 9","4"],"reasoning":"made up"}"#,
        );
        let err = rank(&request(), &backend.client()).await.unwrap_err();

        match err {
            AppError::UnknownCandidateIds(ids) => assert_eq!(ids, vec!["ID 9", "4"]),
            other => panic!("expected unknown ids, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rank_accepts_bare_identifiers_and_empty_ranking() {
        let backend = ScriptedBackend::replying(r#"{"rankedCandidateIds":["1"],"reasoning":"ok"}"#);
        let result = rank(&request(), &backend.client()).await.unwrap();
        assert_eq!(result.ranked_candidate_ids, vec!["1"]);

        let backend = ScriptedBackend::replying(
            r#"{"rankedCandidateIds":[],"reasoning":"Nobody fits this role."}"#,
        );
        let result = rank(&request(), &backend.client()).await.unwrap();
        assert!(result.ranked_candidate_ids.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_rank_surfaces_timeout() {
        let backend = ScriptedBackend::stalling();
        let err = rank(&request(), &backend.client()).await.unwrap_err();
        assert!(matches!(err, AppError::ModelInvocation(LlmError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_rank_is_deterministic_under_deterministic_backend() {
        let backend = ScriptedBackend::replying(RANKING_RESPONSE);
        let client = backend.client();

        let first = rank(&request(), &client).await.unwrap();
        let second = rank(&request(), &client).await.unwrap();
        assert_eq!(first, second);
    }
}
