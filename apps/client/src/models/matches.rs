use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RecordId;

/// A resume/job pairing scored by the backend.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Match {
    #[serde(default)]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub match_id: Option<RecordId>,
    #[serde(default)]
    pub resume_id: Option<RecordId>,
    #[serde(default)]
    pub job_id: Option<RecordId>,
    #[serde(default)]
    pub job_source: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub final_score: Option<f64>,
    #[serde(default)]
    pub skill_score: Option<f64>,
    #[serde(default)]
    pub experience_score: Option<f64>,
    #[serde(default)]
    pub education_score: Option<f64>,
    #[serde(default)]
    pub bert_score: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchList {
    #[serde(default)]
    pub matches: Vec<Match>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExplanationRequest<'a> {
    pub resume_id: &'a RecordId,
    pub job_id: &'a RecordId,
    pub job_source: &'a str,
}

/// `/matches/getDetailedMatches` payload. Score breakdown is kept loose.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchExplanation {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub scores: Value,
    #[serde(default)]
    pub resume_skills: Vec<String>,
    #[serde(default)]
    pub job_skills: Vec<String>,
    #[serde(default)]
    pub resume_experience: Value,
    #[serde(default)]
    pub job_experience: Value,
    #[serde(default)]
    pub resume_education: Value,
    #[serde(default)]
    pub job_education: Value,
}
