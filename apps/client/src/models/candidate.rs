use std::fmt;

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Pipeline stage of a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    #[default]
    Available,
    UnderReview,
    InterviewScheduled,
    Hired,
    Rejected,
}

impl CandidateStatus {
    pub const ALL: [CandidateStatus; 5] = [
        CandidateStatus::Available,
        CandidateStatus::UnderReview,
        CandidateStatus::InterviewScheduled,
        CandidateStatus::Hired,
        CandidateStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CandidateStatus::Available => "available",
            CandidateStatus::UnderReview => "under_review",
            CandidateStatus::InterviewScheduled => "interview_scheduled",
            CandidateStatus::Hired => "hired",
            CandidateStatus::Rejected => "rejected",
        }
    }

    /// Hired and rejected candidates get a notification email.
    pub fn notifies_candidate(self) -> bool {
        matches!(self, CandidateStatus::Hired | CandidateStatus::Rejected)
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|st| st.as_str() == s.trim())
    }
}

impl fmt::Display for CandidateStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Candidate {
    pub candidate_id: RecordId,
    #[serde(default)]
    pub match_id: Option<RecordId>,
    #[serde(default)]
    pub user_id: Option<RecordId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub final_score: Option<f64>,
    #[serde(default)]
    pub status: CandidateStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateList {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CandidateStatistics {
    #[serde(default)]
    pub total_candidates: u32,
    #[serde(default)]
    pub available: u32,
    #[serde(default)]
    pub under_review: u32,
    #[serde(default)]
    pub interview_scheduled: u32,
    #[serde(default)]
    pub hired: u32,
    #[serde(default)]
    pub average_match_score: Option<f64>,
}

/// Email details attached to a hired/rejected transition.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusEmail {
    pub candidate_email: String,
    pub candidate_name: String,
    pub job_title: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate<'a> {
    pub candidate_id: &'a RecordId,
    pub status: CandidateStatus,
    #[serde(flatten)]
    pub email: Option<&'a StatusEmail>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewType {
    #[default]
    Video,
    Phone,
    InPerson,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct InterviewRequest {
    pub interview_date: String,
    pub interview_time: String,
    pub interview_type: InterviewType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meeting_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_snake_case() {
        let st: CandidateStatus = serde_json::from_str(r#""interview_scheduled""#).unwrap();
        assert_eq!(st, CandidateStatus::InterviewScheduled);
        assert_eq!(CandidateStatus::parse("under_review"), Some(CandidateStatus::UnderReview));
        assert_eq!(CandidateStatus::parse("archived"), None);
    }

    #[test]
    fn test_status_update_without_email_has_two_fields() {
        let id = RecordId::Int(9);
        let update = StatusUpdate {
            candidate_id: &id,
            status: CandidateStatus::UnderReview,
            email: None,
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"candidate_id": 9, "status": "under_review"}));
    }

    #[test]
    fn test_status_update_flattens_email_fields() {
        let id = RecordId::Int(9);
        let email = StatusEmail {
            candidate_email: "c@x.io".into(),
            candidate_name: "Cam".into(),
            job_title: "SRE".into(),
            company: "Acme".into(),
            additional_notes: None,
        };
        let update = StatusUpdate {
            candidate_id: &id,
            status: CandidateStatus::Hired,
            email: Some(&email),
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value["candidate_email"], "c@x.io");
        assert_eq!(value["status"], "hired");
        assert!(value.get("additional_notes").is_none());
    }
}
