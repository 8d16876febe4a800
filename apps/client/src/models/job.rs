use serde::{Deserialize, Serialize};

use super::RecordId;

/// A job posting as listed by `/job/getAllJobs` and `/job/getJobsByCreator`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub id: RecordId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default, rename = "jobType")]
    pub job_type_legacy: Option<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience_level: Option<String>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub job_source: Option<String>,
}

impl Job {
    /// Bulk-uploaded jobs carry `job_title`, posted ones `title`.
    pub fn display_title(&self) -> Option<&str> {
        self.title.as_deref().or(self.job_title.as_deref())
    }

    pub fn kind(&self) -> Option<&str> {
        self.job_type.as_deref().or(self.job_type_legacy.as_deref())
    }
}

/// Body for `/job/postJob` and `/job/updateJob`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct JobPosting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    pub title: String,
    pub company: String,
    pub description: String,
    pub location: String,
    pub job_type: String,
    pub skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary_max: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobList {
    #[serde(default)]
    pub jobs: Vec<Job>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostedJobList {
    #[serde(default)]
    pub posted_jobs: Vec<Job>,
}

/// One entry of `/recommendation/getRecommendations`.
#[derive(Debug, Clone, Deserialize)]
pub struct Recommendation {
    #[serde(default)]
    pub match_id: Option<RecordId>,
    #[serde(default)]
    pub final_score: Option<f64>,
    pub job: Job,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationList {
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_reads_either_title_and_type_spelling() {
        let json = r#"{"id": 3, "job_title": "Rust Engineer", "jobType": "Full-time"}"#;
        let job: Job = serde_json::from_str(json).unwrap();
        assert_eq!(job.display_title(), Some("Rust Engineer"));
        assert_eq!(job.kind(), Some("Full-time"));
        assert!(job.skills.is_empty());
    }

    #[test]
    fn test_posting_omits_absent_optionals() {
        let posting = JobPosting {
            title: "Backend".into(),
            ..Default::default()
        };
        let value = serde_json::to_value(&posting).unwrap();
        assert!(value.get("id").is_none());
        assert!(value.get("salary_min").is_none());
        assert_eq!(value["title"], "Backend");
    }
}
