use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::matches::{ExplanationRequest, Match, MatchExplanation, MatchList};
use crate::models::RecordId;

pub const MATCHES_PATH: &str = "/matches/getMatches";
pub const MATCH_EXPLANATION_PATH: &str = "/matches/getDetailedMatches";

/// Where a job came from when the match does not say.
pub const DEFAULT_JOB_SOURCE: &str = "jobs";

impl ApiClient {
    pub async fn matches(&self) -> Result<Vec<Match>, ClientError> {
        let list: MatchList = self.get_json(MATCHES_PATH).await?;
        Ok(list.matches)
    }

    pub async fn match_explanation(
        &self,
        resume_id: &RecordId,
        job_id: &RecordId,
        job_source: Option<&str>,
    ) -> Result<MatchExplanation, ClientError> {
        let request = ExplanationRequest {
            resume_id,
            job_id,
            job_source: job_source.unwrap_or(DEFAULT_JOB_SOURCE),
        };
        self.post_json(MATCH_EXPLANATION_PATH, &request).await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::test_support::signed_in;
    use crate::models::user::Role;

    #[tokio::test]
    async fn test_explanation_defaults_job_source() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/matches/getDetailedMatches"))
            .and(body_json(json!({"resume_id": 3, "job_id": "j9", "job_source": "jobs"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "job_title": "SRE",
                "resume_skills": ["Go", "rust"],
                "job_skills": ["Rust", "K8s"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::Recruiter);
        let explanation = api
            .match_explanation(&RecordId::Int(3), &RecordId::from("j9"), None)
            .await
            .unwrap();
        assert_eq!(explanation.job_title.as_deref(), Some("SRE"));
        assert_eq!(explanation.job_skills.len(), 2);
    }

    #[tokio::test]
    async fn test_matches_failure_maps_to_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/matches/getMatches"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::Recruiter);
        let err = api.matches().await.unwrap_err();
        assert!(matches!(err, ClientError::Api { message: None, .. }));
        assert_eq!(err.display_message("Failed to fetch matches"), "Failed to fetch matches");
    }
}
