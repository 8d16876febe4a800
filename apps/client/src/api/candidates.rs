use reqwest::Method;
use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::candidate::{
    Candidate, CandidateList, CandidateStatistics, CandidateStatus, InterviewRequest, StatusEmail,
    StatusUpdate,
};
use crate::models::RecordId;

pub const MY_CANDIDATES_PATH: &str = "/candidates/my-candidates";
pub const CANDIDATE_STATISTICS_PATH: &str = "/candidates/statistics";
pub const UPDATE_STATUS_PATH: &str = "/candidates/updateStatus";
pub const SCHEDULE_INTERVIEW_PATH: &str = "/candidates/schedule-interview";

impl ApiClient {
    pub async fn my_candidates(&self) -> Result<Vec<Candidate>, ClientError> {
        let list: CandidateList = self.get_json(MY_CANDIDATES_PATH).await?;
        Ok(list.candidates)
    }

    pub async fn candidate_statistics(&self) -> Result<CandidateStatistics, ClientError> {
        self.get_json(CANDIDATE_STATISTICS_PATH).await
    }

    pub async fn candidate_detail(&self, candidate_id: &RecordId) -> Result<Value, ClientError> {
        self.get_json(&format!("/candidates/{candidate_id}")).await
    }

    /// Moves a candidate through the pipeline. The email details are sent
    /// only for statuses that notify the candidate.
    pub async fn update_candidate_status(
        &self,
        candidate_id: &RecordId,
        status: CandidateStatus,
        email: Option<&StatusEmail>,
    ) -> Result<Value, ClientError> {
        let update = StatusUpdate {
            candidate_id,
            status,
            email: email.filter(|_| status.notifies_candidate()),
        };
        self.with_body(Method::PATCH, UPDATE_STATUS_PATH, &update).await
    }

    pub async fn schedule_interview(
        &self,
        candidate_id: &RecordId,
        interview: &InterviewRequest,
    ) -> Result<Value, ClientError> {
        let mut body = serde_json::to_value(interview)?;
        if let Value::Object(map) = &mut body {
            map.insert("candidate_id".into(), json!(candidate_id));
        }
        self.post_json(SCHEDULE_INTERVIEW_PATH, &body).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::test_support::signed_in;
    use crate::models::candidate::InterviewType;
    use crate::models::user::Role;

    fn email() -> StatusEmail {
        StatusEmail {
            candidate_email: "c@x.io".into(),
            candidate_name: "Cam".into(),
            job_title: "SRE".into(),
            company: "Acme".into(),
            additional_notes: Some("Welcome aboard".into()),
        }
    }

    #[tokio::test]
    async fn test_status_email_dropped_for_non_notifying_status() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/candidates/updateStatus"))
            .and(body_json(json!({"candidate_id": 7, "status": "under_review"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::Recruiter);
        api.update_candidate_status(&RecordId::Int(7), CandidateStatus::UnderReview, Some(&email()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_hired_status_carries_email() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/candidates/updateStatus"))
            .and(body_json(json!({
                "candidate_id": 7,
                "status": "hired",
                "candidate_email": "c@x.io",
                "candidate_name": "Cam",
                "job_title": "SRE",
                "company": "Acme",
                "additional_notes": "Welcome aboard"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .expect(1)
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::Recruiter);
        api.update_candidate_status(&RecordId::Int(7), CandidateStatus::Hired, Some(&email()))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_schedule_interview_merges_candidate_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/candidates/schedule-interview"))
            .and(body_json(json!({
                "candidate_id": "c-1",
                "interview_date": "2026-11-02",
                "interview_time": "10:30",
                "interview_type": "video"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"scheduled": true})))
            .expect(1)
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::Recruiter);
        let interview = InterviewRequest {
            interview_date: "2026-11-02".into(),
            interview_time: "10:30".into(),
            interview_type: InterviewType::Video,
            ..Default::default()
        };
        api.schedule_interview(&RecordId::from("c-1"), &interview).await.unwrap();
    }

    #[tokio::test]
    async fn test_candidate_detail_path_uses_id() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/candidates/42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "Ana"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::Recruiter);
        let detail = api.candidate_detail(&RecordId::Int(42)).await.unwrap();
        assert_eq!(detail["name"], "Ana");
    }
}
