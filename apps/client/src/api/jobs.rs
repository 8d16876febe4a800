use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::Serialize;
use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::job::{Job, JobList, JobPosting, PostedJobList, Recommendation, RecommendationList};
use crate::models::RecordId;

pub const UPLOAD_JOB_PATH: &str = "/job/uploadJob";
pub const POST_JOB_PATH: &str = "/job/postJob";
pub const ALL_JOBS_PATH: &str = "/job/getAllJobs";
pub const JOBS_BY_CREATOR_PATH: &str = "/job/getJobsByCreator";
pub const UPDATE_JOB_PATH: &str = "/job/updateJob";
pub const APPLY_JOB_PATH: &str = "/recommendation/applyJob";
pub const SAVE_JOB_PATH: &str = "/recommendation/saveJob";
pub const SAVED_JOBS_PATH: &str = "/recommendation/getSavedJobs";
pub const RECOMMENDATIONS_PATH: &str = "/recommendation/getRecommendations";

pub const DEFAULT_RECOMMENDATIONS: u32 = 5;
pub const DEFAULT_SAVED_JOBS: u32 = 50;

#[derive(Serialize)]
struct MatchRef<'a> {
    match_id: &'a RecordId,
}

impl ApiClient {
    /// Bulk upload of a job file (multipart field `job`).
    pub async fn upload_job(&self, file_name: &str, contents: Vec<u8>) -> Result<Value, ClientError> {
        let form = Form::new().part("job", Part::bytes(contents).file_name(file_name.to_string()));
        self.send_json(self.request(Method::POST, UPLOAD_JOB_PATH)?.multipart(form))
            .await
    }

    pub async fn post_job(&self, posting: &JobPosting) -> Result<Value, ClientError> {
        self.post_json(POST_JOB_PATH, posting).await
    }

    pub async fn all_jobs(&self) -> Result<Vec<Job>, ClientError> {
        let list: JobList = self.get_json(ALL_JOBS_PATH).await?;
        Ok(list.jobs)
    }

    /// Jobs posted by the signed-in recruiter.
    pub async fn jobs_by_creator(&self) -> Result<Vec<Job>, ClientError> {
        let list: PostedJobList = self.get_json(JOBS_BY_CREATOR_PATH).await?;
        Ok(list.posted_jobs)
    }

    pub async fn update_job(&self, posting: &JobPosting) -> Result<Value, ClientError> {
        self.with_body(Method::PUT, UPDATE_JOB_PATH, posting).await
    }

    pub async fn apply_for_job(&self, match_id: &RecordId) -> Result<Value, ClientError> {
        self.post_json(APPLY_JOB_PATH, &MatchRef { match_id }).await
    }

    pub async fn save_job(&self, match_id: &RecordId) -> Result<Value, ClientError> {
        self.post_json(SAVE_JOB_PATH, &MatchRef { match_id }).await
    }

    pub async fn saved_jobs(&self, resume_id: &RecordId, top_n: u32) -> Result<Vec<Recommendation>, ClientError> {
        let body = json!({ "resume_id": resume_id, "top_n": top_n });
        let list: RecommendationList = self.post_json(SAVED_JOBS_PATH, &body).await?;
        Ok(list.recommendations)
    }

    pub async fn recommendations(&self, top_n: u32) -> Result<Vec<Recommendation>, ClientError> {
        let list: RecommendationList = self
            .post_json(RECOMMENDATIONS_PATH, &json!({ "top_n": top_n }))
            .await?;
        Ok(list.recommendations)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, body_string_contains, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::api::test_support::signed_in;
    use crate::models::user::Role;

    #[tokio::test]
    async fn test_all_jobs_unwraps_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/job/getAllJobs"))
            .and(header_exists("authorization"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jobs": [
                    {"id": 1, "title": "Rust Engineer", "company": "Ferris", "skills": ["rust"]},
                    {"id": "j2", "job_title": "Data Analyst"}
                ]
            })))
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::User);
        let jobs = api.all_jobs().await.unwrap();
        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[1].display_title(), Some("Data Analyst"));
    }

    #[tokio::test]
    async fn test_recommendations_send_top_n() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recommendation/getRecommendations"))
            .and(body_json(json!({"top_n": 5})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "recommendations": [
                    {"match_id": 10, "final_score": 0.91, "job": {"id": 1, "title": "SRE"}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::User);
        let recs = api.recommendations(DEFAULT_RECOMMENDATIONS).await.unwrap();
        assert_eq!(recs[0].match_id, Some(RecordId::Int(10)));
        assert_eq!(recs[0].job.display_title(), Some("SRE"));
    }

    #[tokio::test]
    async fn test_apply_for_job_sends_match_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/recommendation/applyJob"))
            .and(body_json(json!({"match_id": 10})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "applied"})))
            .expect(1)
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::User);
        api.apply_for_job(&RecordId::Int(10)).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_job_error_detail() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/job/updateJob"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"detail": "Not your job"})))
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::Recruiter);
        let err = api.update_job(&JobPosting::default()).await.unwrap_err();
        assert_eq!(err.display_message("Failed to update job"), "Not your job");
    }

    #[tokio::test]
    async fn test_upload_job_is_multipart() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/job/uploadJob"))
            .and(body_string_contains("name=\"job\""))
            .and(body_string_contains("filename=\"jobs.csv\""))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uploaded": 3})))
            .expect(1)
            .mount(&server)
            .await;

        let api = signed_in(&server, "t", Role::Recruiter);
        let resp = api.upload_job("jobs.csv", b"title\nSRE\n".to_vec()).await.unwrap();
        assert_eq!(resp["uploaded"], 3);
    }
}
