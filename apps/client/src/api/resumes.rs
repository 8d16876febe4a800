use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde_json::{json, Value};

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::RecordId;

pub const UPLOAD_RESUME_PATH: &str = "/resume/uploadResume";
pub const DOWNLOAD_RESUME_PATH: &str = "/resume/download";

impl ApiClient {
    /// Uploads a resume file (multipart field `resume`).
    pub async fn upload_resume(&self, file_name: &str, contents: Vec<u8>) -> Result<Value, ClientError> {
        let form = Form::new().part("resume", Part::bytes(contents).file_name(file_name.to_string()));
        self.send_json(self.request(Method::POST, UPLOAD_RESUME_PATH)?.multipart(form))
            .await
    }

    /// Raw PDF bytes of a candidate's resume.
    pub async fn download_resume(&self, user_id: &RecordId) -> Result<Bytes, ClientError> {
        let builder = self
            .request(Method::POST, DOWNLOAD_RESUME_PATH)?
            .json(&json!({ "user_id": user_id }));
        let response = self.send(builder).await?;
        Ok(response.bytes().await?)
    }
}

/// File name offered when saving a downloaded resume.
pub fn resume_file_name(candidate_name: Option<&str>) -> String {
    let base: String = candidate_name
        .unwrap_or("candidate")
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '-' { c } else { '_' })
        .collect();
    format!("{base}_resume.pdf")
}
