use reqwest::Method;
use serde_json::Value;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::profile::{Profile, ProfileUpdate};

pub const MY_PROFILE_PATH: &str = "/profile/myProfile";
pub const UPDATE_PROFILE_PATH: &str = "/profile/update";

impl ApiClient {
    pub async fn my_profile(&self) -> Result<Profile, ClientError> {
        self.get_json(MY_PROFILE_PATH).await
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Value, ClientError> {
        self.with_body(Method::PUT, UPDATE_PROFILE_PATH, update).await
    }
}
