use reqwest::Method;
use serde_json::Value;
use tracing::info;

use crate::api::ApiClient;
use crate::errors::ClientError;
use crate::models::user::{LoginResponse, Role, SignupRequest};

pub const LOGIN_PATH: &str = "/auth/login";
pub const SIGNUP_PATH: &str = "/auth/signup";

pub const LOGIN_FAILED: &str = "An error occurred. Please try again.";
pub const SIGNUP_FAILED: &str = "Signup failed. Please try again.";
const MIN_PASSWORD_LEN: usize = 6;

/// Signup input as typed, before it becomes a request.
#[derive(Debug, Clone, Default)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
}

impl SignupForm {
    pub fn validate(self) -> Result<SignupRequest, ClientError> {
        if self.username.trim().is_empty() || self.email.trim().is_empty() || self.password.is_empty() {
            return Err(ClientError::Validation("All fields are required".into()));
        }
        if self.password != self.confirm_password {
            return Err(ClientError::Validation("Passwords do not match".into()));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ClientError::Validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        Ok(SignupRequest {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password,
            role: self.role,
        })
    }
}

impl ApiClient {
    /// Exchanges credentials for a session and persists it in both scopes.
    /// The router still has to be told; see `RouterHandle::login_completed`.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ClientError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation("Email and password are required".into()));
        }
        let form = [("username", email.trim()), ("password", password)];
        let builder = self.request(Method::POST, LOGIN_PATH)?.form(&form);
        let response: LoginResponse = self.send_json(builder).await?;

        self.session().persist(&response.token, &response.user)?;
        info!("Logged in as {} ({})", response.user.display_name(), response.user.role);
        Ok(response)
    }

    /// Creates an account. Does not sign in.
    pub async fn signup(&self, form: SignupForm) -> Result<Value, ClientError> {
        let request = form.validate()?;
        let created: Value = self.post_json(SIGNUP_PATH, &request).await?;
        info!("Account created for {}", request.email);
        Ok(created)
    }
}
