use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Client-level error type.
/// Call sites turn these into display text with [`ClientError::display_message`];
/// nothing here is ever rethrown past the UI layer.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {}", message.as_deref().unwrap_or("no details"))]
    Api {
        status: StatusCode,
        message: Option<String>,
    },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ClientError {
    /// Text shown to the user: the backend's own message when the payload
    /// carried one, the local validation text, or `fallback` otherwise.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } => message.clone(),
            ClientError::Validation(message) => message.clone(),
            _ => fallback.to_string(),
        }
    }

    /// Builds an API error from a non-success status and its raw body.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        ClientError::Api {
            status,
            message: payload_message(body),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    #[serde(default)]
    detail: Option<Value>,
    #[serde(default)]
    message: Option<String>,
}

/// Extracts `detail` (when it is a plain string) or `message` from an error body.
fn payload_message(body: &str) -> Option<String> {
    let payload: ErrorPayload = serde_json::from_str(body).ok()?;
    let detail = payload.detail.and_then(|d| match d {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        _ => None,
    });
    detail.or(payload.message.filter(|m| !m.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_is_preferred() {
        let err = ClientError::from_response(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Invalid credentials", "message": "ignored"}"#,
        );
        assert_eq!(err.display_message("fallback"), "Invalid credentials");
    }

    #[test]
    fn test_message_used_when_detail_is_structured() {
        let err = ClientError::from_response(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"detail": [{"loc": ["body", "email"]}], "message": "Bad email"}"#,
        );
        assert_eq!(err.display_message("fallback"), "Bad email");
    }

    #[test]
    fn test_fallback_for_non_json_body() {
        let err = ClientError::from_response(StatusCode::BAD_GATEWAY, "<html>oops</html>");
        assert_eq!(
            err.display_message("An error occurred. Please try again."),
            "An error occurred. Please try again."
        );
    }

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        let err = ClientError::Validation("Email and password are required".into());
        assert_eq!(err.display_message("x"), "Email and password are required");
    }
}
