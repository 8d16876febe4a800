use std::fmt;

use serde::{Deserialize, Serialize};

use super::RecordId;

/// Viewer role. Anything the backend sends other than `recruiter` is
/// treated as a job seeker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
    #[default]
    User,
    Recruiter,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Recruiter => "recruiter",
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::from(s.as_str())
    }
}

impl From<&str> for Role {
    fn from(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("recruiter") {
            Role::Recruiter
        } else {
            Role::User
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cached user profile held alongside the session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    /// Name shown in the header: username, else email.
    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.email.as_deref().filter(|s| !s.is_empty()))
            .unwrap_or("User")
    }

    /// Single uppercase letter for the avatar badge.
    pub fn initial(&self) -> char {
        self.display_name()
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('U')
    }
}

/// Successful `/auth/login` payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// `/auth/signup` body.
#[derive(Debug, Clone, Serialize)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parses_recruiter_and_defaults_everything_else_to_user() {
        let roles: Vec<Role> = serde_json::from_str(r#"["recruiter", "user", "admin"]"#).unwrap();
        assert_eq!(roles, vec![Role::Recruiter, Role::User, Role::User]);
    }

    #[test]
    fn test_role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Recruiter).unwrap(), r#""recruiter""#);
    }

    #[test]
    fn test_user_missing_role_defaults_to_user() {
        let user: User = serde_json::from_str(r#"{"id": 7, "email": "a@b.c"}"#).unwrap();
        assert_eq!(user.role, Role::User);
        assert_eq!(user.display_name(), "a@b.c");
        assert_eq!(user.initial(), 'A');
    }

    #[test]
    fn test_login_response_deserializes() {
        let json = r#"{
            "token": "opaque",
            "user": {"id": "u1", "username": "dana", "email": "d@x.io", "role": "recruiter"}
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "opaque");
        assert_eq!(resp.user.role, Role::Recruiter);
        assert_eq!(resp.user.display_name(), "dana");
    }
}
