use crate::models::user::Role;

pub const ROOT_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const USER_DASHBOARD_PATH: &str = "/user-dashboard";
pub const RECRUITER_DASHBOARD_PATH: &str = "/recruiter-dashboard";

/// Paths reachable without a session.
pub const PUBLIC_PATHS: [&str; 2] = [LOGIN_PATH, SIGNUP_PATH];

/// Views the client knows how to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AppRoute {
    Root,
    Login,
    Signup,
    UserDashboard,
    RecruiterDashboard,
    /// Anything unmatched; resolves like the root.
    Fallback,
}

/// How a route is gated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Visible only while signed out.
    PublicOnly,
    /// Never rendered; always sends the viewer somewhere else.
    Redirecting,
    /// Requires a session; a non-empty list also restricts roles.
    Protected { allowed_roles: &'static [Role] },
}

impl AppRoute {
    /// Matches a location path. Trailing slashes, query strings and
    /// fragments are ignored; matching is ASCII case-insensitive.
    pub fn parse(path: &str) -> Self {
        let path = path
            .split(['?', '#'])
            .next()
            .unwrap_or_default()
            .trim_end_matches('/');
        let is = |p: &str| path.eq_ignore_ascii_case(p);

        if path.is_empty() {
            AppRoute::Root
        } else if is(LOGIN_PATH) {
            AppRoute::Login
        } else if is(SIGNUP_PATH) {
            AppRoute::Signup
        } else if is(USER_DASHBOARD_PATH) {
            AppRoute::UserDashboard
        } else if is(RECRUITER_DASHBOARD_PATH) {
            AppRoute::RecruiterDashboard
        } else {
            AppRoute::Fallback
        }
    }

    pub fn access(self) -> Access {
        match self {
            AppRoute::Login | AppRoute::Signup => Access::PublicOnly,
            AppRoute::Root | AppRoute::Fallback => Access::Redirecting,
            AppRoute::UserDashboard => Access::Protected {
                allowed_roles: &[Role::User],
            },
            AppRoute::RecruiterDashboard => Access::Protected {
                allowed_roles: &[Role::Recruiter],
            },
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            AppRoute::Root | AppRoute::Fallback => ROOT_PATH,
            AppRoute::Login => LOGIN_PATH,
            AppRoute::Signup => SIGNUP_PATH,
            AppRoute::UserDashboard => USER_DASHBOARD_PATH,
            AppRoute::RecruiterDashboard => RECRUITER_DASHBOARD_PATH,
        }
    }
}

/// Dashboard a role lands on.
pub fn home_path(role: Role) -> &'static str {
    match role {
        Role::Recruiter => RECRUITER_DASHBOARD_PATH,
        Role::User => USER_DASHBOARD_PATH,
    }
}

/// Login/signup, including nested paths under them.
pub fn is_public_path(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|p| path.starts_with(p))
}

pub fn is_root_path(path: &str) -> bool {
    AppRoute::parse(path) == AppRoute::Root
}

/// Header chrome is hidden on the login and signup pages, matched the
/// same way as routing.
pub fn shows_chrome(path: &str) -> bool {
    !matches!(AppRoute::parse(path), AppRoute::Login | AppRoute::Signup)
}
