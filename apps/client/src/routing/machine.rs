//! Per-tab authentication state machine.
//!
//! `SessionRouter` owns the tab's view of the session (`Unauthenticated` or
//! `Authenticated(role)`) and its current location. Every entry point
//! re-derives the state from the session store; a change of state applies
//! the entry redirect for the new state, and every location is settled
//! through the guard before it is reported.

use tracing::{debug, error, info};

use crate::models::user::Role;
use crate::routing::guard::{evaluate, GuardDecision};
use crate::routing::routes::{
    home_path, is_public_path, is_root_path, shows_chrome, AppRoute, LOGIN_PATH,
};
use crate::session::SessionStore;

const MAX_REDIRECTS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    Unauthenticated,
    Authenticated(Role),
}

impl AuthState {
    pub fn role(self) -> Option<Role> {
        match self {
            AuthState::Authenticated(role) => Some(role),
            AuthState::Unauthenticated => None,
        }
    }

    pub fn is_authenticated(self) -> bool {
        matches!(self, AuthState::Authenticated(_))
    }
}

/// Where the tab ended up after a navigation or state change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub state: AuthState,
    pub location: String,
    pub view: AppRoute,
    /// True when the settled location differs from the one requested.
    pub redirected: bool,
}

impl Navigation {
    pub fn shows_chrome(&self) -> bool {
        shows_chrome(&self.location)
    }
}

pub struct SessionRouter {
    session: SessionStore,
    state: AuthState,
    location: String,
    view: AppRoute,
}

impl SessionRouter {
    pub fn new(session: SessionStore, initial_path: &str) -> Self {
        let state = derive_state(&session);
        Self {
            session,
            state,
            location: initial_path.to_string(),
            view: AppRoute::parse(initial_path),
        }
    }

    pub fn state(&self) -> AuthState {
        self.state
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub fn snapshot(&self) -> Navigation {
        Navigation {
            state: self.state,
            location: self.location.clone(),
            view: self.view,
            redirected: false,
        }
    }

    /// Initial load: applies the entry rule of whatever state storage
    /// already implies, then settles the starting location.
    pub fn start(&mut self) -> Navigation {
        self.state = derive_state(&self.session);
        let requested = self.location.clone();
        self.apply_entry_redirect();
        self.settle(&requested)
    }

    /// Handles a navigation request.
    pub fn navigate(&mut self, path: &str) -> Navigation {
        self.location = path.to_string();
        self.sync();
        self.settle(path)
    }

    /// Called once token and user have been persisted by a login.
    /// `None` when storage does not hold a usable session or nothing changed.
    pub fn complete_login(&mut self) -> Option<Navigation> {
        self.sync()
    }

    /// Explicit logout: clears both scopes and leaves the protected area.
    pub fn logout(&mut self) -> Option<Navigation> {
        self.session.clear();
        self.sync()
    }

    /// Periodic liveness check. A no-op unless currently authenticated.
    pub fn validate(&mut self) -> Option<Navigation> {
        if !self.state.is_authenticated() {
            return None;
        }
        debug!("Validating stored session");
        self.sync()
    }

    /// Another context changed shared storage.
    pub fn storage_changed(&mut self) -> Option<Navigation> {
        self.session.reconcile_with_durable();
        self.sync()
    }

    /// Re-derives the state from storage and applies a transition if it moved.
    fn sync(&mut self) -> Option<Navigation> {
        let next = derive_state(&self.session);
        if next == self.state {
            return None;
        }
        info!("Session state {:?} -> {:?} at {}", self.state, next, self.location);
        self.state = next;
        let requested = self.location.clone();
        self.apply_entry_redirect();
        Some(self.settle(&requested))
    }

    fn apply_entry_redirect(&mut self) {
        let loc = self.location.as_str();
        match self.state {
            AuthState::Authenticated(role) => {
                if is_public_path(loc) || is_root_path(loc) {
                    self.location = home_path(role).to_string();
                }
            }
            AuthState::Unauthenticated => {
                if !is_public_path(loc) && !is_root_path(loc) {
                    self.location = LOGIN_PATH.to_string();
                }
            }
        }
    }

    /// Follows guard redirects from the current location until a view renders.
    fn settle(&mut self, requested: &str) -> Navigation {
        let viewer = self.state.role();
        for _ in 0..MAX_REDIRECTS {
            let route = AppRoute::parse(&self.location);
            match evaluate(route, viewer) {
                GuardDecision::Render(view) => {
                    self.view = view;
                    break;
                }
                GuardDecision::Redirect(target) => {
                    debug!("Guard redirect {} -> {}", self.location, target);
                    self.location = target.to_string();
                }
            }
        }
        if AppRoute::parse(&self.location) != self.view {
            error!("Redirect chain from {requested} did not settle");
        }
        let redirected = self.location != requested;
        if redirected {
            info!("Redirected {requested} -> {}", self.location);
        }
        Navigation {
            state: self.state,
            location: self.location.clone(),
            view: self.view,
            redirected,
        }
    }
}

fn derive_state(session: &SessionStore) -> AuthState {
    match session.current() {
        Some(s) => AuthState::Authenticated(s.role()),
        None => AuthState::Unauthenticated,
    }
}
