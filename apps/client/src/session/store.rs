use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::errors::ClientError;
use crate::models::user::{Role, User};
use crate::session::storage::KeyValueStore;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

/// The two places a session is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Survives the browsing context and is visible to every tab.
    Durable,
    /// Dies with the tab. Authoritative for "is this tab signed in".
    Tab,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Durable, Scope::Tab];
}

/// A signed-in viewer as read back from the tab scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }
}

/// Session persistence over a durable and a tab-scoped store.
/// Writes and clears always hit both.
#[derive(Clone)]
pub struct SessionStore {
    durable: Arc<dyn KeyValueStore>,
    tab: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    pub fn new(durable: Arc<dyn KeyValueStore>, tab: Arc<dyn KeyValueStore>) -> Self {
        Self { durable, tab }
    }

    fn scope(&self, scope: Scope) -> &dyn KeyValueStore {
        match scope {
            Scope::Durable => self.durable.as_ref(),
            Scope::Tab => self.tab.as_ref(),
        }
    }

    /// Persists token and user into both scopes.
    pub fn persist(&self, token: &str, user: &User) -> Result<(), ClientError> {
        let user_json = serde_json::to_string(user)?;
        for scope in Scope::ALL {
            let store = self.scope(scope);
            store.set(TOKEN_KEY, token);
            store.set(USER_KEY, &user_json);
        }
        info!("Session persisted for {} ({})", user.display_name(), user.role);
        Ok(())
    }

    /// Removes token and user from both scopes.
    pub fn clear(&self) {
        for scope in Scope::ALL {
            let store = self.scope(scope);
            store.remove(TOKEN_KEY);
            store.remove(USER_KEY);
        }
        debug!("Session cleared from both scopes");
    }

    /// Token sent as the bearer credential. Only the tab scope counts.
    pub fn token(&self) -> Option<String> {
        self.scope(Scope::Tab)
            .get(TOKEN_KEY)
            .filter(|t| !t.is_empty())
    }

    /// Cached user record from the tab scope; malformed records read as absent.
    pub fn user(&self) -> Option<User> {
        let raw = self.scope(Scope::Tab).get(USER_KEY)?;
        match serde_json::from_str::<User>(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!("Ignoring malformed persisted user record: {e}");
                None
            }
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.user().map(|u| u.role)
    }

    /// The current session, present only when both token and user are.
    pub fn current(&self) -> Option<Session> {
        let token = self.token()?;
        let user = self.user()?;
        Some(Session { token, user })
    }

    pub fn is_authenticated(&self) -> bool {
        self.current().is_some()
    }

    /// Applies a logout made elsewhere: when the durable scope no longer
    /// holds a token, the tab scope is dropped too. Returns whether it was.
    pub fn reconcile_with_durable(&self) -> bool {
        let durable_token = self.scope(Scope::Durable).get(TOKEN_KEY);
        if durable_token.is_none() && self.scope(Scope::Tab).get(TOKEN_KEY).is_some() {
            info!("Session removed by another context; dropping tab session");
            self.clear();
            return true;
        }
        false
    }
}
