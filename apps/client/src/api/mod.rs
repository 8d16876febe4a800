//! Backend REST client. Every call the client makes to the matching
//! service goes through here.
//!
//! Each request carries `Authorization: Bearer <token>` when the tab holds
//! a session. Non-2xx responses become `ClientError::Api` with the payload's
//! `detail`/`message` preserved for display. No retries.

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;
use url::Url;

use crate::errors::ClientError;
use crate::session::SessionStore;

pub mod auth;
pub mod candidates;
pub mod chatbot;
pub mod jobs;
pub mod matches;
pub mod profile;
pub mod resumes;

#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base: Url,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base: Url, timeout: Duration, session: SessionStore) -> Result<Self, ClientError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base: with_trailing_slash(base),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        Ok(self.base.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ClientError> {
        let url = self.url(path)?;
        debug!("{method} {url}");
        let builder = self.http.request(method, url);
        Ok(match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    /// Sends and maps non-success statuses to `ClientError::Api`.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, ClientError> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Request failed with {status}: {body}");
            return Err(ClientError::from_response(status, &body));
        }
        Ok(response)
    }

    async fn send_json<T: DeserializeOwned>(&self, builder: RequestBuilder) -> Result<T, ClientError> {
        let response = self.send(builder).await?;
        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.send_json(self.request(Method::GET, path)?).await
    }

    async fn with_body<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_json(self.request(method, path)?.json(body)).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.with_body(Method::POST, path, body).await
    }
}

/// `Url::join` replaces the last segment unless the base ends in `/`.
fn with_trailing_slash(mut base: Url) -> Url {
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use wiremock::MockServer;

    use super::ApiClient;
    use crate::models::user::{Role, User};
    use crate::models::RecordId;
    use crate::session::{MemoryStore, SessionStore};

    pub fn session() -> SessionStore {
        SessionStore::new(Arc::new(MemoryStore::new()), Arc::new(MemoryStore::new()))
    }

    pub fn client(server: &MockServer, session: SessionStore) -> ApiClient {
        let base = url::Url::parse(&server.uri()).unwrap();
        ApiClient::new(base, Duration::from_secs(5), session).unwrap()
    }

    /// A client whose tab already holds a session with `token`.
    pub fn signed_in(server: &MockServer, token: &str, role: Role) -> ApiClient {
        let session = session();
        let user = User {
            id: RecordId::Int(1),
            username: Some("tester".into()),
            email: Some("tester@example.com".into()),
            role,
        };
        session.persist(token, &user).unwrap();
        client(server, session)
    }
}
