//! Authenticated session management.
//!
//! [`SessionManager`] is the single owner of the current [`Session`] and the only
//! writer of the durable token. It is created once at startup, passed by
//! reference to whatever needs it, and has an explicit lifecycle:
//!
//! - [`init`](SessionManager::init): restore a persisted session (clears `loading`)
//! - [`login`](SessionManager::login) / [`logout`](SessionManager::logout)
//! - [`teardown`](SessionManager::teardown): drop the session and the token
//!
//! Components that only need to call the backend get an [`AuthClient`], which
//! reads the token per request and never writes it.

pub mod client;
pub mod role;
pub mod session;
pub mod token_store;

pub use client::AuthClient;
pub use role::RoleLevel;
pub use session::{Session, User};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};

use crate::config::AppConfig;
use crate::error::{AuthError, CoreError, StorageError};
use crate::guard::{self, GuardDecision};
use session::{LoginRequest, LoginResponse};

use common::RedactedToken;

use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use reqwest::Client;
use url::Url;

const LOGIN_ENDPOINT: &str = "api/auth/login";
const ME_ENDPOINT: &str = "api/auth/me";

pub struct SessionManager {
    base_url: Url,
    http: Client,
    store: Arc<dyn TokenStore>,
    session: Option<Session>,
    loading: bool,
}

impl SessionManager {
    /// Create a manager in the `loading` state. Call [`init`](Self::init) next.
    pub fn new(
        base_url: Url,
        store: Arc<dyn TokenStore>,
        request_timeout: Duration,
    ) -> Result<Self, AuthError> {
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| AuthError::from_reqwest(&e))?;

        Ok(Self {
            base_url,
            http,
            store,
            session: None,
            loading: true,
        })
    }

    /// An already-restored manager holding `session`.
    #[cfg(test)]
    pub(crate) fn with_session(store: Arc<dyn TokenStore>, session: Option<Session>) -> Self {
        Self {
            base_url: Url::parse(crate::DEFAULT_SERVER_BASE_URL)
                .unwrap_or_else(|e| panic!("default base URL must parse: {e}")),
            http: Client::new(),
            store,
            session,
            loading: false,
        }
    }

    pub fn from_config(config: &AppConfig, store: Arc<dyn TokenStore>) -> Result<Self, CoreError> {
        let base_url = config.base_url()?;
        Ok(Self::new(base_url, store, config.request_timeout())?)
    }

    /// Lifecycle start: restore any persisted session.
    pub async fn init(&mut self) -> Option<&Session> {
        self.restore_session().await
    }

    /// Lifecycle end: same as [`logout`](Self::logout).
    pub fn teardown(&mut self) -> Result<(), StorageError> {
        self.logout()
    }

    /// Validate a persisted token against `api/auth/me`.
    ///
    /// On success the session is populated. On any failure (non-success
    /// status, network error, unreadable body) the persisted token is cleared
    /// and the session stays empty. `loading` is false afterwards either way.
    pub async fn restore_session(&mut self) -> Option<&Session> {
        self.loading = true;

        let token = match self.store.load() {
            Ok(token) => token,
            Err(e) => {
                warn!("Cannot read persisted token, starting without a session: {}", e);
                None
            }
        };

        if let Some(token) = token {
            match self.fetch_current_user(&token).await {
                Ok(user) => {
                    info!(
                        "Session restored for '{}' ({})",
                        user.username, user.role
                    );
                    self.session = Some(Session::new(user, token));
                }
                Err(e) => {
                    warn!(
                        "Persisted token rejected ({}), clearing it: {}",
                        e.error_category(),
                        e
                    );
                    self.session = None;
                    if let Err(e) = self.store.clear() {
                        warn!("Failed to clear rejected token: {}", e);
                    }
                }
            }
        } else {
            debug!("No persisted token, no session to restore");
        }

        self.loading = false;
        self.session.as_ref()
    }

    async fn fetch_current_user(&self, token: &RedactedToken) -> Result<User, AuthError> {
        let url = self.base_url.join(ME_ENDPOINT)?;

        let response = self
            .http
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| AuthError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AuthError::from_http_response(status.as_u16(), &body));
        }

        response
            .json::<User>()
            .await
            .map_err(|e| AuthError::protocol(format!("Invalid user payload: {e}")))
    }

    /// Exchange credentials for a token.
    ///
    /// On success the token is stored durably and the session populated. On
    /// failure the previous state is left untouched and the reason returned.
    /// No retries.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session, AuthError> {
        let url = self.base_url.join(LOGIN_ENDPOINT)?;

        let response = self
            .http
            .post(url)
            .json(&LoginRequest { username, password })
            .send()
            .await
            .map_err(|e| AuthError::from_reqwest(&e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let error = AuthError::from_http_response(status.as_u16(), &body);
            warn!("Login failed for '{}': {}", username, error.error_category());
            return Err(error);
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::protocol(format!("Invalid login payload: {e}")))?;

        if login.access_token.is_empty() {
            return Err(AuthError::protocol("Login response carried an empty access_token"));
        }

        let token = RedactedToken::new(login.access_token);
        self.store.save(&token)?;

        let session = Session::new(login.user, token);
        info!("Logged in as '{}' ({})", session.username, session.role);
        self.session = Some(session.clone());

        Ok(session)
    }

    /// Drop the session and the durable token. Idempotent.
    ///
    /// The in-memory session is cleared even when removing the token fails.
    pub fn logout(&mut self) -> Result<(), StorageError> {
        if let Some(session) = self.session.take() {
            info!("Logged out '{}'", session.username);
        }
        self.store.clear()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn has_role(&self, min_level: RoleLevel) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.has_role(min_level))
    }

    pub fn has_exact_role(&self, level: RoleLevel) -> bool {
        self.session.as_ref().is_some_and(|s| s.role == level)
    }

    /// Route guard decision for the current state.
    pub fn guard(&self, required_role: Option<RoleLevel>) -> GuardDecision {
        guard::evaluate(self.loading, self.session.as_ref(), required_role)
    }

    /// Client for protected endpoints, sharing this manager's token store.
    pub fn auth_client(&self) -> AuthClient {
        AuthClient::new(self.base_url.clone(), self.http.clone(), Arc::clone(&self.store))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}
