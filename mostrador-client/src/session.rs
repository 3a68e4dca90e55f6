//! Session store
//!
//! Token-based session lifecycle: restore on startup, login, logout,
//! role predicates. The bearer token is the only state persisted across
//! restarts; the profile is re-fetched from the backend every run.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::auth::AuthApi;
use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::User;

/// Persistence for the session token (a single opaque string)
pub trait TokenStore: Send + Sync {
    fn load(&self) -> Option<String>;
    fn save(&self, token: &str) -> std::io::Result<()>;
    fn clear(&self) -> std::io::Result<()>;
}

/// Token store backed by a single file
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        let raw = std::fs::read_to_string(&self.path).ok()?;
        let token = raw.trim();
        if token.is_empty() {
            return None;
        }
        Some(token.to_string())
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)
    }

    fn clear(&self) -> std::io::Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// In-memory token store for tests
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    cell: std::sync::Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            cell: std::sync::Mutex::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.cell.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn save(&self, token: &str) -> std::io::Result<()> {
        *self.cell.lock().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> std::io::Result<()> {
        *self.cell.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

/// Shared authentication state
///
/// The transport consults this on every request and invalidates it when
/// the backend answers 401. Invalidation clears both the in-memory slot
/// and the persisted token.
pub struct AuthState {
    token: RwLock<Option<String>>,
    store: Arc<dyn TokenStore>,
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("token", &self.token().map(|_| "<redacted>"))
            .finish()
    }
}

impl AuthState {
    pub(crate) fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            token: RwLock::new(None),
            store,
        }
    }

    /// Current in-memory token
    pub fn token(&self) -> Option<String> {
        self.token.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// `Authorization` header value, when a token is present
    pub(crate) fn bearer(&self) -> Option<String> {
        self.token().map(|t| format!("Bearer {t}"))
    }

    /// Token from the persistent store, bypassing the in-memory slot
    pub(crate) fn stored_token(&self) -> Option<String> {
        self.store.load()
    }

    /// Populate the in-memory slot without touching the store
    pub(crate) fn set_memory(&self, token: &str) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = Some(token.to_string());
    }

    /// Persist the token and populate the in-memory slot.
    /// Exactly one persisted write per call.
    pub(crate) fn persist(&self, token: &str) -> std::io::Result<()> {
        self.store.save(token)?;
        self.set_memory(token);
        Ok(())
    }

    /// Clear both the in-memory slot and the persisted token. Idempotent.
    pub(crate) fn clear(&self) {
        *self.token.write().unwrap_or_else(|e| e.into_inner()) = None;
        if let Err(err) = self.store.clear() {
            tracing::warn!(%err, "failed to clear persisted token");
        }
    }
}

/// Session store: the authenticated user's token + profile for the
/// current application run
pub struct SessionStore {
    auth: Arc<AuthState>,
    api: AuthApi,
    user: RwLock<Option<User>>,
    logged_in_at: RwLock<Option<DateTime<Utc>>>,
}

impl SessionStore {
    pub fn new(http: HttpClient) -> Self {
        Self {
            auth: Arc::clone(http.auth()),
            api: AuthApi::new(http),
            user: RwLock::new(None),
            logged_in_at: RwLock::new(None),
        }
    }

    /// Restore the session from a persisted token, if any.
    ///
    /// A rejected token (any non-2xx on the profile fetch) is cleared
    /// and the session stays logged out; this never fails to the
    /// caller.
    pub async fn restore(&self) {
        let Some(token) = self.auth.stored_token() else {
            tracing::debug!("no persisted token, starting logged out");
            return;
        };

        match self.api.profile_with_token(&token).await {
            Ok(profile) => {
                self.auth.set_memory(&token);
                self.set_user(Some(profile));
                tracing::info!("session restored from persisted token");
            }
            // transport failure says nothing about the token; keep it
            // for the next run
            Err(crate::error::ClientError::Network(err)) => {
                tracing::warn!(%err, "profile fetch failed, starting logged out");
            }
            Err(err) => {
                self.auth.clear();
                tracing::debug!(%err, "persisted token rejected, cleared");
            }
        }
    }

    /// Establish a session from a token.
    ///
    /// The profile is fetched with the given token before anything is
    /// written; on failure the prior session state is untouched. On
    /// success the token is persisted exactly once.
    pub async fn login(&self, token: &str) -> ClientResult<User> {
        let profile = self.api.profile_with_token(token).await?;
        self.auth.persist(token)?;
        self.set_user(Some(profile.clone()));
        *self
            .logged_in_at
            .write()
            .unwrap_or_else(|e| e.into_inner()) = Some(Utc::now());
        tracing::info!(user = %profile.email, "session established");
        Ok(profile)
    }

    /// Credential login: exchange email/password for a token, then
    /// establish the session with it.
    pub async fn sign_in(&self, email: &str, password: &str) -> ClientResult<User> {
        let response = self.api.login(email, password).await?;
        self.login(&response.access_token).await
    }

    /// Clear the session and the persisted token. Idempotent.
    pub fn logout(&self) {
        self.auth.clear();
        self.set_user(None);
        *self
            .logged_in_at
            .write()
            .unwrap_or_else(|e| e.into_inner()) = None;
        tracing::info!("logged out");
    }

    /// True iff both token and profile are present. A token without a
    /// profile (or the reverse) is not an authenticated session.
    pub fn is_authenticated(&self) -> bool {
        self.auth.token().is_some() && self.read_user().is_some()
    }

    /// Role predicate; false when logged out
    pub fn is_admin(&self) -> bool {
        self.read_user().map(|u| u.role.is_admin()).unwrap_or(false)
    }

    pub fn user(&self) -> Option<User> {
        self.read_user()
    }

    pub fn token(&self) -> Option<String> {
        self.auth.token()
    }

    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        *self
            .logged_in_at
            .read()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn read_user(&self) -> Option<User> {
        self.user.read().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn set_user(&self, user: Option<User>) {
        *self.user.write().unwrap_or_else(|e| e.into_inner()) = user;
    }
}
