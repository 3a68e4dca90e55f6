//! HTTP transport for the backend REST API
//!
//! Thin reqwest wrapper: attaches the bearer token from the shared
//! [`AuthState`], maps non-2xx responses onto [`ClientError`], and
//! invalidates the session when the backend answers 401. No retries,
//! no caching.

use std::sync::Arc;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::session::{AuthState, TokenStore};

/// HTTP client for the point-of-sale backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    auth: Arc<AuthState>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration and a token store
    pub fn new(config: &ClientConfig, store: Arc<dyn TokenStore>) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        let auth = Arc::new(AuthState::new(store));
        if let Some(token) = &config.token {
            auth.set_memory(token);
        }

        Self {
            client,
            base_url: config.base_url.clone(),
            auth,
        }
    }

    /// Shared authentication state (token slot + persistence)
    pub fn auth(&self) -> &Arc<AuthState> {
        &self.auth
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    /// Make a GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));
        if let Some(auth) = self.auth.bearer() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        self.handle_response(response, true).await
    }

    /// Make a GET request with an explicit bearer token, bypassing the
    /// session slot. Used to validate a candidate token without
    /// touching the current session on failure.
    pub async fn get_with_token<T: DeserializeOwned>(
        &self,
        path: &str,
        token: &str,
    ) -> ClientResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .header(reqwest::header::AUTHORIZATION, format!("Bearer {token}"))
            .send()
            .await?;
        self.handle_response(response, false).await
    }

    /// Make a POST request with JSON body
    pub async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth.bearer() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        self.handle_response(response, true).await
    }

    /// Make a POST request and discard the response body
    pub async fn post_unit<B: serde::Serialize>(&self, path: &str, body: &B) -> ClientResult<()> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth.bearer() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        self.check_status(response, true).await.map(|_| ())
    }

    /// Make a PATCH request with JSON body
    pub async fn patch<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.patch(self.url(path)).json(body);
        if let Some(auth) = self.auth.bearer() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        self.handle_response(response, true).await
    }

    /// Make a DELETE request, discarding any response body
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        let mut request = self.client.delete(self.url(path));
        if let Some(auth) = self.auth.bearer() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }

        let response = request.send().await?;
        self.check_status(response, true).await.map(|_| ())
    }

    /// Handle the HTTP response, decoding the body as JSON
    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
        invalidate_on_401: bool,
    ) -> ClientResult<T> {
        let response = self.check_status(response, invalidate_on_401).await?;
        response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Map non-2xx statuses to errors; pass 2xx responses through
    async fn check_status(
        &self,
        response: reqwest::Response,
        invalidate_on_401: bool,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED {
            if invalidate_on_401 {
                self.auth.clear();
                tracing::warn!("backend answered 401, local session invalidated");
            }
            return Err(ClientError::Unauthorized);
        }

        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Backend {
            status: status.as_u16(),
            message: backend_message(status, &body),
        })
    }
}

/// Extract the backend's `{"message": …}` when present, falling back to
/// the raw body, then the status reason
fn backend_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(message) = value.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("request failed")
        .to_string()
}
