//! Auth API
//!
//! Registration, login, password recovery and profile fetch. Payloads
//! are validated locally first; a validation failure never reaches the
//! wire.

use crate::error::{ClientError, ClientResult};
use crate::http::HttpClient;
use shared::dto::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    ResetPasswordRequest,
};
use shared::models::User;

const MIN_PASSWORD_LEN: usize = 8;

/// Auth endpoints
#[derive(Debug, Clone)]
pub struct AuthApi {
    http: HttpClient,
}

impl AuthApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Register a new user account
    pub async fn register(&self, request: &RegisterRequest) -> ClientResult<()> {
        validate_registration(request)?;
        self.http.post_unit("auth/register", request).await
    }

    /// Exchange credentials for an access token
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.http.post("auth/login", &request).await
    }

    /// Request a password recovery email
    pub async fn forgot_password(&self, email: &str) -> ClientResult<MessageResponse> {
        if email.trim().is_empty() {
            return Err(ClientError::Validation("email is required".to_string()));
        }

        let request = ForgotPasswordRequest {
            email: email.to_string(),
        };
        self.http.post("auth/forgot-password", &request).await
    }

    /// Reset the password using a recovery token
    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> ClientResult<MessageResponse> {
        if request.token.trim().is_empty() {
            return Err(ClientError::Validation(
                "recovery token is required".to_string(),
            ));
        }
        validate_password_pair(&request.password, &request.confirm_password)?;

        self.http.post("auth/reset-password", request).await
    }

    /// Fetch the profile for the current session token
    pub async fn profile(&self) -> ClientResult<User> {
        self.http.get("auth/profile").await
    }

    /// Fetch the profile with an explicit token, without touching the
    /// current session on failure
    pub async fn profile_with_token(&self, token: &str) -> ClientResult<User> {
        self.http.get_with_token("auth/profile", token).await
    }
}

fn validate_registration(request: &RegisterRequest) -> ClientResult<()> {
    if request.name.trim().is_empty() {
        return Err(ClientError::Validation("name is required".to_string()));
    }
    if request.email.trim().is_empty() || !request.email.contains('@') {
        return Err(ClientError::Validation(
            "a valid email is required".to_string(),
        ));
    }
    validate_password_pair(&request.password, &request.confirm_password)
}

fn validate_password_pair(password: &str, confirm: &str) -> ClientResult<()> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(ClientError::Validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password != confirm {
        return Err(ClientError::Validation(
            "passwords do not match".to_string(),
        ));
    }
    Ok(())
}
