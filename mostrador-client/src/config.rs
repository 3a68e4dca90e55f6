//! Client configuration

/// Configuration for connecting to the point-of-sale backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (e.g., "http://localhost:3000")
    pub base_url: String,

    /// Bearer token to start the session with, if already known
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new configuration for the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            timeout: 30,
        }
    }

    /// Set the bearer token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Read configuration from the environment
    ///
    /// Loads `.env` first, then `MOSTRADOR_API_URL` and
    /// `MOSTRADOR_API_TIMEOUT`, falling back to defaults.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self {
            base_url: std::env::var("MOSTRADOR_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            token: std::env::var("MOSTRADOR_API_TOKEN").ok(),
            timeout: std::env::var("MOSTRADOR_API_TIMEOUT")
                .ok()
                .and_then(|t| t.parse().ok())
                .unwrap_or(30),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:3000")
    }
}
