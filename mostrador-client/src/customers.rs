//! Customer registry API

use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::{Customer, CustomerCreate, CustomerUpdate};

/// Customer registry endpoints
#[derive(Debug, Clone)]
pub struct CustomerApi {
    http: HttpClient,
}

impl CustomerApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn list(&self) -> ClientResult<Vec<Customer>> {
        self.http.get("cliente").await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Customer> {
        self.http.get(&format!("cliente/{id}")).await
    }

    /// Create a customer; `dni` uniqueness is enforced server-side and
    /// surfaces as a backend error
    pub async fn create(&self, payload: &CustomerCreate) -> ClientResult<Customer> {
        self.http.post("cliente", payload).await
    }

    pub async fn update(&self, id: &str, payload: &CustomerUpdate) -> ClientResult<Customer> {
        self.http.patch(&format!("cliente/{id}"), payload).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("cliente/{id}")).await
    }
}
