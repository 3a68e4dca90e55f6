//! Sales API

use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::{Sale, SalePayload};

/// Sale endpoints
#[derive(Debug, Clone)]
pub struct SalesApi {
    http: HttpClient,
}

impl SalesApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List recorded sales; totals and subtotals are normalized to
    /// numbers by the shared model codecs
    pub async fn list(&self) -> ClientResult<Vec<Sale>> {
        self.http.get("venta").await
    }

    pub async fn get(&self, id: &str) -> ClientResult<Sale> {
        self.http.get(&format!("venta/{id}")).await
    }

    /// Submit a sale. The payload is built by the checkout flow and is
    /// immutable once constructed.
    pub async fn create(&self, payload: &SalePayload) -> ClientResult<Sale> {
        self.http.post("venta", payload).await
    }

    pub async fn delete(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("venta/{id}")).await
    }
}
