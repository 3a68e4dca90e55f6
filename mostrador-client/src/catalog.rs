//! Catalog API
//!
//! Fetch-and-normalize accessors for the product catalog and its lookup
//! tables (categories, brands, suppliers). Numeric coercion of price
//! and stock happens in the shared models' serde codecs; this layer
//! only maps endpoints.

use crate::error::ClientResult;
use crate::http::HttpClient;
use shared::models::{
    Brand, BrandCreate, BrandUpdate, Category, CategoryCreate, CategoryUpdate, Product,
    ProductCreate, ProductUpdate, Supplier, SupplierCreate, SupplierUpdate,
};

/// Catalog endpoints
#[derive(Debug, Clone)]
pub struct CatalogApi {
    http: HttpClient,
}

impl CatalogApi {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    // ========== Products ==========

    /// Fetch the current product snapshot set
    pub async fn products(&self) -> ClientResult<Vec<Product>> {
        self.http.get("producto").await
    }

    pub async fn product(&self, id: &str) -> ClientResult<Product> {
        self.http.get(&format!("producto/{id}")).await
    }

    pub async fn create_product(&self, payload: &ProductCreate) -> ClientResult<Product> {
        self.http.post("producto", payload).await
    }

    pub async fn update_product(&self, id: &str, payload: &ProductUpdate) -> ClientResult<Product> {
        self.http.patch(&format!("producto/{id}"), payload).await
    }

    pub async fn delete_product(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("producto/{id}")).await
    }

    // ========== Categories ==========

    pub async fn categories(&self) -> ClientResult<Vec<Category>> {
        self.http.get("categoria").await
    }

    pub async fn category(&self, id: &str) -> ClientResult<Category> {
        self.http.get(&format!("categoria/{id}")).await
    }

    pub async fn create_category(&self, payload: &CategoryCreate) -> ClientResult<Category> {
        self.http.post("categoria", payload).await
    }

    pub async fn update_category(&self, id: &str, payload: &CategoryUpdate) -> ClientResult<Category> {
        self.http.patch(&format!("categoria/{id}"), payload).await
    }

    pub async fn delete_category(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("categoria/{id}")).await
    }

    // ========== Brands ==========

    pub async fn brands(&self) -> ClientResult<Vec<Brand>> {
        self.http.get("marca").await
    }

    pub async fn brand(&self, id: &str) -> ClientResult<Brand> {
        self.http.get(&format!("marca/{id}")).await
    }

    pub async fn create_brand(&self, payload: &BrandCreate) -> ClientResult<Brand> {
        self.http.post("marca", payload).await
    }

    pub async fn update_brand(&self, id: &str, payload: &BrandUpdate) -> ClientResult<Brand> {
        self.http.patch(&format!("marca/{id}"), payload).await
    }

    pub async fn delete_brand(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("marca/{id}")).await
    }

    // ========== Suppliers ==========

    pub async fn suppliers(&self) -> ClientResult<Vec<Supplier>> {
        self.http.get("proveedor").await
    }

    pub async fn supplier(&self, id: &str) -> ClientResult<Supplier> {
        self.http.get(&format!("proveedor/{id}")).await
    }

    pub async fn create_supplier(&self, payload: &SupplierCreate) -> ClientResult<Supplier> {
        self.http.post("proveedor", payload).await
    }

    pub async fn update_supplier(&self, id: &str, payload: &SupplierUpdate) -> ClientResult<Supplier> {
        self.http.patch(&format!("proveedor/{id}"), payload).await
    }

    pub async fn delete_supplier(&self, id: &str) -> ClientResult<()> {
        self.http.delete(&format!("proveedor/{id}")).await
    }
}
