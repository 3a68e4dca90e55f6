//! Product Model

use serde::{Deserialize, Serialize};

use crate::models::{Brand, Category, Supplier};
use crate::serde_helpers::{lenient_f64, lenient_i64};

/// Product entity
///
/// `price` and `stock` use lenient decoding: the backend emits them as
/// numbers or numeric strings depending on the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "id_producto")]
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Unit price, non-negative
    #[serde(rename = "precio", with = "lenient_f64")]
    pub price: f64,
    #[serde(rename = "imagen", default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Units on hand, non-negative
    #[serde(with = "lenient_i64")]
    pub stock: i64,
    /// Category reference (nested, present on list/detail responses)
    #[serde(rename = "categoria", default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(rename = "marca", default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<Brand>,
    #[serde(rename = "proveedor", default, skip_serializing_if = "Option::is_none")]
    pub supplier: Option<Supplier>,
    #[serde(rename = "id_categoria", default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(rename = "id_marca", default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    #[serde(rename = "id_proveedor", default, skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
}

impl Product {
    /// True when at least one unit can be sold
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

/// Create product payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCreate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio")]
    pub price: f64,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub stock: i64,
    #[serde(rename = "id_categoria", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(rename = "id_marca", skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    #[serde(rename = "id_proveedor", skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
}

/// Update product payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "descripcion", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "precio", skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(rename = "imagen", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    #[serde(rename = "id_categoria", skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
    #[serde(rename = "id_marca", skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<String>,
    #[serde(rename = "id_proveedor", skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,
}
