//! Sale Model
//!
//! Read model for recorded sales plus the create payload. The payload is
//! built once at submission time and is immutable after that.

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{lenient_f64, lenient_i64, null_as_empty_vec};

/// Product summary embedded in a sale detail line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleProduct {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "precio", with = "lenient_f64")]
    pub price: f64,
}

/// One line of a recorded sale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDetail {
    #[serde(rename = "id_detalle")]
    pub id: String,
    #[serde(rename = "cantidad", with = "lenient_i64")]
    pub quantity: i64,
    #[serde(rename = "precioSubTotal", with = "lenient_f64")]
    pub subtotal: f64,
    #[serde(rename = "id_producto")]
    pub product_id: String,
    #[serde(rename = "id_venta", default, skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<String>,
    #[serde(rename = "producto", default, skip_serializing_if = "Option::is_none")]
    pub product: Option<SaleProduct>,
}

/// Recorded sale, as returned by `GET /venta`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    #[serde(rename = "id_venta")]
    pub id: String,
    #[serde(rename = "precioTotal", with = "lenient_f64")]
    pub total: f64,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
    #[serde(rename = "id_cliente")]
    pub customer_id: String,
    #[serde(rename = "cliente", default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<crate::models::Customer>,
    #[serde(rename = "detalles", default, deserialize_with = "null_as_empty_vec")]
    pub details: Vec<SaleDetail>,
}

// ========== Create payload ==========

/// Sale header of the create payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleHeader {
    #[serde(rename = "id_cliente")]
    pub customer_id: String,
    #[serde(rename = "precioTotal")]
    pub total: f64,
}

/// Detail line of the create payload
///
/// `sale_id` is left empty; the backend assigns it when it persists the
/// header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDetailPayload {
    #[serde(rename = "precioSubTotal")]
    pub subtotal: f64,
    #[serde(rename = "cantidad")]
    pub quantity: i64,
    #[serde(rename = "id_producto")]
    pub product_id: String,
    #[serde(rename = "id_venta")]
    pub sale_id: String,
}

/// Payload for `POST /venta`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalePayload {
    pub venta: SaleHeader,
    pub detalles: Vec<SaleDetailPayload>,
}
