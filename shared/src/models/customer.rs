//! Customer Model

use serde::{Deserialize, Serialize};

/// Customer entity
///
/// `national_id` (wire: `dni`) is unique per registry, enforced
/// server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "dni")]
    pub national_id: String,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Create customer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerCreate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "dni")]
    pub national_id: String,
    #[serde(rename = "telefono")]
    pub phone: String,
}

/// Update customer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CustomerUpdate {
    #[serde(rename = "nombre", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "dni", skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}
