//! User profile and roles

use serde::{Deserialize, Serialize};

/// User role, closed set
///
/// The backend stores the seller role under its Spanish name
/// (`"vendedor"`); `"seller"` is accepted as an input alias.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[serde(rename = "vendedor", alias = "seller")]
    Seller,
}

impl Role {
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

/// Authenticated user profile, as returned by `GET /auth/profile`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
}
