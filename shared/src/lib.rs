//! Shared types for the mostrador workspace
//!
//! Wire models and request/response DTOs for the point-of-sale backend,
//! shared between the client crate and any other consumer of the API.

pub mod dto;
pub mod models;
pub mod serde_helpers;

// Re-exports
pub use dto::*;
pub use models::*;
