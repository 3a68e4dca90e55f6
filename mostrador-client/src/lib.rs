//! Mostrador Client - HTTP client for the point-of-sale backend
//!
//! Session lifecycle, catalog and customer registry access, the cart
//! engine, and the sale registration workflow. The presentation layer
//! consumes these contracts; it is not part of this crate.

pub mod auth;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod customers;
pub mod error;
pub mod http;
pub mod sales;
pub mod session;

pub use auth::AuthApi;
pub use cart::{Cart, CartError, CartLine};
pub use catalog::CatalogApi;
pub use checkout::{Checkout, CheckoutError, FilterField};
pub use config::ClientConfig;
pub use customers::CustomerApi;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use sales::SalesApi;
pub use session::{AuthState, FileTokenStore, MemoryTokenStore, SessionStore, TokenStore};

// Re-export shared types for convenience
pub use shared::dto::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MessageResponse, RegisterRequest,
    ResetPasswordRequest,
};
pub use shared::models::{
    Brand, BrandCreate, BrandUpdate, Category, CategoryCreate, CategoryUpdate, Customer,
    CustomerCreate, CustomerUpdate, Product, ProductCreate, ProductUpdate, Role, Sale,
    SaleDetailPayload, SaleHeader, SalePayload, Supplier, SupplierCreate, SupplierUpdate, User,
};
