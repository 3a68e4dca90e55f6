//! Sale registration workflow
//!
//! Holds the draft state for one in-progress sale (product snapshot,
//! customer registry, selected customer, filter, cart) and drives
//! submission: ordered precondition checks, payload construction,
//! POST, and local-state reconciliation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use crate::cart::{Cart, CartError, CartLine};
use crate::catalog::CatalogApi;
use crate::customers::CustomerApi;
use crate::error::ClientError;
use crate::http::HttpClient;
use crate::sales::SalesApi;
use crate::session::SessionStore;
use shared::models::{Customer, Product, Sale, SaleDetailPayload, SaleHeader, SalePayload};

/// Sale submission errors
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// No authenticated session; sign in first
    #[error("no authenticated user")]
    Unauthenticated,

    /// No customer selected for the sale
    #[error("select a customer before registering the sale")]
    MissingCustomer,

    /// Nothing in the cart
    #[error("the cart is empty")]
    EmptyCart,

    /// A cart line's product is gone from the latest snapshot
    #[error("product {name} no longer exists")]
    ProductRemoved { name: String },

    /// A cart line asks for more units than the latest snapshot holds
    #[error("quantity for {name} exceeds current stock ({available})")]
    StockExceeded { name: String, available: i64 },

    /// Another submission of this cart is still in flight
    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// Which customer field the filter matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterField {
    #[default]
    NationalId,
    Name,
}

#[derive(Default)]
struct DraftState {
    products: Vec<Product>,
    customers: Vec<Customer>,
    selected: Option<Customer>,
    filter: String,
    filter_field: FilterField,
    cart: Cart,
}

/// Resets the in-flight flag when the submission future completes or is
/// dropped mid-await
struct InFlightGuard<'a>(&'a AtomicBool);

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Sale registration workflow state + submission
pub struct Checkout {
    session: Arc<SessionStore>,
    catalog: CatalogApi,
    customers: CustomerApi,
    sales: SalesApi,
    state: Mutex<DraftState>,
    in_flight: AtomicBool,
}

impl Checkout {
    pub fn new(http: HttpClient, session: Arc<SessionStore>) -> Self {
        Self {
            session,
            catalog: CatalogApi::new(http.clone()),
            customers: CustomerApi::new(http.clone()),
            sales: SalesApi::new(http),
            state: Mutex::new(DraftState::default()),
            in_flight: AtomicBool::new(false),
        }
    }

    fn state(&self) -> MutexGuard<'_, DraftState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    // ========== Loading ==========

    /// Load the customer registry and product snapshot for the sale
    /// screen
    pub async fn load(&self) -> Result<(), CheckoutError> {
        let customers = self.customers.list().await?;
        let products = self.catalog.products().await?;

        let mut state = self.state();
        state.customers = customers;
        state.products = products;
        Ok(())
    }

    /// Re-fetch the product snapshot; cart ceilings follow the fresh
    /// stock counts
    pub async fn refresh_catalog(&self) -> Result<(), CheckoutError> {
        let products = self.catalog.products().await?;

        let mut guard = self.state();
        let state = &mut *guard;
        state.products = products;
        state.cart.refresh_ceilings(&state.products);
        tracing::debug!(count = state.products.len(), "product snapshot refreshed");
        Ok(())
    }

    /// Latest product snapshot held by the workflow
    pub fn products(&self) -> Vec<Product> {
        self.state().products.clone()
    }

    // ========== Customer selection ==========

    pub fn customers(&self) -> Vec<Customer> {
        self.state().customers.clone()
    }

    /// Select the customer the sale is attributed to. The workflow holds
    /// the record, it never mutates it.
    pub fn select_customer(&self, customer: Customer) {
        self.state().selected = Some(customer);
    }

    pub fn clear_customer(&self) {
        self.state().selected = None;
    }

    pub fn selected_customer(&self) -> Option<Customer> {
        self.state().selected.clone()
    }

    pub fn set_filter(&self, text: impl Into<String>) {
        self.state().filter = text.into();
    }

    pub fn filter(&self) -> String {
        self.state().filter.clone()
    }

    pub fn set_filter_field(&self, field: FilterField) {
        self.state().filter_field = field;
    }

    /// Customers matching the current filter (case-insensitive
    /// substring on national id or name); an empty filter matches all
    pub fn filtered_customers(&self) -> Vec<Customer> {
        let state = self.state();
        let needle = state.filter.trim().to_lowercase();
        if needle.is_empty() {
            return state.customers.clone();
        }
        state
            .customers
            .iter()
            .filter(|c| match state.filter_field {
                FilterField::NationalId => c.national_id.to_lowercase().contains(&needle),
                FilterField::Name => c.name.to_lowercase().contains(&needle),
            })
            .cloned()
            .collect()
    }

    // ========== Cart operations ==========

    /// Add one unit of a product from the held snapshot
    pub fn add_to_cart(&self, product_id: &str) -> Result<(), CheckoutError> {
        let mut guard = self.state();
        let state = &mut *guard;
        let product = state
            .products
            .iter()
            .find(|p| p.id == product_id)
            .cloned()
            .ok_or_else(|| CheckoutError::ProductRemoved {
                name: product_id.to_string(),
            })?;
        state.cart.add_product(&product)?;
        Ok(())
    }

    pub fn set_quantity(&self, product_id: &str, requested: i64) {
        self.state().cart.set_quantity(product_id, requested);
    }

    pub fn remove_from_cart(&self, product_id: &str) {
        self.state().cart.remove_product(product_id);
    }

    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.state().cart.quantity_of(product_id)
    }

    pub fn cart_total(&self) -> f64 {
        self.state().cart.total()
    }

    pub fn cart_lines(&self) -> Vec<CartLine> {
        self.state().cart.lines().to_vec()
    }

    pub fn cart_is_empty(&self) -> bool {
        self.state().cart.is_empty()
    }

    /// Discard the draft (cart, selection, filter); the snapshots stay
    pub fn reset(&self) {
        let mut state = self.state();
        state.cart.clear();
        state.selected = None;
        state.filter.clear();
    }

    // ========== Submission ==========

    /// Whether a submission is currently in flight
    pub fn is_submitting(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Validate the draft, build the sale payload, submit it, and
    /// reconcile local state.
    ///
    /// Preconditions are checked in order: authenticated session,
    /// selected customer, non-empty cart, then every line against the
    /// latest held snapshot. The first failure aborts with no network
    /// call. On a success response the cart, customer selection
    /// and filter are cleared and the product snapshot is refreshed; on
    /// failure the draft is left intact so the caller can retry.
    pub async fn submit(&self) -> Result<Sale, CheckoutError> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(CheckoutError::SubmissionInFlight);
        }
        let _guard = InFlightGuard(&self.in_flight);

        if !self.session.is_authenticated() {
            return Err(CheckoutError::Unauthenticated);
        }

        let payload = self.build_payload()?;

        match self.sales.create(&payload).await {
            Ok(sale) => {
                self.reset();
                if let Err(err) = self.refresh_catalog().await {
                    tracing::warn!(%err, "catalog refresh after sale failed");
                }
                tracing::info!(sale_id = %sale.id, total = sale.total, "sale registered");
                Ok(sale)
            }
            Err(err) => {
                tracing::warn!(%err, "sale submission failed, draft kept");
                Err(err.into())
            }
        }
    }

    /// Run the draft-level precondition checks and construct the
    /// immutable payload
    fn build_payload(&self) -> Result<SalePayload, CheckoutError> {
        let state = self.state();

        let customer = state
            .selected
            .as_ref()
            .ok_or(CheckoutError::MissingCustomer)?;

        if state.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        // Re-validate every line against the latest held snapshot; no
        // fresh fetch here, the backend's own stock check is the final
        // authority.
        for line in state.cart.lines() {
            let snapshot = state
                .products
                .iter()
                .find(|p| p.id == line.product_id)
                .ok_or_else(|| CheckoutError::ProductRemoved {
                    name: line.name.clone(),
                })?;
            if line.quantity() > snapshot.stock {
                return Err(CheckoutError::StockExceeded {
                    name: line.name.clone(),
                    available: snapshot.stock,
                });
            }
        }

        Ok(SalePayload {
            venta: SaleHeader {
                customer_id: customer.id.clone(),
                total: state.cart.total(),
            },
            detalles: state
                .cart
                .lines()
                .iter()
                .map(|line| SaleDetailPayload {
                    subtotal: line.subtotal(),
                    quantity: line.quantity(),
                    product_id: line.product_id.clone(),
                    sale_id: String::new(),
                })
                .collect(),
        })
    }

    #[cfg(test)]
    fn seed(&self, products: Vec<Product>, customers: Vec<Customer>) {
        let mut state = self.state();
        state.products = products;
        state.customers = customers;
    }
}
