//! Cart engine
//!
//! The working selection of products for one in-progress sale. Pure
//! in-memory state, no I/O: one line per product id, quantities clamped
//! to the stock ceiling captured at insertion time, totals recomputed
//! on demand through `rust_decimal`.

use rust_decimal::prelude::*;
use thiserror::Error;

use shared::models::Product;

/// Rounding for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Cart mutation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The product snapshot has no sellable units
    #[error("{name} is out of stock")]
    OutOfStock { name: String },

    /// The line already holds every known unit
    #[error("cannot add more units of {name}: only {ceiling} available")]
    StockCeilingReached { name: String, ceiling: i64 },
}

/// One product's selection state within the cart
///
/// `name` and `unit_price` are denormalized from the product snapshot at
/// insertion time; `stock_ceiling` is the authoritative local bound on
/// `quantity` until the cart is cleared or the ceiling is refreshed.
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: f64,
    quantity: i64,
    stock_ceiling: i64,
}

impl CartLine {
    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn stock_ceiling(&self) -> i64 {
        self.stock_ceiling
    }

    /// Line subtotal (unit price × quantity), rounded to 2 decimals
    pub fn subtotal(&self) -> f64 {
        to_f64(to_decimal(self.unit_price) * Decimal::from(self.quantity))
    }
}

/// The in-progress sale's cart
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart gets its quantity incremented,
    /// rejected once the stock ceiling is reached. A new product enters
    /// with quantity 1, rejected when the snapshot has no stock. The
    /// ceiling is captured from the snapshot at insertion.
    pub fn add_product(&mut self, product: &Product) -> Result<(), CartError> {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product.id) {
            if line.quantity >= line.stock_ceiling {
                return Err(CartError::StockCeilingReached {
                    name: line.name.clone(),
                    ceiling: line.stock_ceiling,
                });
            }
            line.quantity += 1;
            return Ok(());
        }

        if product.stock <= 0 {
            return Err(CartError::OutOfStock {
                name: product.name.clone(),
            });
        }

        self.lines.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
            stock_ceiling: product.stock,
        });
        Ok(())
    }

    /// Set a line's quantity, clamped into `[1, stock_ceiling]`.
    ///
    /// Anything at or below zero coerces to 1. Never removes the line;
    /// a product id not in the cart is a no-op.
    pub fn set_quantity(&mut self, product_id: &str, requested: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = requested.clamp(1, line.stock_ceiling);
        }
    }

    /// Remove a line; no-op if the product is not in the cart
    pub fn remove_product(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    /// Quantity currently selected for a product, 0 when absent
    pub fn quantity_of(&self, product_id: &str) -> i64 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    /// Order total, recomputed on every call
    pub fn total(&self) -> f64 {
        let sum: Decimal = self
            .lines
            .iter()
            .map(|l| to_decimal(l.unit_price) * Decimal::from(l.quantity))
            .sum();
        to_f64(sum.max(Decimal::ZERO))
    }

    /// Update stock ceilings from a fresh snapshot set.
    ///
    /// Lines whose product is missing from the snapshot, or reports no
    /// stock, keep their stale ceiling; submission-time validation
    /// surfaces those. Quantities are clamped down when a ceiling
    /// shrinks.
    pub fn refresh_ceilings(&mut self, products: &[Product]) {
        for line in &mut self.lines {
            if let Some(snapshot) = products.iter().find(|p| p.id == line.product_id) {
                if snapshot.stock > 0 {
                    line.stock_ceiling = snapshot.stock;
                    line.quantity = line.quantity.clamp(1, line.stock_ceiling);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }
}
