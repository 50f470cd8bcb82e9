// ── Cart engine ──
//
// In-memory cart for a single shopping session. Lines snapshot the
// product at add-time; quantities are capped against that snapshot,
// not re-checked against the server. Checkout is simulated -- there is
// no order endpoint on the backend.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

use shoply_api::Product;

/// A cart line: product snapshot plus quantity (always >= 1; a line
/// whose quantity would drop to 0 is removed instead).
#[derive(Debug, Clone)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
}

impl CartLine {
    /// Line subtotal at full precision. Rounding to two places happens
    /// only at display time.
    pub fn subtotal(&self) -> f64 {
        self.product.price * f64::from(self.quantity)
    }
}

/// Why an add was refused.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    /// A previous add is still in flight; duplicate submissions are
    /// disabled until it completes.
    #[error("an add-to-cart operation is already in progress")]
    AddInProgress,

    /// The product's stock snapshot is zero.
    #[error("'{name}' is out of stock")]
    OutOfStock { name: String },

    /// The cart line already holds every unit the stock snapshot has.
    #[error("no more stock available for '{name}'")]
    StockLimit { name: String },
}

/// Result of a checkout attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// Nothing to order; the cart is left as-is (still empty).
    EmptyCart,
    /// Order "placed": the total at full precision. The cart is cleared.
    Placed { total: f64 },
}

/// The in-memory shopping cart.
///
/// `add_delay` models the observable latency of the add operation as an
/// explicit, named parameter so tests can set it to zero.
#[derive(Debug)]
pub struct Cart {
    lines: Vec<CartLine>,
    add_delay: Duration,
    adding: bool,
}

impl Cart {
    pub fn new(add_delay: Duration) -> Self {
        Self {
            lines: Vec::new(),
            add_delay,
            adding: false,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, product_id: i64) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Whether an add is currently in flight.
    pub fn is_adding(&self) -> bool {
        self.adding
    }

    /// Whether the add affordance should be enabled for this product:
    /// in stock and no add already pending. Independent of how many of
    /// it the cart already holds.
    pub fn can_add(&self, product: &Product) -> bool {
        !self.adding && product.in_stock()
    }

    /// Whether the increment control should be enabled for a line.
    /// Disabled once quantity reaches the stock snapshot.
    pub fn can_increment(&self, product_id: i64) -> bool {
        self.line(product_id)
            .is_some_and(|l| l.quantity < l.product.total_items_in_stock)
    }

    /// Sum of price x quantity over all lines, full precision.
    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Add one unit of `product` to the cart.
    ///
    /// Increments the existing line if there is one, otherwise inserts
    /// a new line with quantity 1. The operation takes `add_delay` to
    /// complete; while it is in flight the pending flag refuses
    /// duplicate submissions.
    pub async fn add(&mut self, product: &Product) -> Result<(), CartError> {
        if self.adding {
            return Err(CartError::AddInProgress);
        }
        if !product.in_stock() {
            return Err(CartError::OutOfStock {
                name: product.name.clone(),
            });
        }
        // Quantity may never exceed the stock snapshot taken at add-time.
        if !self.can_increment(product.id) && self.line(product.id).is_some() {
            return Err(CartError::StockLimit {
                name: product.name.clone(),
            });
        }

        self.adding = true;
        tokio::time::sleep(self.add_delay).await;

        match self.lines.iter_mut().find(|l| l.product.id == product.id) {
            Some(line) => line.quantity += 1,
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: 1,
            }),
        }
        self.adding = false;

        debug!(product_id = product.id, "added to cart");
        Ok(())
    }

    /// Set a line's quantity. Zero or negative removes the line;
    /// values above the stock snapshot are clamped to it. No
    /// server-side stock re-check occurs.
    pub fn update_quantity(&mut self, product_id: i64, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity.min(line.product.total_items_in_stock);
        }
    }

    /// Remove a line unconditionally. Idempotent if absent.
    pub fn remove(&mut self, product_id: i64) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Attempt checkout. An empty cart is reported as such and left
    /// unchanged; otherwise the total is reported and the cart cleared
    /// unconditionally. Simulated: no payment or inventory-decrement
    /// call reaches the backend.
    pub fn checkout(&mut self) -> CheckoutOutcome {
        if self.lines.is_empty() {
            return CheckoutOutcome::EmptyCart;
        }
        let total = self.total();
        self.lines.clear();
        debug!(total, "checkout complete");
        CheckoutOutcome::Placed { total }
    }
}
