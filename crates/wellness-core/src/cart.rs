//! # Cart
//!
//! The in-memory shopping cart and its stock-ceiling rules.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Customer Action          Cart Method             Line Change           │
//! │  ───────────────          ───────────             ───────────           │
//! │                                                                         │
//! │  Click "Add" ────────────► add() ───────────────► insert qty 1         │
//! │                                                   or qty + 1 (capped)   │
//! │                                                                         │
//! │  Press +/- ──────────────► update_quantity() ───► qty + delta          │
//! │                                                   ≤ 0 removes the line  │
//! │                                                                         │
//! │  Click Remove ───────────► remove() ────────────► line gone            │
//! │                                                                         │
//! │  Catalog refresh ────────► sync_stock() ────────► ceilings re-read     │
//! │                                                                         │
//! │  INVARIANT: 1 ≤ quantity ≤ stock_ceiling for every line                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Price Freezing
//! `unit_price` is captured when a line is inserted and never refreshed.
//! Removing a line and adding the product again re-captures it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DeliveryMethod, Product, ProductId, StockPolicy};
use crate::HOME_DELIVERY_SURCHARGE;

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart.
///
/// ## Snapshot Fields
/// - `name`, `unit_price`: frozen when the line is inserted
/// - `stock_ceiling`: product quantity from the most recent snapshot seen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: u32,
    pub stock_ceiling: u32,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartLine {
    fn from_product(product: &Product) -> Self {
        CartLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.selling_price,
            quantity: 1,
            stock_ceiling: product.quantity,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    pub fn line_total(&self) -> Money {
        self.unit_price * self.quantity
    }
}

// =============================================================================
// Outcomes
// =============================================================================

/// Result of a successful [`Cart::add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// New line with quantity 1.
    Inserted,
    /// Existing line went up by one.
    Incremented(u32),
    /// Existing line was already at its ceiling; quantity held there.
    Capped(u32),
}

/// Result of a successful [`Cart::update_quantity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    Updated(u32),
    Capped(u32),
    Removed,
    NotInCart,
}

// =============================================================================
// Cart
// =============================================================================

/// Ordered cart lines, at most one per product.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    lines: Vec<CartLine>,
    #[serde(skip)]
    policy: StockPolicy,
}

impl Cart {
    /// Creates an empty cart with the default (clamping) stock policy.
    pub fn new() -> Self {
        Cart::default()
    }

    pub fn with_policy(policy: StockPolicy) -> Self {
        Cart {
            lines: Vec::new(),
            policy,
        }
    }

    pub fn policy(&self) -> StockPolicy {
        self.policy
    }

    /// Adds one unit of `product`.
    ///
    /// ## Behavior
    /// - Unavailable product (no stock, expired): `ProductUnavailable`
    /// - Already in cart: +1, held at the product's stock (`Capped`), or
    ///   `StockExceeded` under the strict policy
    /// - Otherwise: new line, quantity 1, price captured now
    ///
    /// Re-adding refreshes the line's stock ceiling from `product`, never
    /// its unit price.
    pub fn add(&mut self, product: &Product) -> CoreResult<AddOutcome> {
        if !product.is_available() {
            return Err(CoreError::ProductUnavailable(product.id));
        }

        let policy = self.policy;
        let Some(line) = self.line_mut(product.id) else {
            self.lines.push(CartLine::from_product(product));
            return Ok(AddOutcome::Inserted);
        };

        let ceiling = product.quantity;
        let requested = line.quantity + 1;
        if requested <= ceiling {
            line.stock_ceiling = ceiling;
            line.quantity = requested;
            return Ok(AddOutcome::Incremented(requested));
        }

        match policy {
            StockPolicy::Clamp => {
                line.stock_ceiling = ceiling;
                line.quantity = ceiling;
                Ok(AddOutcome::Capped(ceiling))
            }
            StockPolicy::Strict => Err(CoreError::StockExceeded {
                product_id: product.id,
                available: ceiling,
                requested,
            }),
        }
    }

    /// Moves a line's quantity by `delta` within `1..=stock_ceiling`.
    ///
    /// A result of zero or less removes the line. Unknown ids are a no-op.
    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) -> CoreResult<QuantityChange> {
        let policy = self.policy;
        let Some(line) = self.line_mut(product_id) else {
            return Ok(QuantityChange::NotInCart);
        };

        let target = i64::from(line.quantity).saturating_add(delta);
        if target <= 0 {
            self.remove(product_id);
            return Ok(QuantityChange::Removed);
        }

        let ceiling = i64::from(line.stock_ceiling);
        if target <= ceiling {
            line.quantity = target as u32;
            return Ok(QuantityChange::Updated(line.quantity));
        }

        match policy {
            StockPolicy::Clamp => {
                line.quantity = line.stock_ceiling;
                Ok(QuantityChange::Capped(line.quantity))
            }
            StockPolicy::Strict => Err(CoreError::StockExceeded {
                product_id,
                available: line.stock_ceiling,
                requested: u32::try_from(target).unwrap_or(u32::MAX),
            }),
        }
    }

    /// Deletes the line for `product_id`. Returns whether a line was removed.
    pub fn remove(&mut self, product_id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Re-reads stock ceilings from a fresh catalog snapshot.
    ///
    /// Lines whose product is still offered take its current quantity as
    /// their ceiling, clamping down when stock dropped. Lines whose product
    /// vanished keep their old ceiling; the cart never drops lines on its
    /// own. Returns how many lines were clamped.
    pub fn sync_stock(&mut self, catalog: &Catalog) -> usize {
        let mut clamped = 0;
        for line in &mut self.lines {
            let Some(product) = catalog.get(line.product_id) else {
                continue;
            };
            if product.quantity == 0 {
                continue;
            }
            line.stock_ceiling = product.quantity;
            if line.quantity > line.stock_ceiling {
                line.quantity = line.stock_ceiling;
                clamped += 1;
            }
        }
        clamped
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id == product_id)
    }

    fn line_mut(&mut self, product_id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn total_quantity(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Σ(unit price × quantity).
    pub fn subtotal(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Subtotal plus the standard home delivery surcharge when applicable.
    ///
    /// ```rust
    /// use wellness_core::{Cart, DeliveryMethod, Money};
    ///
    /// let cart = Cart::new();
    /// assert_eq!(cart.total(DeliveryMethod::Pickup), Money::zero());
    /// ```
    pub fn total(&self, delivery: DeliveryMethod) -> Money {
        self.totals_with(delivery, HOME_DELIVERY_SURCHARGE).total
    }

    /// Full breakdown with a caller-provided surcharge.
    pub fn totals_with(&self, delivery: DeliveryMethod, surcharge: Money) -> CartTotals {
        let subtotal = self.subtotal();
        let delivery_fee = match delivery {
            DeliveryMethod::Pickup => Money::zero(),
            DeliveryMethod::HomeDelivery => surcharge,
        };

        CartTotals {
            line_count: self.line_count(),
            total_quantity: self.total_quantity(),
            subtotal,
            delivery_fee,
            total: subtotal + delivery_fee,
        }
    }
}

/// Cart totals summary for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    pub line_count: usize,
    pub total_quantity: u32,
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub total: Money,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn test_product(id: i64, price_major: i64, quantity: u32) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Medicine {}", id),
            category: "GENERAL".to_string(),
            description: None,
            selling_price: Money::from_major(price_major),
            quantity,
            expiry_date: None,
            is_expired: false,
        }
    }

    #[test]
    fn test_add_inserts_then_increments() {
        let mut cart = Cart::new();
        let product = test_product(1, 500, 5);

        assert_eq!(cart.add(&product).unwrap(), AddOutcome::Inserted);
        assert_eq!(cart.add(&product).unwrap(), AddOutcome::Incremented(2));

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.total_quantity(), 2);
        assert_eq!(cart.subtotal(), Money::from_major(1000));
    }

    #[test]
    fn test_repeated_add_never_passes_stock() {
        let mut cart = Cart::new();
        let product = test_product(1, 500, 3);

        for _ in 0..10 {
            cart.add(&product).unwrap();
        }

        assert_eq!(cart.line(product.id).unwrap().quantity, 3);
        assert_eq!(cart.add(&product).unwrap(), AddOutcome::Capped(3));
    }

    #[test]
    fn test_strict_policy_reports_stock_exceeded() {
        let mut cart = Cart::with_policy(StockPolicy::Strict);
        let product = test_product(1, 500, 1);

        cart.add(&product).unwrap();
        let err = cart.add(&product).unwrap_err();
        assert_eq!(
            err,
            CoreError::StockExceeded {
                product_id: product.id,
                available: 1,
                requested: 2,
            }
        );
        assert_eq!(cart.line(product.id).unwrap().quantity, 1);

        let err = cart.update_quantity(product.id, 4).unwrap_err();
        assert!(matches!(err, CoreError::StockExceeded { requested: 5, .. }));
        assert_eq!(cart.line(product.id).unwrap().quantity, 1);
    }

    #[test]
    fn test_unavailable_product_rejected() {
        let mut cart = Cart::new();
        let mut expired = test_product(1, 500, 5);
        expired.is_expired = true;

        assert_eq!(
            cart.add(&expired).unwrap_err(),
            CoreError::ProductUnavailable(expired.id)
        );
        assert_eq!(
            cart.add(&test_product(2, 500, 0)).unwrap_err(),
            CoreError::ProductUnavailable(ProductId::new(2))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_readd_keeps_price_refreshes_ceiling() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 500, 2);
        cart.add(&product).unwrap();

        product.selling_price = Money::from_major(900);
        product.quantity = 10;
        cart.add(&product).unwrap();

        let line = cart.line(product.id).unwrap();
        assert_eq!(line.unit_price, Money::from_major(500));
        assert_eq!(line.stock_ceiling, 10);
        assert_eq!(line.quantity, 2);
    }

    #[test]
    fn test_remove_then_add_recaptures_price() {
        let mut cart = Cart::new();
        let mut product = test_product(1, 500, 5);
        cart.add(&product).unwrap();
        cart.add(&product).unwrap();

        assert!(cart.remove(product.id));
        assert!(!cart.remove(product.id));

        product.selling_price = Money::from_major(650);
        assert_eq!(cart.add(&product).unwrap(), AddOutcome::Inserted);

        let line = cart.line(product.id).unwrap();
        assert_eq!(line.quantity, 1);
        assert_eq!(line.unit_price, Money::from_major(650));
    }

    #[test]
    fn test_update_quantity() {
        let mut cart = Cart::new();
        let product = test_product(1, 500, 4);
        cart.add(&product).unwrap();

        assert_eq!(cart.update_quantity(product.id, 2).unwrap(), QuantityChange::Updated(3));
        assert_eq!(cart.update_quantity(product.id, 5).unwrap(), QuantityChange::Capped(4));
        assert_eq!(
            cart.update_quantity(ProductId::new(99), 1).unwrap(),
            QuantityChange::NotInCart
        );
    }

    #[test]
    fn test_extreme_deltas_stay_in_bounds() {
        let mut cart = Cart::new();
        let product = test_product(1, 500, 5);
        cart.add(&product).unwrap();

        assert_eq!(
            cart.update_quantity(product.id, i64::MAX).unwrap(),
            QuantityChange::Capped(5)
        );
        assert_eq!(cart.line(product.id).unwrap().quantity, 5);

        let mut strict = Cart::with_policy(StockPolicy::Strict);
        strict.add(&product).unwrap();
        match strict.update_quantity(product.id, i64::MAX).unwrap_err() {
            CoreError::StockExceeded { requested, .. } => assert_eq!(requested, u32::MAX),
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(strict.line(product.id).unwrap().quantity, 1);

        assert_eq!(
            cart.update_quantity(product.id, i64::MIN).unwrap(),
            QuantityChange::Removed
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_decrement_at_one_removes_line() {
        let mut cart = Cart::new();
        let product = test_product(1, 500, 4);
        cart.add(&product).unwrap();

        assert_eq!(cart.update_quantity(product.id, -1).unwrap(), QuantityChange::Removed);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_totals_with_delivery() {
        let mut cart = Cart::new();
        let a = test_product(1, 500, 10);
        let b = test_product(2, 1200, 10);
        cart.add(&a).unwrap();
        cart.add(&a).unwrap();
        cart.add(&b).unwrap();

        assert_eq!(cart.total(DeliveryMethod::Pickup), Money::from_major(2200));
        assert_eq!(cart.total(DeliveryMethod::HomeDelivery), Money::from_major(4200));

        let totals = cart.totals_with(DeliveryMethod::HomeDelivery, Money::from_major(1500));
        assert_eq!(totals.line_count, 2);
        assert_eq!(totals.total_quantity, 3);
        assert_eq!(totals.subtotal, Money::from_major(2200));
        assert_eq!(totals.delivery_fee, Money::from_major(1500));
        assert_eq!(totals.total, Money::from_major(3700));
    }

    #[test]
    fn test_sync_stock_clamps_down_and_keeps_missing() {
        let mut cart = Cart::new();
        let a = test_product(1, 500, 5);
        let b = test_product(2, 700, 5);
        for _ in 0..4 {
            cart.add(&a).unwrap();
        }
        cart.add(&b).unwrap();

        let today = chrono::NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let catalog = Catalog::from_products(vec![test_product(1, 500, 2)], today);

        assert_eq!(cart.sync_stock(&catalog), 1);
        assert_eq!(cart.line(a.id).unwrap().quantity, 2);
        assert_eq!(cart.line(a.id).unwrap().stock_ceiling, 2);
        // Product 2 vanished from the snapshot; its line stays.
        assert_eq!(cart.line(b.id).unwrap().stock_ceiling, 5);
        assert_eq!(cart.line_count(), 2);
    }
}
