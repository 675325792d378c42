//! # Storefront Engine
//!
//! Drives the cart and checkout rules from wellness-core against the
//! backend collaborators.
//!
//! ## Order Submission Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  submit_order()                                                        │
//! │    │                                                                    │
//! │    ├── no session?            → AuthRequired      (no network call)    │
//! │    ├── not CHECKOUT_OPEN?     → InvalidTransition                      │
//! │    ├── draft invalid?         → Validation        (no network call)    │
//! │    │                                                                    │
//! │    ▼  SUBMITTING                                                        │
//! │  for each cart line, in order:                                         │
//! │    POST /sales ──► ok? next line                                       │
//! │                └─► err? FAILED, OrderSubmission { committed, total }   │
//! │                         cart and draft kept for retry                  │
//! │    ▼                                                                    │
//! │  COMPLETE: receipt issued, cart cleared, draft dropped                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lines are sent one at a time. There is no rollback: a failure after the
//! first line leaves the earlier lines recorded, and a retry sends them
//! again.
//!
//! ## Single Writer
//! Every mutating method takes `&mut self`. A submission in flight holds
//! that borrow, so nothing can touch the cart while it runs.

use chrono::Utc;
use tracing::{debug, error, info, warn};
use wellness_core::{
    build_order_records, AddOutcome, Cart, CartTotals, Catalog, CheckoutAction, CheckoutDraft,
    CheckoutPhase, CoreError, DeliveryMethod, Money, Product, ProductId, QuantityChange, Receipt,
    StockPolicy,
};

use crate::api::{AuthToken, CatalogApi, OrderApi};
use crate::config::ClientConfig;
use crate::error::{StorefrontError, StorefrontResult};
use crate::session::{require, Session};

// =============================================================================
// Settings
// =============================================================================

/// The parts of [`ClientConfig`] the engine needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorefrontSettings {
    pub only_available: bool,
    pub delivery_surcharge: Money,
    pub stock_policy: StockPolicy,
}

impl Default for StorefrontSettings {
    fn default() -> Self {
        StorefrontSettings::from(&ClientConfig::default())
    }
}

impl From<&ClientConfig> for StorefrontSettings {
    fn from(config: &ClientConfig) -> Self {
        StorefrontSettings {
            only_available: config.api.only_available,
            delivery_surcharge: config.delivery_surcharge(),
            stock_policy: config.stock_policy(),
        }
    }
}

// =============================================================================
// Storefront
// =============================================================================

pub struct Storefront<A> {
    api: A,
    settings: StorefrontSettings,
    catalog: Catalog,
    session: Option<Session>,
}

impl<A> Storefront<A>
where
    A: CatalogApi + OrderApi,
{
    pub fn new(api: A, settings: StorefrontSettings) -> Self {
        Storefront {
            api,
            settings,
            catalog: Catalog::default(),
            session: None,
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn settings(&self) -> &StorefrontSettings {
        &self.settings
    }

    // =========================================================================
    // Session
    // =========================================================================

    /// Starts a fresh session, replacing any previous one.
    pub fn login(&mut self, token: &str) -> StorefrontResult<()> {
        let token = AuthToken::new(token).ok_or(StorefrontError::AuthRequired)?;
        if self.session.is_some() {
            debug!("Replacing existing session");
        }
        self.session = Some(Session::new(token, self.settings.stock_policy));
        info!("Session started");
        Ok(())
    }

    /// Drops the session with its cart and checkout form.
    pub fn logout(&mut self) -> bool {
        let had_session = self.session.take().is_some();
        if had_session {
            info!("Session ended");
        }
        had_session
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    // =========================================================================
    // Catalog
    // =========================================================================

    /// Re-fetches the product list and re-syncs cart stock ceilings.
    ///
    /// Returns the number of sellable products.
    pub async fn refresh_catalog(&mut self) -> StorefrontResult<usize> {
        let products = self.api.list_products(self.settings.only_available).await?;
        let fetched = products.len();
        self.catalog = Catalog::from_products(products, Utc::now().date_naive());

        info!(fetched, sellable = self.catalog.len(), "Catalog refreshed");

        if let Some(session) = self.session.as_mut() {
            let clamped = session.cart.sync_stock(&self.catalog);
            if clamped > 0 {
                warn!(clamped, "Cart lines clamped to new stock levels");
            }
        }

        Ok(self.catalog.len())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn browse(&self, search: &str, category: &str) -> Vec<&Product> {
        self.catalog.browse(search, category)
    }

    pub fn categories(&self) -> Vec<String> {
        self.catalog.categories()
    }

    // =========================================================================
    // Cart
    // =========================================================================

    /// Adds one unit of a catalog product.
    pub fn add_to_cart(&mut self, product_id: ProductId) -> StorefrontResult<AddOutcome> {
        let session = require(&mut self.session)?;
        let product = self
            .catalog
            .get(product_id)
            .ok_or(CoreError::ProductNotFound(product_id))?;

        let outcome = session.cart.add(product)?;
        match outcome {
            AddOutcome::Capped(quantity) => {
                debug!(product_id = %product_id, quantity, "Add capped at stock")
            }
            _ => debug!(product_id = %product_id, ?outcome, "Added to cart"),
        }
        Ok(outcome)
    }

    pub fn update_quantity(&mut self, product_id: ProductId, delta: i64) -> StorefrontResult<QuantityChange> {
        let session = require(&mut self.session)?;
        let change = session.cart.update_quantity(product_id, delta)?;
        debug!(product_id = %product_id, delta, ?change, "Cart quantity changed");
        Ok(change)
    }

    pub fn remove_from_cart(&mut self, product_id: ProductId) -> StorefrontResult<bool> {
        let session = require(&mut self.session)?;
        let removed = session.cart.remove(product_id);
        if removed {
            debug!(product_id = %product_id, "Removed from cart");
        }
        Ok(removed)
    }

    pub fn cart(&self) -> Option<&Cart> {
        self.session.as_ref().map(|s| &s.cart)
    }

    /// Totals with the configured delivery surcharge.
    pub fn totals(&self, delivery: DeliveryMethod) -> StorefrontResult<CartTotals> {
        let session = self.session.as_ref().ok_or(StorefrontError::AuthRequired)?;
        Ok(session
            .cart
            .totals_with(delivery, self.settings.delivery_surcharge))
    }

    // =========================================================================
    // Checkout Flow
    // =========================================================================

    /// `BROWSING` when signed out.
    pub fn phase(&self) -> CheckoutPhase {
        self.session
            .as_ref()
            .map_or(CheckoutPhase::Browsing, Session::phase)
    }

    pub fn open_cart(&mut self) -> StorefrontResult<()> {
        let session = require(&mut self.session)?;
        session.flow.open_cart()?;
        Ok(())
    }

    /// Enters the checkout form with an empty draft.
    pub fn proceed_to_checkout(&mut self) -> StorefrontResult<&mut CheckoutDraft> {
        let session = require(&mut self.session)?;
        session.flow.proceed(&session.cart)?;
        Ok(session.draft.insert(CheckoutDraft::default()))
    }

    /// The form being filled in, while checkout is open.
    pub fn draft_mut(&mut self) -> StorefrontResult<&mut CheckoutDraft> {
        let session = require(&mut self.session)?;
        let phase = session.flow.phase();
        match session.draft.as_mut() {
            Some(draft) if phase == CheckoutPhase::CheckoutOpen => Ok(draft),
            _ => Err(CoreError::InvalidTransition {
                from: phase,
                action: CheckoutAction::Proceed,
            }
            .into()),
        }
    }

    /// `FAILED → CHECKOUT_OPEN`, keeping cart and draft.
    pub fn retry_checkout(&mut self) -> StorefrontResult<()> {
        let session = require(&mut self.session)?;
        session.flow.retry()?;
        Ok(())
    }

    /// Back to browsing. Discards the draft when one was open.
    pub fn close(&mut self) -> StorefrontResult<()> {
        let Some(session) = self.session.as_mut() else {
            return Ok(());
        };

        let closed = session.flow.close()?;
        if closed.holds_draft() {
            session.draft = None;
        }
        Ok(())
    }

    /// Validates the form and submits one order record per cart line.
    pub async fn submit_order(&mut self) -> StorefrontResult<Receipt> {
        let session = require(&mut self.session)?;

        let phase = session.flow.phase();
        if phase != CheckoutPhase::CheckoutOpen {
            return Err(CoreError::InvalidTransition {
                from: phase,
                action: CheckoutAction::Submit,
            }
            .into());
        }

        let context = session
            .draft
            .as_ref()
            .map(CheckoutDraft::validate)
            .unwrap_or_else(|| CheckoutDraft::default().validate())?;

        if session.cart.is_empty() {
            return Err(CoreError::EmptyCart.into());
        }

        session.flow.begin_submit()?;

        let sale_date = Utc::now();
        let records = build_order_records(&session.cart, &context, sale_date);
        let total = records.len();
        info!(lines = total, payment = %context.payment_method, "Submitting order");

        for (committed, record) in records.iter().enumerate() {
            if let Err(source) = self.api.create_order(record, &session.token).await {
                session.flow.fail()?;
                error!(committed, total, error = %source, "Order submission failed");
                return Err(StorefrontError::OrderSubmission {
                    committed,
                    total,
                    source,
                });
            }
            debug!(
                product_id = %record.product_id,
                quantity = record.quantity,
                line = committed + 1,
                total,
                "Order line committed"
            );
        }

        let receipt = Receipt::issue(
            &session.cart,
            &context,
            self.settings.delivery_surcharge,
            sale_date,
        );
        session.cart.clear();
        session.draft = None;
        session.flow.succeed()?;

        info!(receipt_id = %receipt.id, total = %receipt.total, "Order complete");
        Ok(receipt)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
