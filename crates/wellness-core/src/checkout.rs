//! # Checkout
//!
//! The checkout state machine, the checkout form, and the order records a
//! submission turns into.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   BROWSING ──open_cart──► CART_OPEN ──proceed──► CHECKOUT_OPEN          │
//! │      ▲                        │      (non-empty)      │    ▲            │
//! │      │                        │                       │    │            │
//! │      └─────────close──────────┘               submit  │    │ retry      │
//! │      ▲    (from any open phase)                       ▼    │            │
//! │      │                                          SUBMITTING │            │
//! │      │                                          │        │ │            │
//! │      │                                   succeed│    fail│ │            │
//! │      │                                          ▼        ▼ │            │
//! │      └────────close──────────────────────  COMPLETE    FAILED           │
//! │                                                                         │
//! │  SUBMITTING cannot be closed: a submission runs to its end.            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Form Lifecycle
//! `CheckoutDraft` is the loosely-filled form. `CheckoutDraft::validate` is
//! the only way to get a `CheckoutContext`, so an address-less home
//! delivery cannot exist past validation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::cart::Cart;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{DeliveryMethod, PaymentMethod, ProductId};
use crate::validation::{
    validate_customer_email, validate_customer_name, validate_customer_phone,
    validate_delivery_address, ValidationResult,
};

// =============================================================================
// Phases and Actions
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckoutPhase {
    #[default]
    Browsing,
    CartOpen,
    CheckoutOpen,
    Submitting,
    Complete,
    Failed,
}

impl CheckoutPhase {
    pub const fn as_str(&self) -> &'static str {
        match self {
            CheckoutPhase::Browsing => "BROWSING",
            CheckoutPhase::CartOpen => "CART_OPEN",
            CheckoutPhase::CheckoutOpen => "CHECKOUT_OPEN",
            CheckoutPhase::Submitting => "SUBMITTING",
            CheckoutPhase::Complete => "COMPLETE",
            CheckoutPhase::Failed => "FAILED",
        }
    }

    /// Phases in which a checkout form is being held.
    pub const fn holds_draft(&self) -> bool {
        matches!(
            self,
            CheckoutPhase::CheckoutOpen | CheckoutPhase::Submitting | CheckoutPhase::Failed
        )
    }
}

impl fmt::Display for CheckoutPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CheckoutAction {
    OpenCart,
    Proceed,
    Submit,
    Succeed,
    Fail,
    Retry,
    Close,
}

impl fmt::Display for CheckoutAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CheckoutAction::OpenCart => "open cart",
            CheckoutAction::Proceed => "proceed to checkout",
            CheckoutAction::Submit => "submit",
            CheckoutAction::Succeed => "complete",
            CheckoutAction::Fail => "fail",
            CheckoutAction::Retry => "retry",
            CheckoutAction::Close => "close",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Checkout Flow
// =============================================================================

/// Current checkout phase plus the legal moves out of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckoutFlow {
    phase: CheckoutPhase,
}

impl CheckoutFlow {
    pub fn new() -> Self {
        CheckoutFlow::default()
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.phase
    }

    fn advance(&mut self, action: CheckoutAction, allowed: bool, next: CheckoutPhase) -> CoreResult<()> {
        if !allowed {
            return Err(CoreError::InvalidTransition {
                from: self.phase,
                action,
            });
        }
        self.phase = next;
        Ok(())
    }

    pub fn open_cart(&mut self) -> CoreResult<()> {
        let allowed = self.phase == CheckoutPhase::Browsing;
        self.advance(CheckoutAction::OpenCart, allowed, CheckoutPhase::CartOpen)
    }

    /// `CART_OPEN → CHECKOUT_OPEN`, refused for an empty cart.
    pub fn proceed(&mut self, cart: &Cart) -> CoreResult<()> {
        let allowed = self.phase == CheckoutPhase::CartOpen;
        if allowed && cart.is_empty() {
            return Err(CoreError::EmptyCart);
        }
        self.advance(CheckoutAction::Proceed, allowed, CheckoutPhase::CheckoutOpen)
    }

    pub fn begin_submit(&mut self) -> CoreResult<()> {
        let allowed = self.phase == CheckoutPhase::CheckoutOpen;
        self.advance(CheckoutAction::Submit, allowed, CheckoutPhase::Submitting)
    }

    pub fn succeed(&mut self) -> CoreResult<()> {
        let allowed = self.phase == CheckoutPhase::Submitting;
        self.advance(CheckoutAction::Succeed, allowed, CheckoutPhase::Complete)
    }

    pub fn fail(&mut self) -> CoreResult<()> {
        let allowed = self.phase == CheckoutPhase::Submitting;
        self.advance(CheckoutAction::Fail, allowed, CheckoutPhase::Failed)
    }

    /// `FAILED → CHECKOUT_OPEN`; cart and draft are left alone.
    pub fn retry(&mut self) -> CoreResult<()> {
        let allowed = self.phase == CheckoutPhase::Failed;
        self.advance(CheckoutAction::Retry, allowed, CheckoutPhase::CheckoutOpen)
    }

    /// Back to `BROWSING`. Returns the phase that was closed.
    ///
    /// No-op from `BROWSING`, refused while `SUBMITTING`.
    pub fn close(&mut self) -> CoreResult<CheckoutPhase> {
        let from = self.phase;
        let allowed = from != CheckoutPhase::Submitting;
        self.advance(CheckoutAction::Close, allowed, CheckoutPhase::Browsing)?;
        Ok(from)
    }
}

// =============================================================================
// Checkout Form
// =============================================================================

/// The checkout form as the customer is filling it in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDraft {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: String,
    pub delivery_method: DeliveryMethod,
    pub delivery_address: String,
    pub payment_method: PaymentMethod,
}

impl CheckoutDraft {
    /// Validated constructor for [`CheckoutContext`].
    ///
    /// ## Rules
    /// - Name and phone required
    /// - Email optional, must look like an address when given
    /// - Address required only for home delivery
    pub fn validate(&self) -> ValidationResult<CheckoutContext> {
        let customer_name = validate_customer_name(&self.customer_name)?;
        let customer_phone = validate_customer_phone(&self.customer_phone)?;
        let customer_email = validate_customer_email(&self.customer_email)?;

        let delivery = match self.delivery_method {
            DeliveryMethod::Pickup => Delivery::Pickup,
            DeliveryMethod::HomeDelivery => Delivery::HomeDelivery {
                address: validate_delivery_address(&self.delivery_address)?,
            },
        };

        Ok(CheckoutContext {
            customer_name,
            customer_phone,
            customer_email,
            delivery,
            payment_method: self.payment_method,
        })
    }
}

/// Delivery choice with the address carried only where it is needed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Delivery {
    Pickup,
    HomeDelivery { address: String },
}

impl Delivery {
    pub fn method(&self) -> DeliveryMethod {
        match self {
            Delivery::Pickup => DeliveryMethod::Pickup,
            Delivery::HomeDelivery { .. } => DeliveryMethod::HomeDelivery,
        }
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Delivery::Pickup => None,
            Delivery::HomeDelivery { address } => Some(address),
        }
    }
}

/// A validated checkout form. Fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutContext {
    pub customer_name: String,
    pub customer_phone: String,
    pub customer_email: Option<String>,
    pub delivery: Delivery,
    pub payment_method: PaymentMethod,
}

// =============================================================================
// Order Records
// =============================================================================

/// One sale record per cart line, as sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: u32,
    pub total_price: Money,
    pub customer_name: String,
    pub customer_phone: String,
    pub payment_method: PaymentMethod,
    pub sale_date: DateTime<Utc>,
}

/// Builds the records for a submission, in cart order, sharing `sale_date`.
pub fn build_order_records(
    cart: &Cart,
    context: &CheckoutContext,
    sale_date: DateTime<Utc>,
) -> Vec<OrderRecord> {
    cart.lines()
        .iter()
        .map(|line| OrderRecord {
            product_id: line.product_id,
            product_name: line.name.clone(),
            quantity: line.quantity,
            total_price: line.line_total(),
            customer_name: context.customer_name.clone(),
            customer_phone: context.customer_phone.clone(),
            payment_method: context.payment_method,
            sale_date,
        })
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::types::Product;

    fn cart_with_lines() -> Cart {
        let mut cart = Cart::new();
        for (id, price, times) in [(1, 500, 2), (2, 1200, 1)] {
            let product = Product {
                id: ProductId::new(id),
                name: format!("Medicine {}", id),
                category: "GENERAL".to_string(),
                description: None,
                selling_price: Money::from_major(price),
                quantity: 10,
                expiry_date: None,
                is_expired: false,
            };
            for _ in 0..times {
                cart.add(&product).unwrap();
            }
        }
        cart
    }

    fn filled_draft() -> CheckoutDraft {
        CheckoutDraft {
            customer_name: "  Aline Uwase ".to_string(),
            customer_phone: "+250 788 123 456".to_string(),
            ..CheckoutDraft::default()
        }
    }

    #[test]
    fn test_happy_path_transitions() {
        let cart = cart_with_lines();
        let mut flow = CheckoutFlow::new();

        flow.open_cart().unwrap();
        flow.proceed(&cart).unwrap();
        flow.begin_submit().unwrap();
        flow.succeed().unwrap();
        assert_eq!(flow.phase(), CheckoutPhase::Complete);

        assert_eq!(flow.close().unwrap(), CheckoutPhase::Complete);
        assert_eq!(flow.phase(), CheckoutPhase::Browsing);
    }

    #[test]
    fn test_failure_then_retry() {
        let cart = cart_with_lines();
        let mut flow = CheckoutFlow::new();
        flow.open_cart().unwrap();
        flow.proceed(&cart).unwrap();
        flow.begin_submit().unwrap();
        flow.fail().unwrap();
        assert_eq!(flow.phase(), CheckoutPhase::Failed);

        flow.retry().unwrap();
        assert_eq!(flow.phase(), CheckoutPhase::CheckoutOpen);
    }

    #[test]
    fn test_proceed_with_empty_cart() {
        let mut flow = CheckoutFlow::new();
        flow.open_cart().unwrap();

        assert_eq!(flow.proceed(&Cart::new()).unwrap_err(), CoreError::EmptyCart);
        assert_eq!(flow.phase(), CheckoutPhase::CartOpen);
    }

    #[test]
    fn test_invalid_transitions() {
        let mut flow = CheckoutFlow::new();
        assert_eq!(
            flow.begin_submit().unwrap_err(),
            CoreError::InvalidTransition {
                from: CheckoutPhase::Browsing,
                action: CheckoutAction::Submit,
            }
        );

        // Closing while browsing is a no-op.
        assert_eq!(flow.close().unwrap(), CheckoutPhase::Browsing);

        flow.open_cart().unwrap();
        flow.proceed(&cart_with_lines()).unwrap();
        flow.begin_submit().unwrap();
        assert!(matches!(
            flow.close().unwrap_err(),
            CoreError::InvalidTransition {
                from: CheckoutPhase::Submitting,
                action: CheckoutAction::Close,
            }
        ));
        assert_eq!(flow.phase(), CheckoutPhase::Submitting);
    }

    #[test]
    fn test_draft_validation() {
        let context = filled_draft().validate().unwrap();
        assert_eq!(context.customer_name, "Aline Uwase");
        assert_eq!(context.customer_email, None);
        assert_eq!(context.delivery, Delivery::Pickup);
        assert_eq!(context.payment_method, PaymentMethod::Cash);

        let mut draft = filled_draft();
        draft.customer_name = "   ".to_string();
        assert!(matches!(
            draft.validate().unwrap_err(),
            ValidationError::Required { .. }
        ));
    }

    #[test]
    fn test_home_delivery_requires_address() {
        let mut draft = filled_draft();
        draft.delivery_method = DeliveryMethod::HomeDelivery;
        let err = draft.validate().unwrap_err();
        assert_eq!(err.field(), "delivery address");

        draft.delivery_address = "KG 11 Ave, Kigali".to_string();
        let context = draft.validate().unwrap();
        assert_eq!(context.delivery.method(), DeliveryMethod::HomeDelivery);
        assert_eq!(context.delivery.address(), Some("KG 11 Ave, Kigali"));
    }

    #[test]
    fn test_order_records_follow_cart_order() {
        let cart = cart_with_lines();
        let context = filled_draft().validate().unwrap();
        let now = Utc::now();

        let records = build_order_records(&cart, &context, now);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].product_id, ProductId::new(1));
        assert_eq!(records[0].quantity, 2);
        assert_eq!(records[0].total_price, Money::from_major(1000));
        assert_eq!(records[1].total_price, Money::from_major(1200));
        assert!(records.iter().all(|r| r.sale_date == now));
    }
}
