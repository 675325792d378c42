//! # Session
//!
//! Everything that exists only while a customer is signed in.
//!
//! ```text
//! Storefront::login(token) ──► Session { token, cart, flow, draft }
//!                                   │
//!              cart / checkout ops ─┤ borrow it mutably
//!                                   │
//! Storefront::logout() ────────────► dropped (cart and draft gone)
//! ```

use wellness_core::{Cart, CheckoutDraft, CheckoutFlow, CheckoutPhase, CoreError, CoreResult, StockPolicy};

use crate::api::AuthToken;

#[derive(Debug)]
pub struct Session {
    pub(crate) token: AuthToken,
    pub(crate) cart: Cart,
    pub(crate) flow: CheckoutFlow,
    /// Present from `proceed` until success or close.
    pub(crate) draft: Option<CheckoutDraft>,
}

impl Session {
    pub(crate) fn new(token: AuthToken, policy: StockPolicy) -> Self {
        Session {
            token,
            cart: Cart::with_policy(policy),
            flow: CheckoutFlow::new(),
            draft: None,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn phase(&self) -> CheckoutPhase {
        self.flow.phase()
    }

    pub fn draft(&self) -> Option<&CheckoutDraft> {
        self.draft.as_ref()
    }
}

/// The signed-in session, or `AuthRequired`.
pub(crate) fn require(session: &mut Option<Session>) -> CoreResult<&mut Session> {
    session.as_mut().ok_or(CoreError::AuthRequired)
}
