//! # wellness-core: Pure Business Logic for the Wellness Storefront
//!
//! This crate is the **heart** of the storefront. It contains the cart,
//! checkout and location-selection rules as plain data and functions with
//! zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Wellness Storefront Architecture                    │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │              apps/storefront (CLI) / web frontend               │   │
//! │  │    Catalog ──► Cart ──► Checkout form ──► Receipt              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        wellness-client (Storefront, LocationSelector)           │   │
//! │  │    session, REST calls, async drivers                          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              ★ wellness-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────────────┐  │   │
//! │  │   │  money   │ │   cart   │ │ checkout │ │     location     │  │   │
//! │  │   │  Money   │ │   Cart   │ │   Flow   │ │ LocationResolver │  │   │
//! │  │   │          │ │ CartLine │ │  Draft   │ │   FetchTicket    │  │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • NO FILES                                │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Product, payment and delivery types
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`catalog`] - Snapshot of sellable products
//! - [`cart`] - Cart lines, stock ceilings, totals
//! - [`checkout`] - Checkout state machine, form, order records
//! - [`receipt`] - Itemized receipt
//! - [`location`] - Cascading location resolver
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout form validation
//!
//! ## Example Usage
//!
//! ```rust
//! use wellness_core::{Cart, DeliveryMethod, Money, Product, ProductId};
//!
//! let product = Product {
//!     id: ProductId::new(1),
//!     name: "Paracetamol 500mg".to_string(),
//!     category: "ANALGESIC".to_string(),
//!     description: None,
//!     selling_price: Money::from_major(500),
//!     quantity: 10,
//!     expiry_date: None,
//!     is_expired: false,
//! };
//!
//! let mut cart = Cart::new();
//! cart.add(&product).unwrap();
//! cart.add(&product).unwrap();
//!
//! assert_eq!(cart.total(DeliveryMethod::Pickup), Money::from_major(1000));
//! assert_eq!(cart.total(DeliveryMethod::HomeDelivery), Money::from_major(3000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod error;
pub mod location;
pub mod money;
pub mod receipt;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use wellness_core::Cart` instead of
// `use wellness_core::cart::Cart`

pub use cart::{AddOutcome, Cart, CartLine, CartTotals, QuantityChange};
pub use catalog::Catalog;
pub use checkout::{
    build_order_records, CheckoutAction, CheckoutContext, CheckoutDraft, CheckoutFlow,
    CheckoutPhase, Delivery, OrderRecord,
};
pub use error::{CoreError, CoreResult, ValidationError};
pub use location::{
    ApplyOutcome, FetchTicket, LocationId, LocationLevel, LocationNode, LocationResolver,
};
pub use money::Money;
pub use receipt::{Receipt, ReceiptLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Flat fee added to the total for home delivery (RWF 2000.00).
pub const HOME_DELIVERY_SURCHARGE: Money = Money::from_major(2000);

/// Currency the backend prices in.
pub const DEFAULT_CURRENCY: &str = "RWF";
