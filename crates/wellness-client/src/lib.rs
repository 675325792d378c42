//! # wellness-client: Backend Plumbing for the Wellness Storefront
//!
//! Connects the pure rules in `wellness-core` to the pharmacy REST backend.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         wellness-client                                 │
//! │                                                                         │
//! │  ┌──────────────────────────────┐   ┌──────────────────────────────┐   │
//! │  │ Storefront<A>                │   │ LocationSelector<L>          │   │
//! │  │                              │   │                              │   │
//! │  │ login / logout               │   │ initialize                   │   │
//! │  │ refresh_catalog, browse      │   │ select(level, id)            │   │
//! │  │ add_to_cart, update_quantity │   │ stale responses dropped      │   │
//! │  │ proceed, submit_order        │   │ by ticket generation         │   │
//! │  └──────────────┬───────────────┘   └──────────────┬───────────────┘   │
//! │                 │ CatalogApi + OrderApi            │ LocationApi       │
//! │                 └───────────────┬──────────────────┘                   │
//! │                                 ▼                                       │
//! │                  ┌──────────────────────────────┐                       │
//! │                  │ HttpApi (reqwest)            │                       │
//! │                  │ /medicines, /sales,          │                       │
//! │                  │ /locations/*                 │                       │
//! │                  └──────────────────────────────┘                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`api`] - Collaborator traits, wire DTOs, HTTP implementation
//! - [`config`] - TOML configuration with environment overrides
//! - [`error`] - Client and storefront error types
//! - [`locations`] - Async driver for the location resolver
//! - [`session`] - Signed-in state: token, cart, checkout
//! - [`storefront`] - Cart and checkout engine
//!
//! ## Usage
//!
//! ```rust,ignore
//! use wellness_client::{ClientConfig, HttpApi, Storefront, StorefrontSettings};
//!
//! let config = ClientConfig::load_or_default(None);
//! let api = HttpApi::from_config(&config)?;
//! let mut store = Storefront::new(api, StorefrontSettings::from(&config));
//!
//! store.login(&token)?;
//! store.refresh_catalog().await?;
//! store.add_to_cart(product_id)?;
//! store.open_cart()?;
//! let draft = store.proceed_to_checkout()?;
//! draft.customer_name = "Aline".into();
//! draft.customer_phone = "0788123456".into();
//! let receipt = store.submit_order().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod api;
pub mod config;
pub mod error;
pub mod locations;
pub mod session;
pub mod storefront;

// =============================================================================
// Re-exports
// =============================================================================

pub use api::{AuthToken, CatalogApi, HttpApi, LocationApi, OrderApi};
pub use config::{ApiSettings, CheckoutSettings, ClientConfig, StoreSettings};
pub use error::{
    ClientError, ClientResult, ErrorKind, Recovery, StorefrontError, StorefrontResult,
};
pub use locations::LocationSelector;
pub use session::Session;
pub use storefront::{Storefront, StorefrontSettings};
