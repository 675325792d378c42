//! # Domain Types
//!
//! Core domain types used throughout the Wellness storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │ PaymentMethod   │   │ DeliveryMethod  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (i64)       │   │  Cash           │   │  Pickup         │       │
//! │  │  name           │   │  MobileMoney    │   │  HomeDelivery   │       │
//! │  │  selling_price  │   │  Card           │   └─────────────────┘       │
//! │  │  quantity       │   │  BankTransfer   │                              │
//! │  │  expiry_date    │   └─────────────────┘   ┌─────────────────┐       │
//! │  └─────────────────┘                         │  StockPolicy    │       │
//! │                                              │  Clamp / Strict │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are read-only here. The backend owns them; the storefront only
//! holds the last-fetched snapshot.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Backend-issued product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(transparent)]
#[ts(export)]
pub struct ProductId(i64);

impl ProductId {
    #[inline]
    pub const fn new(raw: i64) -> Self {
        ProductId(raw)
    }

    #[inline]
    pub const fn get(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A medicine offered by the pharmacy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,

    /// Display name shown in the catalog and on the receipt.
    pub name: String,

    pub category: String,

    pub description: Option<String>,

    /// Current shelf price.
    pub selling_price: Money,

    /// Units in stock at the time of the fetch.
    pub quantity: u32,

    #[ts(as = "Option<String>")]
    pub expiry_date: Option<NaiveDate>,

    /// Backend's own expiry flag. May lag behind `expiry_date`.
    pub is_expired: bool,
}

impl Product {
    /// Whether the product may enter a cart on `today`.
    ///
    /// ## Rules
    /// - At least one unit in stock
    /// - Not flagged expired by the backend
    /// - Expiry date (when known) not in the past
    pub fn is_available_on(&self, today: NaiveDate) -> bool {
        if self.quantity == 0 || self.is_expired {
            return false;
        }

        match self.expiry_date {
            Some(expiry) => expiry >= today,
            None => true,
        }
    }

    /// [`Product::is_available_on`] against the current UTC date.
    pub fn is_available(&self) -> bool {
        self.is_available_on(Utc::now().date_naive())
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How the customer settles the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    #[default]
    Cash,
    MobileMoney,
    Card,
    BankTransfer,
}

impl PaymentMethod {
    /// Wire and receipt label.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "CASH",
            PaymentMethod::MobileMoney => "MOBILE_MONEY",
            PaymentMethod::Card => "CARD",
            PaymentMethod::BankTransfer => "BANK_TRANSFER",
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Delivery Method
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryMethod {
    /// Customer collects at the counter.
    #[default]
    Pickup,
    /// Courier to the customer's address, flat surcharge applies.
    HomeDelivery,
}

impl DeliveryMethod {
    pub const fn as_str(&self) -> &'static str {
        match self {
            DeliveryMethod::Pickup => "PICKUP",
            DeliveryMethod::HomeDelivery => "HOME_DELIVERY",
        }
    }
}

impl fmt::Display for DeliveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Stock Policy
// =============================================================================

/// What the cart does when an increment would pass the stock ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Cap the quantity at the ceiling and report `Capped`.
    #[default]
    Clamp,
    /// Refuse with `CoreError::StockExceeded`, leaving the line as it was.
    Strict,
}

// =============================================================================
// Unit Tests
// =============================================================================
