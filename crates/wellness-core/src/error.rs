//! # Error Types
//!
//! Domain-specific error types for wellness-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  wellness-core errors (this file)                                      │
//! │  ├── CoreError        - Domain rule violations                         │
//! │  └── ValidationError  - Checkout form input failures                   │
//! │                                                                         │
//! │  wellness-client errors (separate crate)                               │
//! │  ├── ClientError      - HTTP and config failures                       │
//! │  └── StorefrontError  - What the storefront caller sees                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StorefrontError → CLI / frontend  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product id, level, etc.)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

use crate::checkout::{CheckoutAction, CheckoutPhase};
use crate::location::{LocationId, LocationLevel};
use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. None of them are
/// produced by I/O; the client crate wraps them at its boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A cart or order operation was attempted without a session.
    #[error("Sign in to use the cart")]
    AuthRequired,

    /// Requested quantity exceeds the last-fetched stock.
    ///
    /// ## When This Occurs
    /// Only under `StockPolicy::Strict`. The default policy caps silently.
    /// ```text
    /// Add to Cart (line at 3, stock 3)
    ///      │
    ///      ▼
    /// StockExceeded { product_id: 7, available: 3, requested: 4 }
    ///      │
    ///      ▼
    /// UI shows: "Only 3 of product 7 in stock"
    /// ```
    #[error("Insufficient stock for product {product_id}: available {available}, requested {requested}")]
    StockExceeded {
        product_id: ProductId,
        available: u32,
        requested: u32,
    },

    /// Product is out of stock or expired and cannot enter the cart.
    #[error("Product {0} is not available")]
    ProductUnavailable(ProductId),

    /// Product id is not part of the current catalog snapshot.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Checkout cannot start with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// The checkout flow does not allow `action` from `from`.
    #[error("Cannot {action} while checkout is {from}")]
    InvalidTransition {
        from: CheckoutPhase,
        action: CheckoutAction,
    },

    /// Selected id is not among the options currently offered for the level.
    #[error("Location {id} is not offered at {level} level")]
    LocationNotOffered { level: LocationLevel, id: LocationId },

    /// A level was selected before its parent level.
    #[error("Select a {} before choosing a {level}", .level.parent().map(|p| p.as_str()).unwrap_or("parent"))]
    ParentNotSelected { level: LocationLevel },

    /// Selection below the level the resolver was built for.
    #[error("{level} is deeper than the required {target} level")]
    LevelBeyondTarget {
        level: LocationLevel,
        target: LocationLevel,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when checkout form input doesn't meet requirements.
/// They are raised before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., phone with letters, email without '@').
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Name of the offending form field.
    pub fn field(&self) -> &str {
        match self {
            ValidationError::Required { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidFormat { field, .. } => field,
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::StockExceeded {
            product_id: ProductId::new(7),
            available: 3,
            requested: 4,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for product 7: available 3, requested 4"
        );

        let err = CoreError::InvalidTransition {
            from: CheckoutPhase::Submitting,
            action: CheckoutAction::Close,
        };
        assert_eq!(err.to_string(), "Cannot close while checkout is SUBMITTING");
    }

    #[test]
    fn test_location_error_messages() {
        let err = CoreError::ParentNotSelected {
            level: LocationLevel::Sector,
        };
        assert_eq!(err.to_string(), "Select a DISTRICT before choosing a SECTOR");

        let err = CoreError::LevelBeyondTarget {
            level: LocationLevel::District,
            target: LocationLevel::Province,
        };
        assert_eq!(
            err.to_string(),
            "DISTRICT is deeper than the required PROVINCE level"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "customer name".to_string(),
        };
        assert_eq!(err.to_string(), "customer name is required");
        assert_eq!(err.field(), "customer name");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "phone".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
