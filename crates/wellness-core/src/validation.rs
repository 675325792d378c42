//! # Validation Module
//!
//! Input validation for the checkout form.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: CheckoutDraft::validate (Rust)                               │
//! │  └── THIS MODULE: runs before any order is sent                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Backend                                                      │
//! │  └── Its own constraints on /sales                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every validator returns the trimmed value on success.
//!
//! ## Usage
//! ```rust
//! use wellness_core::validation::{validate_customer_name, validate_customer_phone};
//!
//! assert_eq!(validate_customer_name(" Aline ").unwrap(), "Aline");
//! assert!(validate_customer_phone("").is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest free-text value accepted on the form.
pub const MAX_TEXT_LEN: usize = 200;

/// Longest phone number accepted, separators included.
pub const MAX_PHONE_LEN: usize = 20;

// =============================================================================
// Helpers
// =============================================================================

fn required(field: &str, value: &str, max: usize) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}

// =============================================================================
// Customer Fields
// =============================================================================

/// Validates the customer's name. Required, at most 200 characters.
pub fn validate_customer_name(name: &str) -> ValidationResult<String> {
    required("customer name", name, MAX_TEXT_LEN)
}

/// Validates the customer's phone number.
///
/// ## Rules
/// - Required
/// - Digits plus `+`, spaces, hyphens and parentheses
/// - At least one digit
///
/// ```rust
/// use wellness_core::validation::validate_customer_phone;
///
/// assert!(validate_customer_phone("+250 788-123-456").is_ok());
/// assert!(validate_customer_phone("call me").is_err());
/// ```
pub fn validate_customer_phone(phone: &str) -> ValidationResult<String> {
    let phone = required("customer phone", phone, MAX_PHONE_LEN)?;

    let allowed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | ' ' | '-' | '(' | ')'));
    if !allowed || !phone.chars().any(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "customer phone".to_string(),
            reason: "must contain only digits, spaces, '+', '-' and parentheses".to_string(),
        });
    }

    Ok(phone)
}

/// Validates the optional email. Blank means "not given".
pub fn validate_customer_email(email: &str) -> ValidationResult<Option<String>> {
    let email = email.trim();
    if email.is_empty() {
        return Ok(None);
    }

    if email.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: "customer email".to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && domain.contains('.') => {
            Ok(Some(email.to_string()))
        }
        _ => Err(ValidationError::InvalidFormat {
            field: "customer email".to_string(),
            reason: "must look like name@example.com".to_string(),
        }),
    }
}

/// Validates a home delivery address. Required, at most 200 characters.
pub fn validate_delivery_address(address: &str) -> ValidationResult<String> {
    required("delivery address", address, MAX_TEXT_LEN)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_customer_name() {
        assert_eq!(validate_customer_name("  Jean Bosco ").unwrap(), "Jean Bosco");
        assert!(validate_customer_name("").is_err());
        assert!(validate_customer_name("   ").is_err());
        assert!(matches!(
            validate_customer_name(&"A".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_customer_phone() {
        assert!(validate_customer_phone("0788123456").is_ok());
        assert!(validate_customer_phone("(+250) 788 123 456").is_ok());

        assert!(matches!(
            validate_customer_phone(""),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_customer_phone("078x123"),
            Err(ValidationError::InvalidFormat { .. })
        ));
        assert!(validate_customer_phone("0788123456 ext. 12").is_err());
        assert!(validate_customer_phone("+ - ()").is_err());
        assert!(validate_customer_phone(&"1".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_customer_email() {
        assert_eq!(validate_customer_email("  ").unwrap(), None);
        assert_eq!(
            validate_customer_email("aline@example.rw").unwrap(),
            Some("aline@example.rw".to_string())
        );
        assert!(validate_customer_email("aline.example.rw").is_err());
        assert!(validate_customer_email("@example.rw").is_err());
    }

    #[test]
    fn test_validate_delivery_address() {
        assert!(validate_delivery_address("KN 5 Rd, Kigali").is_ok());
        assert_eq!(
            validate_delivery_address("").unwrap_err().field(),
            "delivery address"
        );
    }
}
