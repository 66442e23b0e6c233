//! # Validation Module
//!
//! Input validation utilities for Oasis POS.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Front end (out of this repo)                              │
//! │  ├── Basic format checks (empty, length)                            │
//! │  └── Immediate user feedback                                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE, called by the containers and the ledger      │
//! │  ├── Empty names, non-positive prices/quantities                    │
//! │  └── Admin code pair rules                                          │
//! │                                                                     │
//! │  The core never trusts the front end: every add/register operation  │
//! │  re-validates before mutating.                                      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use oasis_core::validation::{validate_name, validate_price_cents};
//!
//! validate_name("Manicure", "name").unwrap();
//! validate_price_cents(5000).unwrap();
//! assert!(validate_price_cents(0).is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::MIN_ADMIN_CODE_LEN;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (catalog item or employee).
///
/// ## Rules
/// - Must not be empty after trimming
pub fn validate_name(name: &str, field: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a new admin code against its confirmation.
///
/// ## Rules
/// - Code and confirmation must match exactly
/// - Code must be at least [`MIN_ADMIN_CODE_LEN`] characters
///
/// ## Example
/// ```rust
/// use oasis_core::validation::validate_admin_code_pair;
///
/// assert!(validate_admin_code_pair("ab12", "ab12").is_ok());
/// assert!(validate_admin_code_pair("ab12", "ab13").is_err()); // mismatch
/// assert!(validate_admin_code_pair("ab1", "ab1").is_err());   // too short
/// ```
pub fn validate_admin_code_pair(new_code: &str, confirm_code: &str) -> ValidationResult<()> {
    if new_code != confirm_code {
        return Err(ValidationError::CodeMismatch);
    }

    if new_code.len() < MIN_ADMIN_CODE_LEN {
        return Err(ValidationError::TooShort {
            field: "admin code".to_string(),
            min: MIN_ADMIN_CODE_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be strictly positive; a zero-priced catalog entry would register
///   sales that silently contribute nothing
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates a sale line quantity.
///
/// ## Rules
/// - Must be at least 1
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
