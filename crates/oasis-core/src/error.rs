//! # Error Types
//!
//! Domain-specific error types for oasis-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  oasis-core errors (this file)                                      │
//! │  ├── CoreError        - Precondition / auth / domain failures       │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  oasis-db errors (separate crate)                                   │
//! │  └── StoreError       - Persistence failures (warn-only, §5)        │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → caller-facing message          │
//! │                                                                     │
//! │  Deliberately absent: a NotFound error for deletes. Deleting an     │
//! │  unknown sale / item / employee id is an idempotent no-op, not an   │
//! │  error.                                                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message; all are recoverable

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent precondition or rule violations. They are surfaced
/// to the caller for user-facing messaging; none are fatal to the process.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A sale was submitted while the register is closed.
    ///
    /// ## When This Occurs
    /// Callers are expected to disable the sale form while closed, but the
    /// ledger still rejects the call rather than silently recording a sale
    /// outside any session.
    #[error("register is closed; open it before registering sales")]
    RegisterClosed,

    /// `close_register` was called while already closed.
    ///
    /// Reported to the caller, never fatal; nothing is mutated.
    #[error("register is already closed")]
    RegisterAlreadyClosed,

    /// The supplied admin code did not match on a gated action.
    ///
    /// ## When This Occurs
    /// - Deleting a historical sale with a wrong code
    /// - Resetting the closing calendar with a wrong code
    #[error("admin code rejected")]
    AdminCodeRejected,

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// Used for early validation before the ledger mutates anything.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// A new admin code and its confirmation did not match.
    #[error("admin code confirmation does not match")]
    CodeMismatch,
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::RegisterClosed.to_string(),
            "register is closed; open it before registering sales"
        );
        assert_eq!(
            CoreError::AdminCodeRejected.to_string(),
            "admin code rejected"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::TooShort {
            field: "admin code".to_string(),
            min: 4,
        };
        assert_eq!(err.to_string(), "admin code must be at least 4 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::CodeMismatch;
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
