//! # Admin Gate
//!
//! The single shared secret gating destructive history operations.
//!
//! ## Security Posture
//! The code is stored and compared in clear text. That is acceptable only
//! because this register has no network exposure: the threat model is a
//! cashier tapping buttons, not an attacker reading storage. Anyone
//! repurposing this crate behind a network surface must replace this type
//! with a hashed/salted scheme; it is isolated here so that swap touches
//! no calling code.
//!
//! ## Gated Actions
//! - Deleting a sale from the historical ledger
//! - Resetting the closing calendar (which also clears the history)
//!
//! There is no lockout or rate limit; a wrong code simply reports an auth
//! failure and mutates nothing.

use crate::error::CoreResult;
use crate::validation::validate_admin_code_pair;
use crate::DEFAULT_ADMIN_CODE;

/// Holder of the shared admin code.
#[derive(Debug, Clone)]
pub struct AdminGate {
    code: String,
}

impl AdminGate {
    /// Rebuilds the gate from its persisted code.
    pub fn from_code(code: String) -> Self {
        AdminGate { code }
    }

    /// Exact-match verification of a caller-supplied candidate.
    pub fn verify(&self, candidate: &str) -> bool {
        self.code == candidate
    }

    /// Changes the code.
    ///
    /// Succeeds only when `new_code` matches `confirm_code` and meets the
    /// minimum length; otherwise the current code stays in effect.
    pub fn change_code(&mut self, new_code: &str, confirm_code: &str) -> CoreResult<()> {
        validate_admin_code_pair(new_code, confirm_code)?;
        self.code = new_code.to_string();
        Ok(())
    }

    /// The current code, for persistence only.
    pub fn code(&self) -> &str {
        &self.code
    }
}

/// A fresh install uses the fixed default code.
impl Default for AdminGate {
    fn default() -> Self {
        AdminGate {
            code: DEFAULT_ADMIN_CODE.to_string(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{CoreError, ValidationError};

    #[test]
    fn test_default_code_verifies() {
        let gate = AdminGate::default();
        assert!(gate.verify(DEFAULT_ADMIN_CODE));
        assert!(!gate.verify("0000"));
    }

    #[test]
    fn test_change_code_success() {
        let mut gate = AdminGate::default();
        gate.change_code("ab12", "ab12").unwrap();

        assert!(gate.verify("ab12"));
        assert!(!gate.verify(DEFAULT_ADMIN_CODE));
    }

    #[test]
    fn test_change_code_mismatch_keeps_old_code() {
        let mut gate = AdminGate::default();
        let err = gate.change_code("ab12", "ab13").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::CodeMismatch)
        ));
        assert!(gate.verify(DEFAULT_ADMIN_CODE));
    }

    #[test]
    fn test_change_code_too_short_keeps_old_code() {
        let mut gate = AdminGate::default();
        let err = gate.change_code("ab1", "ab1").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TooShort { .. })
        ));
        assert!(gate.verify(DEFAULT_ADMIN_CODE));
        assert!(!gate.verify("ab1"));
    }

    #[test]
    fn test_verify_is_exact_match() {
        let gate = AdminGate::from_code("ab12".to_string());
        assert!(gate.verify("ab12"));
        assert!(!gate.verify("AB12"));
        assert!(!gate.verify("ab12 "));
        assert!(!gate.verify(""));
    }
}
