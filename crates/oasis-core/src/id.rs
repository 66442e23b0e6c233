//! # Identifier Generation
//!
//! Opaque unique string identifiers for catalog items, employees, and sales.
//!
//! ## Why UUID v4?
//! Globally unique without coordination: the register works fully offline,
//! so ids must never depend on a central counter. Callers treat the result
//! as an opaque string; nothing in the system parses it back.

use uuid::Uuid;

/// Generates a fresh opaque identifier.
///
/// ## Example
/// ```rust
/// use oasis_core::id::uid;
///
/// let a = uid();
/// let b = uid();
/// assert_ne!(a, b);
/// ```
pub fn uid() -> String {
    Uuid::new_v4().to_string()
}
