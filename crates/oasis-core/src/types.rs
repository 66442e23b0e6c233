//! # Domain Types
//!
//! Core domain types used throughout Oasis POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Domain Types                               │
//! │                                                                     │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐    │
//! │  │  CatalogItem    │   │    Employee     │   │      Sale       │    │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │    │
//! │  │  id (UUID)      │   │  id (UUID)      │   │  id (UUID)      │    │
//! │  │  name           │   │  name           │   │  employee_id ───┼──┐ │
//! │  │  price_cents    │   └─────────────────┘   │  lines[]        │  │ │
//! │  │  kind           │                         │  amount_cents   │  │ │
//! │  └─────────────────┘                         │  payment_method │  │ │
//! │                                              └─────────────────┘  │ │
//! │  ┌─────────────────┐   ┌─────────────────┐                        │ │
//! │  │    ItemKind     │   │ PaymentMethod   │   employee_id is a     │ │
//! │  │  ─────────────  │   │  ─────────────  │   WEAK reference: it   │ │
//! │  │  Service        │   │  Cash           │   may dangle after an  │ │
//! │  │  Product        │   │  Card (QR)      │   employee is deleted ◄┘ │
//! │  └─────────────────┘   │  Transfer       │   and is resolved at     │
//! │                        └─────────────────┘   display time.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Identity Pattern
//! A `Sale` freezes its `amount_cents` at registration time and keeps plain
//! string ids for its employee and line items. Later catalog or roster edits
//! never invalidate the ledger.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item Kind
// =============================================================================

/// Whether a catalog entry is a service rendered or a product sold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ItemKind {
    /// A service performed at the spa (manicure, massage, ...).
    Service,
    /// A physical product sold over the counter.
    Product,
}

// =============================================================================
// Catalog Item
// =============================================================================

/// A service or product available for sale.
///
/// Immutable once created: there is no edit operation, only add and remove.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name shown to the cashier.
    pub name: String,

    /// Price in cents (smallest currency unit). Always positive.
    pub price_cents: i64,

    /// Service or product.
    pub kind: ItemKind,
}

impl CatalogItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Employee
// =============================================================================

/// A staff member who can be credited with sales.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Employee {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display name.
    pub name: String,
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// Card terminal or QR wallet payment.
    Card,
    /// Direct bank transfer.
    Transfer,
}

impl PaymentMethod {
    /// Human-readable label used by the history report.
    pub const fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Card => "Card/QR",
            PaymentMethod::Transfer => "Transfer",
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One line of a sale: a catalog item reference and a quantity.
///
/// `item_id` is a weak reference resolved against the catalog at
/// registration time only; it may dangle afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SaleLine {
    pub item_id: String,
    /// Quantity sold. Always >= 1.
    pub quantity: i64,
}

/// A registered sale.
///
/// Lives in exactly one of two containers: the current-session list or the
/// historical list. It moves from the former to the latter exactly once, at
/// register-close time, and never moves back.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Creation instant. Immutable; the local calendar day derived from it
    /// keys the daily-closing adjustments.
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,

    /// Weak reference to the employee credited with the sale.
    pub employee_id: String,

    /// Line items in insertion order.
    pub lines: Vec<SaleLine>,

    /// Total in cents, snapshotted at registration. NOT recomputed from
    /// `lines` afterwards.
    pub amount_cents: i64,

    /// How the sale was paid.
    pub payment_method: PaymentMethod,

    /// Free-form note from the cashier.
    pub notes: Option<String>,
}

impl Sale {
    /// Returns the snapshot total as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Local calendar day this sale falls on.
    ///
    /// Daily closings are keyed by the business's local date, not UTC: a
    /// sale rung up at 23:30 local time belongs to that local day even when
    /// UTC has already rolled over.
    pub fn local_date(&self) -> NaiveDate {
        self.timestamp.with_timezone(&Local).date_naive()
    }
}

// =============================================================================
// Employee Usage
// =============================================================================

/// Result of the employee referencing query used by the deletion flow.
///
/// The core never blocks employee deletion; it only reports whether any sale
/// still points at the employee so a front end can ask for confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EmployeeUsage {
    /// Referenced by at least one sale in the current session.
    pub in_current: bool,
    /// Referenced by at least one sale in the historical ledger.
    pub in_history: bool,
}

impl EmployeeUsage {
    /// True when the employee is referenced anywhere.
    #[inline]
    pub const fn is_referenced(&self) -> bool {
        self.in_current || self.in_history
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_payment_method_labels() {
        assert_eq!(PaymentMethod::Cash.label(), "Cash");
        assert_eq!(PaymentMethod::Card.label(), "Card/QR");
        assert_eq!(PaymentMethod::Transfer.label(), "Transfer");
    }

    #[test]
    fn test_payment_method_wire_format() {
        let json = serde_json::to_string(&PaymentMethod::Card).unwrap();
        assert_eq!(json, "\"card\"");
        let back: PaymentMethod = serde_json::from_str("\"transfer\"").unwrap();
        assert_eq!(back, PaymentMethod::Transfer);
    }

    #[test]
    fn test_item_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&ItemKind::Service).unwrap(),
            "\"service\""
        );
    }

    #[test]
    fn test_sale_local_date_matches_local_timestamp() {
        // Build the timestamp from a known local wall-clock instant so the
        // assertion holds in any host time zone.
        let local = Local.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();
        let sale = Sale {
            id: "s1".to_string(),
            timestamp: local.with_timezone(&Utc),
            employee_id: "e1".to_string(),
            lines: vec![],
            amount_cents: 5000,
            payment_method: PaymentMethod::Cash,
            notes: None,
        };
        assert_eq!(
            sale.local_date(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
    }

    #[test]
    fn test_employee_usage_referenced() {
        let usage = EmployeeUsage {
            in_current: false,
            in_history: true,
        };
        assert!(usage.is_referenced());

        let unused = EmployeeUsage {
            in_current: false,
            in_history: false,
        };
        assert!(!unused.is_referenced());
    }
}
