//! # oasis-core: Pure Business Logic for Oasis POS
//!
//! This crate is the **heart** of Oasis POS. It contains the register
//! lifecycle, ledger math, and admin gating as pure functions with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Oasis POS Architecture                        │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                  Front End (out of this repo)                 │  │
//! │  │   Catalog UI ──► Sale Form ──► Register Controls ──► Calendar │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                  oasis-db (RegisterService)                   │  │
//! │  │      load-on-init, persist-after-mutation, clock supply       │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                ★ oasis-core (THIS CRATE) ★                    │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ │  │
//! │  │  │  types  │ │  money  │ │ ledger  │ │ closing │ │  admin  │ │  │
//! │  │  │  Sale   │ │  Money  │ │ Ledger  │ │Calendar │ │AdminGate│ │  │
//! │  │  └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘ │  │
//! │  │                                                               │  │
//! │  │  NO I/O • NO DATABASE • NO CLOCK • PURE FUNCTIONS             │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (CatalogItem, Employee, Sale, PaymentMethod)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`id`] - Opaque unique identifier generation
//! - [`catalog`] - Service/product catalog container
//! - [`staff`] - Employee roster container
//! - [`closing`] - Per-day closing totals calendar
//! - [`admin`] - Shared admin-code gate
//! - [`ledger`] - Register state machine and sale ledger (the core)
//! - [`report`] - Plain-text sales history report
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every operation is deterministic - ids, timestamps
//!    and calendar dates are passed in by the caller, never read here
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid
//!    float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use oasis_core::catalog::Catalog;
//! use oasis_core::ledger::{Ledger, SaleDraft};
//! use oasis_core::types::PaymentMethod;
//!
//! let mut catalog = Catalog::default();
//! let manicure = catalog
//!     .add_service("mani-1".to_string(), "Manicure", 5000)
//!     .unwrap()
//!     .id;
//!
//! let mut ledger = Ledger::default();
//! ledger.open_register();
//!
//! let draft = SaleDraft::new("emp-1", vec![(manicure, 2)], PaymentMethod::Cash);
//! let when = Utc.with_ymd_and_hms(2024, 5, 1, 14, 30, 0).unwrap();
//! let sale = ledger
//!     .register_sale(draft, &catalog, "sale-1".to_string(), when)
//!     .unwrap();
//!
//! // 2 × 50.00 = 100.00
//! assert_eq!(sale.amount_cents, 10_000);
//! assert_eq!(ledger.session_total().cents(), 10_000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod admin;
pub mod catalog;
pub mod closing;
pub mod error;
pub mod id;
pub mod ledger;
pub mod money;
pub mod report;
pub mod staff;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use oasis_core::Money` instead of
// `use oasis_core::money::Money`

pub use admin::AdminGate;
pub use catalog::Catalog;
pub use closing::{ClosingCalendar, DailyClosing};
pub use error::{CoreError, ValidationError};
pub use id::uid;
pub use ledger::{ClosingSummary, Ledger, SaleDraft};
pub use money::Money;
pub use report::HistoryTotals;
pub use staff::Roster;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Admin code installed on first run, before anyone has changed it.
///
/// ## Why a constant?
/// The gate must be usable out of the box on a fresh install; the code is
/// expected to be changed immediately via [`AdminGate::change_code`].
pub const DEFAULT_ADMIN_CODE: &str = "1234";

/// Minimum length accepted for a new admin code.
pub const MIN_ADMIN_CODE_LEN: usize = 4;

/// Placeholder shown when a sale references an employee that was deleted.
///
/// ## Business Reason
/// Sales are historical snapshots: deleting an employee never rewrites or
/// cascades into the ledger, so consumers must render something for the
/// dangling reference.
pub const UNKNOWN_EMPLOYEE: &str = "unknown";
