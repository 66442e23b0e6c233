//! # Daily Closing Calendar
//!
//! One running total per local calendar day, incrementally maintained.
//!
//! ## Update Paths
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Daily Closing Lifecycle                        │
//! │                                                                     │
//! │  close_register (session total > 0)                                 │
//! │       └── increment(today, total)    ── create entry or add to it   │
//! │                                                                     │
//! │  delete_history_sale                                                │
//! │       └── decrement(sale day, amt)   ── floor at zero;              │
//! │                                         absent day = silent skip    │
//! │                                                                     │
//! │  reset_monthly_ledger                                               │
//! │       └── reset()                    ── always together with the    │
//! │                                         history list, never alone   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The total is a cache of a derivable aggregate (sum of archived sales per
//! day minus deleted amounts), not recomputed from the history on read.
//! Keeping both update paths inside [`crate::ledger::Ledger`] is what holds
//! the cache and its source together.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Daily Closing
// =============================================================================

/// The cumulative archived-sales total for one local calendar day.
///
/// An entry exists only for days that ever had a nonzero archived or
/// adjusted total; its amount never goes negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyClosing {
    /// Local calendar day key (`YYYY-MM-DD` on the wire).
    #[ts(as = "String")]
    pub date: NaiveDate,

    /// Running total in cents.
    pub total_cents: i64,
}

impl DailyClosing {
    /// Returns the running total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Closing Calendar
// =============================================================================

/// The per-day closing totals, in entry-creation order.
#[derive(Debug, Clone, Default)]
pub struct ClosingCalendar {
    entries: Vec<DailyClosing>,
}

impl ClosingCalendar {
    /// Rebuilds the calendar from its persisted slice.
    pub fn from_slice(entries: Vec<DailyClosing>) -> Self {
        ClosingCalendar { entries }
    }

    /// Returns the total for a day, or `None` when the day has no entry.
    pub fn get(&self, date: NaiveDate) -> Option<Money> {
        self.entries
            .iter()
            .find(|c| c.date == date)
            .map(DailyClosing::total)
    }

    /// Adds to a day's total, creating the entry when absent.
    pub fn increment(&mut self, date: NaiveDate, amount: Money) {
        match self.entries.iter_mut().find(|c| c.date == date) {
            Some(entry) => entry.total_cents += amount.cents(),
            None => self.entries.push(DailyClosing {
                date,
                total_cents: amount.cents(),
            }),
        }
    }

    /// Subtracts from a day's total, flooring at zero.
    ///
    /// A day without an entry is a silent no-op: the historical sale being
    /// deleted predates the calendar (or its day was already reset), and
    /// there is nothing left to adjust.
    pub fn decrement(&mut self, date: NaiveDate, amount: Money) {
        if let Some(entry) = self.entries.iter_mut().find(|c| c.date == date) {
            entry.total_cents = entry.total().saturating_sub(amount).cents();
        }
    }

    /// Clears every entry.
    ///
    /// Only [`crate::ledger::Ledger::reset_monthly_ledger`] calls this, and
    /// always together with clearing the history list.
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    /// Sum of all closings falling in the given month.
    pub fn month_total(&self, year: i32, month: u32) -> Money {
        self.entries
            .iter()
            .filter(|c| c.date.year() == year && c.date.month() == month)
            .map(DailyClosing::total)
            .sum()
    }

    /// All entries, in creation order.
    pub fn entries(&self) -> &[DailyClosing] {
        &self.entries
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
