//! # Sales History Report
//!
//! Renders the full historical ledger as a flat, human-readable text
//! report (one line per sale plus a trailing totals block) and names the
//! downloadable artifact after the current date.
//!
//! The output is a report for humans, not a machine-parseable format; the
//! only stable contracts are "one sale per line" and the totals block.

use chrono::{DateTime, Local, NaiveDate};

use crate::money::Money;
use crate::staff::Roster;
use crate::types::{PaymentMethod, Sale};

/// Business name printed in the report header.
const REPORT_TITLE: &str = "SALES HISTORY - OASIS URBANO SPA";

/// Width of the `=` rule separating header, body, and totals.
const RULE_WIDTH: usize = 50;

// =============================================================================
// History Totals
// =============================================================================

/// Per-payment-method totals over the historical ledger.
///
/// Feeds the report's summary block and any totals display a front end
/// wants to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryTotals {
    pub cash: Money,
    pub card: Money,
    pub transfer: Money,
}

impl HistoryTotals {
    /// Computes the totals from the historical sales.
    pub fn from_sales(history: &[Sale]) -> Self {
        let sum_for = |method: PaymentMethod| -> Money {
            history
                .iter()
                .filter(|s| s.payment_method == method)
                .map(Sale::amount)
                .sum()
        };

        HistoryTotals {
            cash: sum_for(PaymentMethod::Cash),
            card: sum_for(PaymentMethod::Card),
            transfer: sum_for(PaymentMethod::Transfer),
        }
    }

    /// The grand total across all payment methods.
    pub fn grand(&self) -> Money {
        self.cash + self.card + self.transfer
    }
}

// =============================================================================
// Report Rendering
// =============================================================================

/// Renders the history report.
///
/// One line per sale: local date/time, snapshot amount, payment-method
/// label, employee name (or the unknown placeholder for a dangling
/// reference). `generated_at` is supplied by the caller; the core never
/// reads the clock.
///
/// ## Example
/// ```text
/// SALES HISTORY - OASIS URBANO SPA
/// Generated: 2024-05-01 18:45:12
/// ==================================================
///
/// 2024-05-01 14:30:00 - 100.00 Bs - Cash - Ana
/// 2024-05-01 15:10:00 - 25.00 Bs - Card/QR - unknown
///
/// ==================================================
/// CASH TOTAL: 100.00 Bs
/// CARD/QR TOTAL: 25.00 Bs
/// TRANSFER TOTAL: 0.00 Bs
/// GRAND TOTAL: 125.00 Bs
/// ```
pub fn render_history_report(
    history: &[Sale],
    roster: &Roster,
    generated_at: DateTime<Local>,
) -> String {
    let rule = "=".repeat(RULE_WIDTH);

    let body = history
        .iter()
        .map(|sale| {
            let when = sale.timestamp.with_timezone(&Local);
            format!(
                "{} - {} - {} - {}",
                when.format("%Y-%m-%d %H:%M:%S"),
                sale.amount(),
                sale.payment_method.label(),
                roster.display_name(&sale.employee_id),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let totals = HistoryTotals::from_sales(history);

    format!(
        "{REPORT_TITLE}\n\
         Generated: {}\n\
         {rule}\n\
         \n\
         {body}\n\
         \n\
         {rule}\n\
         CASH TOTAL: {}\n\
         CARD/QR TOTAL: {}\n\
         TRANSFER TOTAL: {}\n\
         GRAND TOTAL: {}\n",
        generated_at.format("%Y-%m-%d %H:%M:%S"),
        totals.cash,
        totals.card,
        totals.transfer,
        totals.grand(),
    )
}

/// File name for the downloadable report artifact, dated with the current
/// local day: `sales-history-YYYY-MM-DD.txt`.
pub fn report_file_name(date: NaiveDate) -> String {
    format!("sales-history-{}.txt", date.format("%Y-%m-%d"))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn sale(id: &str, employee_id: &str, cents: i64, method: PaymentMethod) -> Sale {
        Sale {
            id: id.to_string(),
            timestamp: Local
                .with_ymd_and_hms(2024, 5, 1, 14, 30, 0)
                .unwrap()
                .with_timezone(&Utc),
            employee_id: employee_id.to_string(),
            lines: vec![],
            amount_cents: cents,
            payment_method: method,
            notes: None,
        }
    }

    fn roster() -> Roster {
        let mut roster = Roster::default();
        roster.add("e1".to_string(), "Ana").unwrap();
        roster
    }

    #[test]
    fn test_totals_by_payment_method() {
        let history = vec![
            sale("s1", "e1", 10_000, PaymentMethod::Cash),
            sale("s2", "e1", 2_500, PaymentMethod::Card),
            sale("s3", "e1", 4_000, PaymentMethod::Cash),
            sale("s4", "e1", 1_500, PaymentMethod::Transfer),
        ];

        let totals = HistoryTotals::from_sales(&history);
        assert_eq!(totals.cash, Money::from_cents(14_000));
        assert_eq!(totals.card, Money::from_cents(2_500));
        assert_eq!(totals.transfer, Money::from_cents(1_500));
        assert_eq!(totals.grand(), Money::from_cents(18_000));
    }

    #[test]
    fn test_report_lines_and_summary() {
        let history = vec![
            sale("s1", "e1", 10_000, PaymentMethod::Cash),
            sale("s2", "gone", 2_500, PaymentMethod::Card),
        ];
        let generated = Local.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap();

        let report = render_history_report(&history, &roster(), generated);

        assert!(report.starts_with(REPORT_TITLE));
        assert!(report.contains("Generated: 2024-05-01 18:00:00"));
        assert!(report.contains("2024-05-01 14:30:00 - 100.00 Bs - Cash - Ana"));
        // Dangling employee reference renders the placeholder
        assert!(report.contains("2024-05-01 14:30:00 - 25.00 Bs - Card/QR - unknown"));
        assert!(report.contains("CASH TOTAL: 100.00 Bs"));
        assert!(report.contains("CARD/QR TOTAL: 25.00 Bs"));
        assert!(report.contains("TRANSFER TOTAL: 0.00 Bs"));
        assert!(report.contains("GRAND TOTAL: 125.00 Bs"));
    }

    #[test]
    fn test_empty_history_report_still_renders_totals() {
        let generated = Local.with_ymd_and_hms(2024, 5, 1, 18, 0, 0).unwrap();
        let report = render_history_report(&[], &roster(), generated);
        assert!(report.contains("GRAND TOTAL: 0.00 Bs"));
    }

    #[test]
    fn test_report_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(report_file_name(date), "sales-history-2024-05-01.txt");
    }
}
