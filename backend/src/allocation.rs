//! FIFO repayment allocation
//!
//! Matches one month's repayment against the wave's oldest outstanding
//! arrears first. A repayment that overshoots the oldest arrear month is
//! split: the oldest month is paid off in full, the remainder rolls onto the
//! next unresolved month, and so on. A repayment smaller than the current
//! arrear leaves a partial balance for a future repayment to pick up.
//!
//! Every consumed slice is credited at the supposed wage *of the arrear
//! month it discharges*, not of the repayment month; that difference is
//! what the psychological-cost signal later measures.
//!
//! # Critical Invariants
//!
//! 1. **FIFO Order**: arrear months are discharged strictly oldest-first
//! 2. **Conservation**: credits never exceed what the wave accrued
//! 3. **Sequential Commitment**: each repayment sees the ledger state left
//!    behind by the previous repayment of the same wave

use crate::ledger::ArrearsLedger;

/// Allocate one repayment against the wave's unresolved arrears
///
/// Returns the repayment's allocated share of wage, the sum of
/// `consumed / supposed_wage` over every arrear month the repayment
/// (partially) discharges, or `None` when there is nothing unresolved to
/// allocate against (the ledger is left untouched in that case).
///
/// When the repayment overshoots every remaining arrear month, the excess
/// is permanently uncollected: it earns no credit and is not an error.
///
/// # Example
///
/// ```rust
/// use arrears_shares_core_rs::{allocate_repayment, ArrearsLedger, Month, PanelRow};
///
/// let rows = vec![
///     PanelRow::new("W01", 1, Month::new(660), 100.0).with_owed(100.0),
///     PanelRow::new("W01", 1, Month::new(661), 150.0).with_owed(50.0),
/// ];
/// let mut ledger = ArrearsLedger::from_wave(&rows);
///
/// // 130 pays off month 660 (100 of 200 supposed wage) and 30 of month 661
/// let share = allocate_repayment(&mut ledger, 130.0).unwrap();
/// assert_eq!(share, 100.0 / 200.0 + 30.0 / 200.0);
/// assert_eq!(ledger.first_unresolved().unwrap().remaining(), 20.0);
/// ```
pub fn allocate_repayment(ledger: &mut ArrearsLedger, amount: f64) -> Option<f64> {
    // Nothing unresolved: no debt to allocate against (see LedgerExhaustion)
    ledger.first_unresolved()?;

    let mut rest = amount;
    let mut share = 0.0;

    while let Some(entry) = ledger.first_unresolved() {
        let due = entry.remaining();
        let base = entry.supposed_wage();

        if rest > due {
            // Pay off this arrear month in full and roll onto the next one
            share += due / base;
            rest -= due;
            ledger.consume(due);
            ledger.advance();
        } else {
            // Terminal slice: may leave a partial balance on this month
            share += rest / base;
            ledger.consume(rest);
            return Some(share);
        }
    }

    // Overshot every remaining arrear month: the excess stays uncollected
    Some(share)
}
