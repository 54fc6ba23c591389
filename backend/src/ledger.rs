//! Arrears Ledger
//!
//! Per (individual, wave) FIFO queue of arrear months awaiting repayment.
//!
//! The ledger is seeded from every row of the wave that accrued arrears, in
//! month order, and owns an explicit cursor over those entries. The allocator
//! drives it through exactly three operations:
//!
//! - [`ArrearsLedger::first_unresolved`]: peek the oldest month that still
//!   has a positive remaining amount
//! - [`ArrearsLedger::advance`]: step the cursor past the current month
//! - [`ArrearsLedger::consume`]: reduce the current month's remaining amount
//!
//! # Critical Invariants
//!
//! 1. **Month Order**: entries are strictly increasing in month
//! 2. **Conservation**: total consumed never exceeds total accrued;
//!    `remaining() == total_accrued() - total_consumed()` at all times
//! 3. **No Backtracking**: the cursor only moves forward
//!
//! Calendar months between two accrual rows carry zero remaining arrears by
//! construction, so the peek skips them implicitly rather than requiring the
//! `month + 1` row to exist.

use crate::core::month::Month;
use crate::models::record::PanelRow;
use crate::normalize;
use serde::{Deserialize, Serialize};

/// One unresolved arrear month
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ArrearEntry {
    /// Month in which the arrear accrued
    month: Month,

    /// Amount still owed from this month's accrual
    remaining: f64,

    /// Supposed wage of the accrual month (normalization base for every
    /// repayment credited against this entry)
    supposed_wage: f64,
}

impl ArrearEntry {
    /// Month in which the arrear accrued
    pub fn month(&self) -> Month {
        self.month
    }

    /// Amount still owed from this month's accrual
    pub fn remaining(&self) -> f64 {
        self.remaining
    }

    /// Supposed wage at accrual time
    pub fn supposed_wage(&self) -> f64 {
        self.supposed_wage
    }
}

/// FIFO queue of one wave's unresolved arrear months
///
/// # Example
///
/// ```rust
/// use arrears_shares_core_rs::{ArrearsLedger, Month, PanelRow};
///
/// let rows = vec![
///     PanelRow::new("W01", 1, Month::new(660), 100.0).with_owed(100.0),
///     PanelRow::new("W01", 1, Month::new(661), 150.0).with_owed(50.0),
/// ];
/// let mut ledger = ArrearsLedger::from_wave(&rows);
///
/// assert_eq!(ledger.total_accrued(), 150.0);
/// let first = ledger.first_unresolved().unwrap();
/// assert_eq!(first.month(), Month::new(660));
/// assert_eq!(first.remaining(), 100.0);
///
/// ledger.consume(100.0);
/// assert_eq!(ledger.first_unresolved().unwrap().month(), Month::new(661));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrearsLedger {
    /// Accrual entries in strictly increasing month order
    entries: Vec<ArrearEntry>,

    /// Index of the current entry; entries before it are fully resolved
    cursor: usize,

    /// Sum of all seeded accrual amounts
    total_accrued: f64,

    /// Sum of all amounts consumed so far
    total_consumed: f64,
}

impl ArrearsLedger {
    /// Seed a ledger from one wave's rows
    ///
    /// Every row with a present `amount_owed` becomes an entry; its supposed
    /// wage is fixed at accrual time. `rows` must be month-sorted, as
    /// guaranteed by [`crate::Panel`].
    pub fn from_wave(rows: &[PanelRow]) -> Self {
        let entries: Vec<ArrearEntry> = rows
            .iter()
            .filter_map(|row| {
                row.amount_owed().map(|owed| ArrearEntry {
                    month: row.month(),
                    remaining: owed,
                    supposed_wage: normalize::supposed_wage(row),
                })
            })
            .collect();

        debug_assert!(
            entries.windows(2).all(|p| p[0].month < p[1].month),
            "wave rows must be month-sorted"
        );

        let total_accrued = entries.iter().map(|e| e.remaining).sum();
        Self {
            entries,
            cursor: 0,
            total_accrued,
            total_consumed: 0.0,
        }
    }

    /// The oldest arrear month that still has a positive remaining amount
    ///
    /// Returns `None` once every entry is resolved or the queue was empty to
    /// begin with (a wave that never accrued arrears).
    pub fn first_unresolved(&self) -> Option<&ArrearEntry> {
        self.unresolved_index().map(|i| &self.entries[i])
    }

    /// Step the cursor past the current month
    ///
    /// The next peek resumes at the following accrual entry; calendar months
    /// without an accrual row are zero-remaining and are skipped implicitly.
    pub fn advance(&mut self) {
        if self.cursor < self.entries.len() {
            self.cursor += 1;
        }
    }

    /// Consume `amount` from the current unresolved month
    ///
    /// Moves the cursor onto the entry it consumes from. The caller must not
    /// over-consume within one call: `amount` has to be at most
    /// [`ArrearEntry::remaining`] of that entry. Splitting a larger repayment
    /// across months is the allocator's loop, not the ledger's.
    pub fn consume(&mut self, amount: f64) {
        debug_assert!(amount >= 0.0, "consumed amount must be non-negative");
        if let Some(i) = self.unresolved_index() {
            self.cursor = i;
            let entry = &mut self.entries[i];
            debug_assert!(
                amount <= entry.remaining,
                "cannot consume {} from remaining {}",
                amount,
                entry.remaining
            );
            entry.remaining -= amount;
            self.total_consumed += amount;
        }
    }

    /// True once no unresolved arrears are left
    pub fn is_exhausted(&self) -> bool {
        self.unresolved_index().is_none()
    }

    /// Number of seeded accrual entries
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Sum of all seeded accrual amounts
    pub fn total_accrued(&self) -> f64 {
        self.total_accrued
    }

    /// Sum of all amounts consumed so far
    pub fn total_consumed(&self) -> f64 {
        self.total_consumed
    }

    /// Unresolved balance across all entries
    pub fn remaining(&self) -> f64 {
        self.entries.iter().map(|e| e.remaining).sum()
    }

    /// Index of the first entry at or after the cursor with remaining > 0
    fn unresolved_index(&self) -> Option<usize> {
        self.entries
            .iter()
            .skip(self.cursor)
            .position(|e| e.remaining > 0.0)
            .map(|offset| self.cursor + offset)
    }
}
