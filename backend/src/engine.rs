//! Share computation engine
//!
//! Drives the full per-individual, per-wave pass over a validated panel:
//!
//! ```text
//! For each individual (psych-cost accumulator resets here):
//!   For each wave (ledger and wave accumulator reset here):
//!     1. Seed the arrears ledger from the wave's accrual rows
//!     2. Walk months in order:
//!        - normalize the row (supposed wage, a2w, r2cw)
//!        - allocate the row's repayment FIFO against the ledger (r2w)
//!        - fold the running sums (cumsum_a2w, cumsum_r2w, shares, costs)
//!        - assemble the row's nine output columns
//!     3. Audit conservation (consumed <= accrued, remaining >= 0)
//! ```
//!
//! The pass is strictly sequential within one individual: each repayment
//! row sees the ledger state committed by the previous repayment, and the
//! psychological-cost total carries across wave boundaries.

use crate::aggregate::{PsychCostAccumulator, WaveAccumulator};
use crate::allocation::allocate_repayment;
use crate::ledger::ArrearsLedger;
use crate::models::panel::Panel;
use crate::models::record::{PanelKey, PanelRow, ShareColumns};
use crate::normalize;
use serde::{Deserialize, Serialize};

/// One row of the augmented output panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedRow {
    /// Row identity, unchanged from the input panel
    #[serde(flatten)]
    pub key: PanelKey,

    /// The nine derived columns
    #[serde(flatten)]
    pub columns: ShareColumns,
}

/// The augmented panel: input keys plus derived columns, in key order
///
/// This is the sole output artifact of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedPanel {
    rows: Vec<AugmentedRow>,
}

impl AugmentedPanel {
    /// All augmented rows in key order
    pub fn rows(&self) -> &[AugmentedRow] {
        &self.rows
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the panel has no rows
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Compute the augmented panel for a validated input panel
///
/// Pure batch computation: no I/O, no shared state across calls. Row order
/// of the result matches the validated panel's key order.
///
/// # Example
///
/// ```rust
/// use arrears_shares_core_rs::{compute_shares, Month, Panel, PanelRow};
///
/// let panel = Panel::from_rows(vec![
///     PanelRow::new("W01", 1, Month::new(660), 100.0).with_owed(100.0),
///     PanelRow::new("W01", 1, Month::new(661), 150.0)
///         .with_owed(50.0)
///         .with_repaid(130.0),
/// ])
/// .unwrap();
///
/// let augmented = compute_shares(&panel);
/// assert_eq!(augmented.rows()[1].columns.allocated_ratio, Some(0.65));
/// ```
pub fn compute_shares(panel: &Panel) -> AugmentedPanel {
    let mut rows = Vec::with_capacity(panel.len());

    for (individual, individual_rows) in panel.individuals() {
        let mut psych = PsychCostAccumulator::new();
        for (wave, wave_rows) in Panel::waves(individual_rows) {
            process_wave(individual, wave, wave_rows, &mut psych, &mut rows);
        }
    }

    AugmentedPanel { rows }
}

/// Process one wave: allocate repayments and assemble its output rows
fn process_wave(
    individual: &str,
    wave: u32,
    wave_rows: &[PanelRow],
    psych: &mut PsychCostAccumulator,
    out: &mut Vec<AugmentedRow>,
) {
    let mut ledger = ArrearsLedger::from_wave(wave_rows);
    let mut acc = WaveAccumulator::new();

    for row in wave_rows {
        let norm = normalize::normalize(row);

        let allocated_ratio = row
            .amount_repaid()
            .and_then(|repaid| allocate_repayment(&mut ledger, repaid));

        let cumulative_accrual_ratio = acc.accrual(norm.accrual_ratio);
        let cumulative_allocated_ratio = acc.allocated(allocated_ratio);
        let (net_share, cumulative_net_share) =
            acc.net_share(norm.accrual_ratio, allocated_ratio);
        let (psych_cost_increment, psychological_cost) =
            psych.fold(allocated_ratio, norm.raw_repaid_ratio);

        out.push(AugmentedRow {
            key: row.key().clone(),
            columns: ShareColumns {
                cumulative_net_share: Some(cumulative_net_share),
                psychological_cost: Some(psychological_cost),
                cumulative_accrual_ratio,
                cumulative_allocated_ratio,
                accrual_ratio: norm.accrual_ratio,
                allocated_ratio,
                raw_repaid_ratio: norm.raw_repaid_ratio,
                psych_cost_increment: Some(psych_cost_increment),
                net_share: Some(net_share),
            },
        });
    }

    audit_wave(individual, wave, &ledger);
}

/// Conservation audit: consumed never exceeds accrued, remainder never negative
fn audit_wave(individual: &str, wave: u32, ledger: &ArrearsLedger) {
    let accrued = ledger.total_accrued();
    let consumed = ledger.total_consumed();
    let remaining = ledger.remaining();

    debug_assert!(consumed <= accrued, "wave consumed more than it accrued");
    debug_assert!(remaining >= 0.0, "negative unresolved balance");

    log::debug!(
        "id {individual} wave {wave}: accrued {accrued:.2}, \
         consumed {consumed:.2}, unresolved {remaining:.2}"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::month::Month;

    #[test]
    fn test_output_preserves_key_order_and_length() {
        let panel = Panel::from_rows(vec![
            PanelRow::new("B", 1, Month::new(2), 100.0),
            PanelRow::new("A", 1, Month::new(1), 100.0).with_owed(50.0),
        ])
        .unwrap();

        let augmented = compute_shares(&panel);
        assert_eq!(augmented.len(), 2);
        assert_eq!(augmented.rows()[0].key.individual, "A");
        assert_eq!(augmented.rows()[1].key.individual, "B");
    }

    #[test]
    fn test_row_without_events_has_zero_defined_sums() {
        let panel =
            Panel::from_rows(vec![PanelRow::new("A", 1, Month::new(1), 100.0)])
                .unwrap();

        let result = compute_shares(&panel);
        let columns = &result.rows()[0].columns;
        assert_eq!(columns.accrual_ratio, None);
        assert_eq!(columns.allocated_ratio, None);
        assert_eq!(columns.cumulative_accrual_ratio, None);
        assert_eq!(columns.net_share, Some(0.0));
        assert_eq!(columns.cumulative_net_share, Some(0.0));
        assert_eq!(columns.psychological_cost, Some(0.0));
    }

    #[test]
    fn test_ledger_state_carries_between_repayment_rows() {
        // One arrear of 50 (supposed wage 100), repaid 20 then 30
        let panel = Panel::from_rows(vec![
            PanelRow::new("A", 1, Month::new(1), 50.0).with_owed(50.0),
            PanelRow::new("A", 1, Month::new(2), 100.0).with_repaid(20.0),
            PanelRow::new("A", 1, Month::new(3), 100.0).with_repaid(30.0),
        ])
        .unwrap();

        let rows = compute_shares(&panel);
        assert_eq!(rows.rows()[1].columns.allocated_ratio, Some(0.2));
        assert_eq!(rows.rows()[2].columns.allocated_ratio, Some(0.3));
    }
}
