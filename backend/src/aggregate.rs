//! Cumulative aggregation
//!
//! Running sums folded over the panel in a single forward pass:
//!
//! - [`WaveAccumulator`]: three per-wave sums (cumulative accrual ratio,
//!   cumulative allocated ratio, cumulative net share); reset at every wave
//!   boundary
//! - [`PsychCostAccumulator`]: the psychological-cost sum; spans all waves
//!   of one individual and resets only between individuals
//!
//! Absence rule: an absent operand contributes zero to a running total, but
//! a row whose own ratio is absent reports an absent cumulative value for
//! that sum (the total continues past it unchanged).

use serde::{Deserialize, Serialize};

/// Per-wave running sums
///
/// # Example
///
/// ```rust
/// use arrears_shares_core_rs::WaveAccumulator;
///
/// let mut acc = WaveAccumulator::new();
/// assert_eq!(acc.accrual(Some(0.25)), Some(0.25));
/// assert_eq!(acc.accrual(None), None);      // row's own value is absent...
/// assert_eq!(acc.accrual(Some(0.5)), Some(0.75)); // ...but the sum went on
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaveAccumulator {
    /// Running sum of accrual ratios
    accrual_total: f64,

    /// Running sum of allocated-repaid ratios
    allocated_total: f64,

    /// Running sum of net shares
    net_share_total: f64,
}

impl WaveAccumulator {
    /// Create a fresh accumulator (start of a wave)
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one row's accrual ratio; returns the row's cumulative value
    pub fn accrual(&mut self, accrual_ratio: Option<f64>) -> Option<f64> {
        let value = accrual_ratio?;
        self.accrual_total += value;
        Some(self.accrual_total)
    }

    /// Fold one row's allocated ratio; returns the row's cumulative value
    pub fn allocated(&mut self, allocated_ratio: Option<f64>) -> Option<f64> {
        let value = allocated_ratio?;
        self.allocated_total += value;
        Some(self.allocated_total)
    }

    /// Fold one row's net share; returns `(net_share, cumulative_net_share)`
    ///
    /// The net share itself treats absent operands as zero, so it is defined
    /// for every row, as is its running sum.
    pub fn net_share(
        &mut self,
        accrual_ratio: Option<f64>,
        allocated_ratio: Option<f64>,
    ) -> (f64, f64) {
        let share = accrual_ratio.unwrap_or(0.0) - allocated_ratio.unwrap_or(0.0);
        self.net_share_total += share;
        (share, self.net_share_total)
    }
}

/// Cross-wave psychological-cost accumulator
///
/// Accumulates `allocated_ratio - raw_repaid_ratio` per row over all waves
/// of one individual, in wave-then-month order. The running total continues
/// across wave boundaries; it resets only between individuals.
///
/// # Example
///
/// ```rust
/// use arrears_shares_core_rs::PsychCostAccumulator;
///
/// let mut acc = PsychCostAccumulator::new();
/// let (increment, total) = acc.fold(Some(0.65), Some(0.5));
/// assert!((increment - 0.15).abs() < 1e-12);
/// assert_eq!(increment, total);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PsychCostAccumulator {
    /// Running sum of per-row increments
    total: f64,
}

impl PsychCostAccumulator {
    /// Create a fresh accumulator (start of an individual)
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one row; returns `(increment, running_total)`
    pub fn fold(
        &mut self,
        allocated_ratio: Option<f64>,
        raw_repaid_ratio: Option<f64>,
    ) -> (f64, f64) {
        let increment =
            allocated_ratio.unwrap_or(0.0) - raw_repaid_ratio.unwrap_or(0.0);
        self.total += increment;
        (increment, self.total)
    }
}
