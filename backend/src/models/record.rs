//! Panel record model
//!
//! One row per (individual, wave, month). Each row carries:
//! - The in-kind wage actually paid that month
//! - Optionally, the amount of new arrears accrued that month
//! - Optionally, the amount repaid against old arrears that month
//!
//! Amounts are f64 currency units: the inputs originate from a float-valued
//! statistical file and every downstream quantity is a wage-relative ratio.

use crate::core::month::Month;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identity key of a panel row
///
/// Unique per row. Ordering is individual, then wave, then month: the
/// order in which the engine walks the panel.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct PanelKey {
    /// Individual identifier
    #[serde(rename = "id")]
    pub individual: String,

    /// Observation wave (one employment spell)
    pub wave: u32,

    /// Calendar month index
    #[serde(rename = "modate")]
    pub month: Month,
}

impl fmt::Display for PanelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(id {}, wave {}, modate {})",
            self.individual, self.wave, self.month
        )
    }
}

/// One observed (individual, wave, month) row of the input panel
///
/// # Example
/// ```
/// use arrears_shares_core_rs::{Month, PanelRow};
///
/// let row = PanelRow::new("W01", 1, Month::new(660), 150.0).with_owed(50.0);
/// assert_eq!(row.wage(), 150.0);
/// assert_eq!(row.amount_owed(), Some(50.0));
/// assert_eq!(row.amount_repaid(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PanelRow {
    /// Row identity
    #[serde(flatten)]
    key: PanelKey,

    /// Wage paid in-kind this month (currency units)
    wage: f64,

    /// New arrears accrued this month; absent for months without accrual
    #[serde(default)]
    amount_owed: Option<f64>,

    /// Amount repaid this month; absent for months without repayment
    #[serde(default)]
    amount_repaid: Option<f64>,
}

impl PanelRow {
    /// Create a row with neither accrual nor repayment
    pub fn new(individual: &str, wave: u32, month: Month, wage: f64) -> Self {
        Self {
            key: PanelKey {
                individual: individual.to_string(),
                wave,
                month,
            },
            wage,
            amount_owed: None,
            amount_repaid: None,
        }
    }

    /// Set the accrued arrears amount for this month
    pub fn with_owed(mut self, amount: f64) -> Self {
        self.amount_owed = Some(amount);
        self
    }

    /// Set the repaid amount for this month
    pub fn with_repaid(mut self, amount: f64) -> Self {
        self.amount_repaid = Some(amount);
        self
    }

    /// Row identity key
    pub fn key(&self) -> &PanelKey {
        &self.key
    }

    /// Individual identifier
    pub fn individual(&self) -> &str {
        &self.key.individual
    }

    /// Observation wave
    pub fn wave(&self) -> u32 {
        self.key.wave
    }

    /// Calendar month
    pub fn month(&self) -> Month {
        self.key.month
    }

    /// Wage paid in-kind this month
    pub fn wage(&self) -> f64 {
        self.wage
    }

    /// New arrears accrued this month, if any
    pub fn amount_owed(&self) -> Option<f64> {
        self.amount_owed
    }

    /// Amount repaid this month, if any
    pub fn amount_repaid(&self) -> Option<f64> {
        self.amount_repaid
    }
}

/// The nine derived output columns of one augmented panel row
///
/// Absent values (`None`) are rows where the source quantity is undefined:
/// a ratio with a zero supposed wage, a repayment with no arrears to match,
/// or a cumulative value at a row whose own ratio is absent. Absent values
/// serialize as `null` and contribute zero to every running sum.
///
/// Field order matches the output file's column order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShareColumns {
    /// Running net share within the wave (accrual minus allocated)
    #[serde(rename = "cumsum_shares")]
    pub cumulative_net_share: Option<f64>,

    /// Psychological-cost running sum across all waves of the individual
    #[serde(rename = "psy_costs")]
    pub psychological_cost: Option<f64>,

    /// Running accrual ratio within the wave
    #[serde(rename = "cumsum_a2w")]
    pub cumulative_accrual_ratio: Option<f64>,

    /// Running allocated-repaid ratio within the wave
    #[serde(rename = "cumsum_r2w")]
    pub cumulative_allocated_ratio: Option<f64>,

    /// Arrears accrued this month over the supposed wage
    #[serde(rename = "a2w")]
    pub accrual_ratio: Option<f64>,

    /// FIFO-allocated repaid share of the supposed wage
    #[serde(rename = "r2w")]
    pub allocated_ratio: Option<f64>,

    /// Raw face-value repaid amount over the supposed wage
    #[serde(rename = "r2cw")]
    pub raw_repaid_ratio: Option<f64>,

    /// Allocated minus raw repaid ratio for this row
    #[serde(rename = "costs")]
    pub psych_cost_increment: Option<f64>,

    /// Accrual ratio minus allocated ratio for this row
    #[serde(rename = "shares")]
    pub net_share: Option<f64>,
}
