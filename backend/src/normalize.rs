//! Wage normalization
//!
//! Every ratio in the system is relative to the *supposed wage*: the wage
//! the individual would have received had no arrears accrued that month
//! (amount owed plus wage actually paid).
//!
//! Normalization is row-local and pure: no ordering dependency. A division
//! with a zero or absent denominator is an undefined ratio and propagates as
//! `None`, never as NaN and never as an error.

use crate::models::record::PanelRow;

/// Row-local normalized quantities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedRow {
    /// Wage that was supposed to be paid this month (owed + paid)
    pub supposed_wage: f64,

    /// `amount_owed / supposed_wage`; absent when owed is absent or the
    /// supposed wage is zero
    pub accrual_ratio: Option<f64>,

    /// `amount_repaid / supposed_wage`; same absence rule
    pub raw_repaid_ratio: Option<f64>,
}

/// Compute the supposed wage for one row
pub fn supposed_wage(row: &PanelRow) -> f64 {
    row.amount_owed().unwrap_or(0.0) + row.wage()
}

/// Divide an optional amount by the supposed wage
///
/// Returns `None` when the numerator is absent or the denominator is zero
/// or non-finite; otherwise the finite quotient.
///
/// # Example
/// ```
/// use arrears_shares_core_rs::normalize::ratio;
///
/// assert_eq!(ratio(Some(50.0), 200.0), Some(0.25));
/// assert_eq!(ratio(Some(50.0), 0.0), None);
/// assert_eq!(ratio(None, 200.0), None);
/// ```
pub fn ratio(numerator: Option<f64>, denominator: f64) -> Option<f64> {
    let numerator = numerator?;
    if denominator == 0.0 || !denominator.is_finite() {
        return None;
    }
    let value = numerator / denominator;
    value.is_finite().then_some(value)
}

/// Normalize one row in isolation
///
/// # Example
/// ```
/// use arrears_shares_core_rs::{Month, PanelRow};
/// use arrears_shares_core_rs::normalize::normalize;
///
/// let row = PanelRow::new("W01", 1, Month::new(660), 150.0).with_owed(50.0);
/// let norm = normalize(&row);
/// assert_eq!(norm.supposed_wage, 200.0);
/// assert_eq!(norm.accrual_ratio, Some(0.25));
/// assert_eq!(norm.raw_repaid_ratio, None);
/// ```
pub fn normalize(row: &PanelRow) -> NormalizedRow {
    let supposed = supposed_wage(row);
    NormalizedRow {
        supposed_wage: supposed,
        accrual_ratio: ratio(row.amount_owed(), supposed),
        raw_repaid_ratio: ratio(row.amount_repaid(), supposed),
    }
}
