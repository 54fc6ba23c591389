//! Panel collection
//!
//! A `Panel` owns the full set of input rows, sorted by (individual, wave,
//! month), and guarantees the structural invariants the engine relies on:
//!
//! 1. **Key Uniqueness**: each (individual, wave, month) appears exactly once
//! 2. **Non-Negative Amounts**: wage, owed, and repaid amounts are >= 0
//! 3. **Finite Amounts**: no NaN or infinite amounts enter the computation
//!
//! Violations are fatal before any computation starts; the offending key and
//! column are named in the error. Row order in the source file carries no
//! meaning: the contract is over the set of keyed rows.

use crate::core::month::Month;
use crate::models::record::PanelRow;
use thiserror::Error;

/// Structural validation errors for the input panel
#[derive(Debug, Error, PartialEq)]
pub enum PanelError {
    #[error("duplicate panel key: id {individual}, wave {wave}, modate {month}")]
    DuplicateKey {
        individual: String,
        wave: u32,
        month: Month,
    },

    #[error(
        "negative {column} ({value}) at id {individual}, wave {wave}, modate {month}"
    )]
    NegativeAmount {
        column: &'static str,
        individual: String,
        wave: u32,
        month: Month,
        value: f64,
    },

    #[error("non-finite {column} at id {individual}, wave {wave}, modate {month}")]
    NonFiniteAmount {
        column: &'static str,
        individual: String,
        wave: u32,
        month: Month,
    },
}

/// Validated, key-ordered input panel
///
/// # Example
///
/// ```rust
/// use arrears_shares_core_rs::{Month, Panel, PanelRow};
///
/// let panel = Panel::from_rows(vec![
///     PanelRow::new("W01", 1, Month::new(661), 150.0),
///     PanelRow::new("W01", 1, Month::new(660), 100.0).with_owed(50.0),
/// ])
/// .unwrap();
///
/// // Rows are sorted by key regardless of input order
/// assert_eq!(panel.rows()[0].month(), Month::new(660));
/// assert_eq!(panel.num_individuals(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    /// All rows, sorted by (individual, wave, month)
    rows: Vec<PanelRow>,
}

impl Panel {
    /// Build a panel from unordered rows, validating structural invariants
    ///
    /// Rows are sorted by key. Returns the first violation found:
    /// a duplicate key, a negative amount, or a non-finite amount.
    pub fn from_rows(mut rows: Vec<PanelRow>) -> Result<Self, PanelError> {
        rows.sort_by(|a, b| a.key().cmp(b.key()));

        for pair in rows.windows(2) {
            if pair[0].key() == pair[1].key() {
                let key = pair[0].key();
                return Err(PanelError::DuplicateKey {
                    individual: key.individual.clone(),
                    wave: key.wave,
                    month: key.month,
                });
            }
        }

        for row in &rows {
            check_amount(row, "wage", Some(row.wage()))?;
            check_amount(row, "amount_owed", row.amount_owed())?;
            check_amount(row, "amount_repaid", row.amount_repaid())?;
        }

        Ok(Self { rows })
    }

    /// All rows in key order
    pub fn rows(&self) -> &[PanelRow] {
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

    /// Number of distinct individuals
    pub fn num_individuals(&self) -> usize {
        self.individuals().len()
    }

    /// Contiguous row slices per individual, in id order
    pub fn individuals(&self) -> Vec<(&str, &[PanelRow])> {
        group_by(&self.rows, |row| row.individual())
    }

    /// Contiguous row slices per wave, in wave order
    ///
    /// `rows` must already be the slice of a single individual (as returned
    /// by [`Panel::individuals`]).
    pub fn waves(rows: &[PanelRow]) -> Vec<(u32, &[PanelRow])> {
        group_by(rows, |row| row.wave())
    }
}

fn check_amount(
    row: &PanelRow,
    column: &'static str,
    value: Option<f64>,
) -> Result<(), PanelError> {
    let Some(value) = value else { return Ok(()) };
    let key = row.key();
    if !value.is_finite() {
        return Err(PanelError::NonFiniteAmount {
            column,
            individual: key.individual.clone(),
            wave: key.wave,
            month: key.month,
        });
    }
    if value < 0.0 {
        return Err(PanelError::NegativeAmount {
            column,
            individual: key.individual.clone(),
            wave: key.wave,
            month: key.month,
            value,
        });
    }
    Ok(())
}

/// Split a key-sorted slice into contiguous groups with equal group keys
fn group_by<'a, K, F>(rows: &'a [PanelRow], key_of: F) -> Vec<(K, &'a [PanelRow])>
where
    K: PartialEq + Copy + 'a,
    F: Fn(&'a PanelRow) -> K,
{
    let mut groups = Vec::new();
    let mut start = 0;
    while start < rows.len() {
        let key = key_of(&rows[start]);
        let mut end = start + 1;
        while end < rows.len() && key_of(&rows[end]) == key {
            end += 1;
        }
        groups.push((key, &rows[start..end]));
        start = end;
    }
    groups
}
