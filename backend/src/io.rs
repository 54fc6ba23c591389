//! Panel I/O boundary
//!
//! Loads the input panel from, and writes the augmented panel to, JSON-lines
//! files: one object per row. This stands in for the columnar statistical
//! file format of the surrounding pipeline; only the columns are contractual.
//!
//! Input row shape:
//!
//! ```json
//! {"id": "W01", "wave": 1, "modate": 660, "wage": 150.0,
//!  "amount_owed": 50.0, "amount_repaid": null}
//! ```
//!
//! `amount_owed` and `amount_repaid` may be `null` or omitted. A missing or
//! null required column (`id`, `wave`, `modate`, `wage`) aborts the load
//! with the column and line named: it is never silently defaulted.
//!
//! The module also computes a SHA-256 digest over the serialized output,
//! used to verify that identical inputs produce byte-identical results.

use crate::core::month::Month;
use crate::engine::AugmentedPanel;
use crate::models::panel::{Panel, PanelError};
use crate::models::record::PanelRow;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors raised at the panel I/O boundary
///
/// All of these are fatal: either the full augmented panel is produced, or
/// the run aborts before writing any output.
#[derive(Debug, Error)]
pub enum PanelIoError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to write {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },

    #[error("line {line}: invalid JSON: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: not a JSON object")]
    NotAnObject { line: usize },

    #[error("line {line}: missing required column `{column}`")]
    MissingColumn { line: usize, column: &'static str },

    #[error("line {line}: invalid value for `{column}`: {message}")]
    InvalidValue {
        line: usize,
        column: &'static str,
        message: String,
    },

    #[error(transparent)]
    Panel(#[from] PanelError),

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Parse a panel from JSON-lines text
///
/// Empty lines are ignored. Validates structure (required columns, value
/// types) per line, then panel invariants (duplicate keys, negative
/// amounts) across the whole set.
///
/// # Example
///
/// ```rust
/// use arrears_shares_core_rs::io::parse_panel_str;
///
/// let input = r#"
/// {"id": "W01", "wave": 1, "modate": 660, "wage": 100.0, "amount_owed": 50.0}
/// {"id": "W01", "wave": 1, "modate": 661, "wage": 100.0, "amount_repaid": 50.0}
/// "#;
/// let panel = parse_panel_str(input).unwrap();
/// assert_eq!(panel.len(), 2);
/// ```
pub fn parse_panel_str(text: &str) -> Result<Panel, PanelIoError> {
    let mut rows = Vec::new();

    for (index, raw_line) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw_line.trim();
        if trimmed.is_empty() {
            continue;
        }
        rows.push(parse_row(trimmed, line)?);
    }

    Ok(Panel::from_rows(rows)?)
}

/// Load a panel from a JSON-lines file
pub fn load_panel<P: AsRef<Path>>(path: P) -> Result<Panel, PanelIoError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| PanelIoError::Read {
        path: path.display().to_string(),
        source,
    })?;
    parse_panel_str(&text)
}

/// Render the augmented panel as JSON-lines text
pub fn render_panel(panel: &AugmentedPanel) -> Result<String, PanelIoError> {
    let mut output = String::new();
    for row in panel.rows() {
        output.push_str(&serde_json::to_string(row)?);
        output.push('\n');
    }
    Ok(output)
}

/// Write the augmented panel to a JSON-lines file
pub fn write_panel<P: AsRef<Path>>(
    path: P,
    panel: &AugmentedPanel,
) -> Result<(), PanelIoError> {
    let path = path.as_ref();
    let text = render_panel(panel)?;
    fs::write(path, text).map_err(|source| PanelIoError::Write {
        path: path.display().to_string(),
        source,
    })
}

/// SHA-256 digest of the serialized augmented panel
///
/// Identical inputs must produce identical digests across runs; the CLI
/// logs this value and the determinism tests assert on it.
pub fn panel_digest(panel: &AugmentedPanel) -> Result<String, PanelIoError> {
    let text = render_panel(panel)?;
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Parse one input row object
fn parse_row(text: &str, line: usize) -> Result<PanelRow, PanelIoError> {
    let value: Value = serde_json::from_str(text).map_err(|e| PanelIoError::Parse {
        line,
        message: e.to_string(),
    })?;
    let Some(object) = value.as_object() else {
        return Err(PanelIoError::NotAnObject { line });
    };

    let individual = individual_field(object.get("id"), line)?;
    let wave = integer_field(object.get("wave"), "wave", line)?;
    let wave = u32::try_from(wave).map_err(|_| PanelIoError::InvalidValue {
        line,
        column: "wave",
        message: format!("{} is out of range", wave),
    })?;
    let modate = integer_field(object.get("modate"), "modate", line)?;
    let modate =
        i32::try_from(modate).map_err(|_| PanelIoError::InvalidValue {
            line,
            column: "modate",
            message: format!("{} is out of range", modate),
        })?;
    let wage = required_number(object.get("wage"), "wage", line)?;

    let mut row = PanelRow::new(&individual, wave, Month::new(modate), wage);
    if let Some(owed) = optional_number(object.get("amount_owed"), "amount_owed", line)? {
        row = row.with_owed(owed);
    }
    if let Some(repaid) =
        optional_number(object.get("amount_repaid"), "amount_repaid", line)?
    {
        row = row.with_repaid(repaid);
    }
    Ok(row)
}

/// The `id` column: a string, or an integer rendered as its decimal form
fn individual_field(value: Option<&Value>, line: usize) -> Result<String, PanelIoError> {
    match value {
        None | Some(Value::Null) => Err(PanelIoError::MissingColumn { line, column: "id" }),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        Some(other) => Err(PanelIoError::InvalidValue {
            line,
            column: "id",
            message: format!("expected string or integer, got {}", other),
        }),
    }
}

fn integer_field(
    value: Option<&Value>,
    column: &'static str,
    line: usize,
) -> Result<i64, PanelIoError> {
    match value {
        None | Some(Value::Null) => Err(PanelIoError::MissingColumn { line, column }),
        Some(v) => v.as_i64().ok_or_else(|| PanelIoError::InvalidValue {
            line,
            column,
            message: format!("expected integer, got {}", v),
        }),
    }
}

fn required_number(
    value: Option<&Value>,
    column: &'static str,
    line: usize,
) -> Result<f64, PanelIoError> {
    match value {
        None | Some(Value::Null) => Err(PanelIoError::MissingColumn { line, column }),
        Some(v) => v.as_f64().ok_or_else(|| PanelIoError::InvalidValue {
            line,
            column,
            message: format!("expected number, got {}", v),
        }),
    }
}

fn optional_number(
    value: Option<&Value>,
    column: &'static str,
    line: usize,
) -> Result<Option<f64>, PanelIoError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .map(Some)
            .ok_or_else(|| PanelIoError::InvalidValue {
                line,
                column,
                message: format!("expected number or null, got {}", v),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_wage_column_is_fatal() {
        let input = r#"{"id": "W01", "wave": 1, "modate": 660}"#;
        let err = parse_panel_str(input).unwrap_err();
        assert!(matches!(
            err,
            PanelIoError::MissingColumn { line: 1, column: "wage" }
        ));
    }

    #[test]
    fn test_null_required_column_counts_as_missing() {
        let input = r#"{"id": null, "wave": 1, "modate": 660, "wage": 10.0}"#;
        let err = parse_panel_str(input).unwrap_err();
        assert!(matches!(
            err,
            PanelIoError::MissingColumn { line: 1, column: "id" }
        ));
    }

    #[test]
    fn test_numeric_id_is_accepted() {
        let input = r#"{"id": 42, "wave": 1, "modate": 660, "wage": 10.0}"#;
        let panel = parse_panel_str(input).unwrap();
        assert_eq!(panel.rows()[0].individual(), "42");
    }

    #[test]
    fn test_line_number_in_diagnostics_counts_raw_lines() {
        let input = "\n{\"id\": \"A\", \"wave\": 1, \"modate\": 1, \"wage\": 1.0}\n{\"id\": \"A\", \"wave\": \"x\", \"modate\": 2, \"wage\": 1.0}\n";
        let err = parse_panel_str(input).unwrap_err();
        assert!(matches!(
            err,
            PanelIoError::InvalidValue { line: 3, column: "wave", .. }
        ));
    }
}
