//! PyO3 wrapper for the share engine
//!
//! This module provides the Python interface to the Rust engine, so the
//! surrounding (Python) pipeline can run the computation in-process instead
//! of shelling out to the CLI. The exchange format is the same JSON-lines
//! representation the CLI reads and writes.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::engine::compute_shares;
use crate::io::{parse_panel_str, render_panel};

/// Compute the augmented panel for a JSON-lines input panel
///
/// # Arguments
///
/// * `input` - JSON-lines text, one panel row object per line
///
/// # Returns
///
/// JSON-lines text with the nine derived columns per row
///
/// # Errors
///
/// Raises ValueError on any structural input error (missing column,
/// duplicate key, negative amount)
///
/// # Example (from Python)
///
/// ```python
/// from arrears_shares_core_rs import compute_shares_json
///
/// rows = '\n'.join([
///     '{"id": "W01", "wave": 1, "modate": 660, "wage": 100.0, "amount_owed": 100.0}',
///     '{"id": "W01", "wave": 1, "modate": 661, "wage": 150.0, "amount_owed": 50.0, "amount_repaid": 130.0}',
/// ])
/// print(compute_shares_json(rows))
/// ```
#[pyfunction]
pub fn compute_shares_json(input: &str) -> PyResult<String> {
    let panel =
        parse_panel_str(input).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let augmented = compute_shares(&panel);
    render_panel(&augmented).map_err(|e| PyValueError::new_err(e.to_string()))
}
