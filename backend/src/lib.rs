//! Arrears Shares Core - Rust Engine
//!
//! Computes wage-relative repayment shares over a monthly arrears panel with
//! deterministic, single-pass execution.
//!
//! # Architecture
//!
//! - **core**: Month indexing
//! - **models**: Domain types (PanelRow, Panel, ShareColumns)
//! - **normalize**: Supposed wage and wage-relative ratios
//! - **ledger**: Per-wave FIFO queue of unresolved arrear months
//! - **allocation**: FIFO matching of repayments against old arrears
//! - **aggregate**: Per-wave running sums and the cross-wave psych-cost sum
//! - **engine**: The forward pass and result assembly
//! - **io**: JSON-lines panel loading/writing and the output digest
//!
//! # Critical Invariants
//!
//! 1. Repayments discharge arrear months strictly oldest-first (FIFO)
//! 2. Credits within a wave never exceed what the wave accrued
//! 3. Undefined ratios are absent values, never NaN and never errors
//! 4. The psychological-cost sum persists across waves of one individual
//! 5. Identical input panels produce byte-identical output

// Module declarations
pub mod aggregate;
pub mod allocation;
pub mod core;
pub mod engine;
pub mod io;
pub mod ledger;
pub mod models;
pub mod normalize;

// Re-exports for convenience
pub use aggregate::{PsychCostAccumulator, WaveAccumulator};
pub use allocation::allocate_repayment;
pub use crate::core::month::Month;
pub use engine::{compute_shares, AugmentedPanel, AugmentedRow};
pub use io::{
    load_panel, panel_digest, parse_panel_str, render_panel, write_panel,
    PanelIoError,
};
pub use ledger::{ArrearEntry, ArrearsLedger};
pub use models::{Panel, PanelError, PanelKey, PanelRow, ShareColumns};
pub use normalize::{normalize, NormalizedRow};

// FFI module (when feature enabled)
#[cfg(feature = "pyo3")]
pub mod ffi;

// PyO3 exports (when feature enabled)
#[cfg(feature = "pyo3")]
use pyo3::prelude::*;

#[cfg(feature = "pyo3")]
#[pymodule]
fn arrears_shares_core_rs(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(ffi::compute_shares_json, m)?)?;
    Ok(())
}
