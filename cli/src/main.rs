//! Batch runner for the share computation
//!
//! Invoked with no arguments: reads the prepared panel from a fixed input
//! location, computes the augmented panel, and writes it to a fixed output
//! location. Path configuration belongs to the surrounding pipeline, not to
//! this binary.
//!
//! Logging is controlled via `RUST_LOG` (e.g. `RUST_LOG=debug` prints the
//! per-wave conservation audit).

use arrears_shares_core_rs::{
    compute_shares, load_panel, panel_digest, write_panel, PanelIoError,
};
use std::process::ExitCode;

/// Prepared input panel, one JSON object per row
const INPUT_PATH: &str = "data/to_compute_shares.jsonl";

/// Augmented output panel
const OUTPUT_PATH: &str = "data/computed_shares.jsonl";

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), PanelIoError> {
    let panel = load_panel(INPUT_PATH)?;
    log::info!(
        "loaded {} rows for {} individuals from {}",
        panel.len(),
        panel.num_individuals(),
        INPUT_PATH
    );

    let augmented = compute_shares(&panel);

    write_panel(OUTPUT_PATH, &augmented)?;
    log::info!(
        "wrote {} rows to {} (digest {})",
        augmented.len(),
        OUTPUT_PATH,
        panel_digest(&augmented)?
    );
    Ok(())
}
