//! Domain models for the arrears panel

pub mod panel;
pub mod record;

// Re-exports
pub use panel::{Panel, PanelError};
pub use record::{PanelKey, PanelRow, ShareColumns};
