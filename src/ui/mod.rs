//! Terminal output helpers for the CLI
//!
//! Spinners and colors in interactive terminals, plain bracketed status
//! lines in CI and when output is piped.

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{key_value, section, step_ok, step_ok_detail, step_warn, step_warn_hint};
pub use progress::TaskSpinner;
