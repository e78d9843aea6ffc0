//! Dialog components for TUI

mod base;
mod error_dialog;
mod failure_dialog;

pub use error_dialog::render_error_dialog;
pub use failure_dialog::render_failure_dialog;
