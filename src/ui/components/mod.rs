//! Reusable UI components

mod button;
mod dialog;
mod progress;

pub use button::{render_button, BUTTON_HEIGHT};
pub use dialog::{render_error_dialog, render_failure_dialog};
pub use progress::render_progress;
