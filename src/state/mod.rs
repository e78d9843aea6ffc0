//! Application state module

mod app_state;
mod spinner_state;

pub use app_state::*;
pub use spinner_state::*;
