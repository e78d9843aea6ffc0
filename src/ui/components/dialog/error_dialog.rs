//! Error dialog component

use super::base::{key_span, render_dialog, DialogConfig};
use ratatui::{style::Color, text::Span, Frame};

/// Render an error dialog overlay centered on the screen
pub fn render_error_dialog(frame: &mut Frame, error_message: &str) {
    let hint = vec![
        Span::raw("Press "),
        key_span("Enter"),
        Span::raw(" or "),
        key_span("Esc"),
        Span::raw(" to dismiss"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Error",
            color: Color::Red,
            message: error_message,
            hint,
            max_width: 60,
        },
    );
}
