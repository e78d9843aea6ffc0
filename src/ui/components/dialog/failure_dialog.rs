//! Banner for a submission the gateway could not deliver

use super::base::{key_span, render_dialog, DialogConfig};
use ratatui::{style::Color, text::Span, Frame};

pub fn render_failure_dialog(frame: &mut Frame, failure: &str) {
    let message = format!(
        "{failure}\n\nYour answers are kept. Retrying sends the same submission again."
    );
    let hint = vec![
        key_span("Enter"),
        Span::raw(" retry  "),
        key_span("Ctrl+R"),
        Span::raw(" start over  "),
        key_span("Esc"),
        Span::raw(" forms"),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: "Submission failed",
            color: Color::Yellow,
            message: &message,
            hint,
            max_width: 64,
        },
    );
}
