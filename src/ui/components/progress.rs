//! Submission progress bar

use crate::state::SpinnerState;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, Gauge},
    Frame,
};

/// Render the eased progress gauge with a spinner in its label
pub fn render_progress(frame: &mut Frame, area: Rect, spinner: &SpinnerState, label: &str) {
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        )
        .gauge_style(Style::default().fg(Color::Blue).bg(Color::Black))
        .ratio(f64::from(spinner.progress()))
        .label(format!("{} {label}", spinner.frame()));

    frame.render_widget(gauge, area);
}
