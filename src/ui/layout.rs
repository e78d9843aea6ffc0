//! Layout components (content area, status bar)

use crate::app::App;
use crate::state::View;
use meetup_intake::catalog::FormKind;
use meetup_intake::forms::{FormController, FormStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Create the main layout, reserving the bottom line for the status bar
pub fn create_layout(area: Rect) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    chunks[0]
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![];

    // Gateway health
    let failing = app.config.simulate_failure.unwrap_or(false);
    let gateway_status = if failing {
        Span::styled(" ○ ", Style::default().fg(Color::Red))
    } else {
        Span::styled(" ● ", Style::default().fg(Color::Green))
    };
    spans.push(gateway_status);
    spans.push(Span::styled(
        app.gateway_label(),
        Style::default().fg(Color::Gray),
    ));
    spans.push(Span::raw(" | "));

    // View-specific hints
    let status = app.active_session().map(FormController::status);
    let hints = get_view_hints(app.state.current_view, status, app.active_kind());
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    // Copy message
    if let Some(msg) = &app.copy_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    // Quit hint on the right
    let quit_hint = " ^C:quit ";
    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View, status: Option<FormStatus>, kind: Option<FormKind>) -> &'static str {
    match (view, status) {
        (View::Picker, _) => "j/k:nav  Enter:open  f:toggle failures  q:quit",
        (View::Form, None | Some(FormStatus::Editing)) => {
            "Tab:next  ←/→:choose  Space:toggle  Enter:continue  Esc:back  ^R:reset"
        }
        (View::Form, Some(FormStatus::Submitting)) => "Esc:cancel  ^R:start over",
        (View::Form, Some(FormStatus::Failed)) => "Enter:retry  ^R:start over  Esc:forms",
        (View::Form, Some(FormStatus::Submitted)) => {
            if kind == Some(FormKind::EventRegistration) {
                "c:copy reference  g/o:copy calendar link  Enter:new  Esc:forms"
            } else {
                "c:copy reference  Enter:new  Esc:forms"
            }
        }
    }
}
