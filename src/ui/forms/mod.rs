//! Form view: header, step indicator, fields and actions

mod field_renderer;
mod success;

use super::components::{render_button, render_failure_dialog, render_progress, BUTTON_HEIGHT};
use crate::app::App;
use field_renderer::{draw_field, field_height, visible_range, FieldView};
use meetup_intake::catalog::FormKind;
use meetup_intake::config::EventDetails;
use meetup_intake::forms::{FormController, FormStatus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw the active form
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(kind) = app.active_kind() else {
        return;
    };
    let Some(form) = app.session(kind) else {
        return;
    };

    let event = app.config.event();
    let header_height = if kind == FormKind::EventRegistration { 4 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header_height),
            Constraint::Min(0),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .split(area);

    draw_header(frame, chunks[0], kind, form, &event);

    if form.status() == FormStatus::Submitted {
        success::draw(frame, chunks[1], kind, form, &event);
        render_button(frame, chunks[2], "Enter  New submission", true, true);
        return;
    }

    draw_body(frame, chunks[1], app, form);

    match (form.status(), app.spinner(kind)) {
        (FormStatus::Submitting, Some(spinner)) => {
            render_progress(frame, chunks[2], spinner, "Submitting...")
        }
        _ => draw_actions(frame, chunks[2], kind, form),
    }

    if let Some(failure) = form.failure() {
        render_failure_dialog(frame, &failure.to_string());
    }
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    kind: FormKind,
    form: &FormController,
    event: &EventDetails,
) {
    let mut title = vec![Span::styled(
        kind.title(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if form.step_count() > 1 {
        title.push(Span::styled(
            format!("  Step {} of {}  ", form.current_step() + 1, form.step_count()),
            Style::default().fg(Color::Gray),
        ));
        title.push(Span::styled(
            step_dots(form.current_step(), form.step_count()),
            Style::default().fg(Color::Cyan),
        ));
    }

    let mut lines = vec![Line::from(title)];
    if kind == FormKind::EventRegistration {
        lines.push(Line::from(Span::styled(
            format!(
                "{}  {} to {}  {}  {} spots left",
                event.title,
                event.starts_at.format("%a %d %b %Y, %H:%M"),
                event.ends_at.format("%H:%M"),
                event.location,
                event.spots_left()
            ),
            Style::default().fg(Color::DarkGray),
        )));
    }

    let header = Paragraph::new(lines).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

/// "● ● ○" with the current step filled
fn step_dots(current: usize, count: usize) -> String {
    (0..count)
        .map(|i| if i <= current { "●" } else { "○" })
        .collect::<Vec<_>>()
        .join(" ")
}

fn draw_body(frame: &mut Frame, area: Rect, app: &App, form: &FormController) {
    let fields = form.current_fields();

    // Final step of a wizard reviews what was entered earlier
    let fields_area = if form.step_count() > 1 && form.is_last_step() {
        let review: Vec<(String, String)> = form
            .summary()
            .into_iter()
            .filter(|(label, _)| !fields.iter().any(|f| &f.label == label))
            .collect();
        let review_height = (review.len() as u16 + 2).min(area.height / 2);
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(review_height), Constraint::Min(0)])
            .split(area);
        draw_review(frame, chunks[0], &review);
        chunks[1]
    } else {
        area
    };

    let heights: Vec<u16> = fields.iter().map(|f| field_height(f)).collect();
    let range = visible_range(&heights, app.state.active_form_field, fields_area.height);

    let mut y = fields_area.y;
    for idx in range {
        let spec = fields[idx];
        let height = heights[idx].min(fields_area.bottom().saturating_sub(y));
        if height == 0 {
            break;
        }
        let field_area = Rect {
            x: fields_area.x,
            y,
            width: fields_area.width,
            height,
        };
        draw_field(
            frame,
            field_area,
            FieldView {
                spec,
                value: form.value(&spec.name),
                error: form.error(&spec.name),
                is_active: idx == app.state.active_form_field && !form.is_busy(),
                option_cursor: app.state.option_cursor,
            },
        );
        y += height;
    }
}

fn draw_review(frame: &mut Frame, area: Rect, review: &[(String, String)]) {
    let lines: Vec<Line> = review
        .iter()
        .map(|(label, value)| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(Color::Gray)),
                Span::raw(value.as_str()),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Review your details ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_actions(frame: &mut Frame, area: Rect, kind: FormKind, form: &FormController) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let can_go_back = form.status() == FormStatus::Editing && form.current_step() > 0;
    render_button(frame, chunks[0], "Esc  Back", false, can_go_back);

    let primary = match form.status() {
        FormStatus::Failed => "Retry",
        _ if form.is_last_step() => kind.submit_label(),
        _ => "Continue",
    };
    render_button(
        frame,
        chunks[1],
        &format!("Enter  {primary}"),
        true,
        !form.is_busy(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_dots() {
        assert_eq!(step_dots(0, 3), "● ○ ○");
        assert_eq!(step_dots(2, 3), "● ● ●");
        assert_eq!(step_dots(0, 1), "●");
    }
}
