//! Form picker

use super::widgets::render_scrollable_list;
use crate::app::App;
use meetup_intake::catalog::FormKind;
use meetup_intake::forms::FormStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the list of forms
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "Meetup Community",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  choose a form", Style::default().fg(Color::DarkGray)),
    ]))
    .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = FormKind::ALL
        .iter()
        .enumerate()
        .map(|(idx, kind)| {
            let is_selected = idx == app.state.selected_index;
            let title_style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let steps = kind.schema().map(|s| s.step_count()).unwrap_or(0);
            let steps_label = if steps == 1 {
                "1 step".to_string()
            } else {
                format!("{steps} steps")
            };

            let mut spans = vec![
                Span::styled(format!("{:<26}", kind.title()), title_style),
                Span::styled(
                    format!("{steps_label:<10}"),
                    Style::default().fg(Color::DarkGray),
                ),
            ];
            if let Some(status) = app.session(*kind).map(|f| f.status()) {
                spans.push(status_badge(status));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Forms ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_symbol("▸ ");

    render_scrollable_list(frame, chunks[1], list, app.state.selected_index);
}

fn status_badge(status: FormStatus) -> Span<'static> {
    let color = match status {
        FormStatus::Editing => Color::Yellow,
        FormStatus::Submitting => Color::Blue,
        FormStatus::Submitted => Color::Green,
        FormStatus::Failed => Color::Red,
    };
    Span::styled(format!("[{status}]"), Style::default().fg(color))
}
