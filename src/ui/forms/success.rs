//! Confirmation panel shown once a submission is accepted

use meetup_intake::calendar::{google_calendar_url, outlook_calendar_url};
use meetup_intake::catalog::FormKind;
use meetup_intake::config::EventDetails;
use meetup_intake::forms::FormController;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn draw(
    frame: &mut Frame,
    area: Rect,
    kind: FormKind,
    form: &FormController,
    event: &EventDetails,
) {
    let label = Style::default().fg(Color::Gray);
    let key = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines = vec![
        Line::from(Span::styled(
            "✓ Submitted",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(kind.success_message()),
        Line::from(""),
    ];

    if let Some(receipt) = form.receipt() {
        lines.push(Line::from(vec![
            Span::styled("Reference: ", label),
            Span::styled(
                receipt.reference.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled("c", key),
            Span::styled(" to copy", label),
        ]));
        lines.push(Line::from(vec![
            Span::styled("Received:  ", label),
            Span::raw(receipt.received_at.format("%Y-%m-%d %H:%M UTC").to_string()),
        ]));
    }

    if kind == FormKind::EventRegistration {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Add to calendar",
            Style::default().add_modifier(Modifier::BOLD),
        )));
        let links = [
            ("g", "Google", google_calendar_url(event)),
            ("o", "Outlook", outlook_calendar_url(event)),
        ];
        for (shortcut, name, link) in links {
            if let Ok(url) = link {
                lines.push(Line::from(vec![
                    Span::styled(shortcut, key),
                    Span::styled(format!(" {name}: "), label),
                    Span::styled(url.to_string(), Style::default().fg(Color::Blue)),
                ]));
            }
        }
    }

    let panel = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(panel, area);
}
