//! Base dialog component

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Configuration for rendering a dialog
pub struct DialogConfig<'a> {
    pub title: &'a str,
    /// Used for both the title and the border
    pub color: Color,
    /// Message content (can be multi-line with \n)
    pub message: &'a str,
    /// Key hints shown at the bottom
    pub hint: Vec<Span<'a>>,
    pub max_width: u16,
}

/// Render a centered dialog overlay
pub fn render_dialog(frame: &mut Frame, config: DialogConfig) {
    let padding = 4u16; // 2 chars padding on each side
    let max_line_width = config.max_width.saturating_sub(padding + 2) as usize;

    let wrapped_lines = wrap_text(config.message, max_line_width);
    let dialog_area = centered(frame.area(), &config, &wrapped_lines, padding);

    // Clear the area behind the dialog
    frame.render_widget(Clear, dialog_area);

    let mut content = vec![
        Line::from(Span::styled(
            config.title,
            Style::default()
                .fg(config.color)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    content.extend(wrapped_lines.into_iter().map(Line::from));
    if !config.hint.is_empty() {
        content.push(Line::from(""));
        content.push(Line::from(config.hint));
    }

    let dialog = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(config.color))
                .style(Style::default().bg(Color::Black)),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(dialog, dialog_area);
}

fn centered(area: Rect, config: &DialogConfig, lines: &[String], padding: u16) -> Rect {
    let content_width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(config.title.chars().count()) as u16;
    let width = (content_width + padding + 2)
        .min(config.max_width)
        .min(area.width);

    // Title + blank + message + (blank + hint) + borders
    let hint_lines = if config.hint.is_empty() { 0 } else { 2 };
    let height = (2 + lines.len() as u16 + hint_lines + 2)
        .max(5)
        .min(area.height);

    Rect {
        x: area.x + area.width.saturating_sub(width) / 2,
        y: area.y + area.height.saturating_sub(height) / 2,
        width,
        height,
    }
}

/// Wrap text to fit within a maximum width
pub(super) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_len = current_line.chars().count();
            if current_len + word.chars().count() + 1 > max_width && current_len > 0 {
                lines.push(std::mem::take(&mut current_line));
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}

/// A highlighted key name for hint lines
pub(super) fn key_span(key: &str) -> Span<'_> {
    Span::styled(
        key,
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    mod wrap_text {
        use super::*;

        #[test]
        fn test_short_text_is_one_line() {
            assert_eq!(wrap_text("offline", 20), vec!["offline"]);
        }

        #[test]
        fn test_wraps_on_word_boundaries() {
            assert_eq!(
                wrap_text("could not reach the server", 12),
                vec!["could not", "reach the", "server"]
            );
        }

        #[test]
        fn test_keeps_blank_lines() {
            assert_eq!(wrap_text("a\n\nb", 10), vec!["a", "", "b"]);
        }

        #[test]
        fn test_long_word_gets_its_own_line() {
            assert_eq!(
                wrap_text("see https://meetup.example/api", 10),
                vec!["see", "https://meetup.example/api"]
            );
        }

        #[test]
        fn test_empty_text() {
            assert_eq!(wrap_text("", 10), vec![""]);
        }
    }
}
