//! Field rendering utilities for forms

use meetup_intake::forms::{FieldKind, FieldSpec, FieldValue, ValidationError};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::ops::Range;

/// Everything needed to draw one field
pub struct FieldView<'a> {
    pub spec: &'a FieldSpec,
    pub value: Option<&'a FieldValue>,
    pub error: Option<&'a ValidationError>,
    pub is_active: bool,
    /// Highlighted option of a checkbox group
    pub option_cursor: usize,
}

/// Rows a field occupies, borders included
pub fn field_height(spec: &FieldSpec) -> u16 {
    match spec.kind {
        FieldKind::TextArea => 5,
        FieldKind::Checkbox if spec.is_checkbox_group() => spec.allowed_values.len() as u16 + 2,
        _ => 3,
    }
}

/// Fields to draw so that the active one is on screen
pub fn visible_range(heights: &[u16], active: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);

    let mut start = 0;
    while start < active && heights[start..=active].iter().sum::<u16>() > available {
        start += 1;
    }

    let mut end = start;
    let mut used = 0u16;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }
    start..end.max(start + 1)
}

/// "intermediate" -> "Intermediate"
pub fn option_label(option: &str) -> String {
    let mut chars = option.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Draw a form field with its label, value and any validation error
pub fn draw_field(frame: &mut Frame, area: Rect, field: FieldView) {
    let FieldView {
        spec,
        value,
        error,
        is_active,
        option_cursor,
    } = field;

    let border_style = if error.is_some() {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let title = if spec.required {
        format!(" {} * ", spec.label)
    } else {
        format!(" {} ", spec.label)
    };
    let mut block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red),
        )));
    }

    let content = match spec.kind {
        FieldKind::Select => select_content(spec, value, is_active),
        FieldKind::Checkbox if spec.is_checkbox_group() => {
            group_content(spec, value, is_active, option_cursor)
        }
        FieldKind::Checkbox => checkbox_content(value, is_active),
        _ => text_content(spec, value, is_active),
    };

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

fn value_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn text_content<'a>(
    spec: &'a FieldSpec,
    value: Option<&'a FieldValue>,
    is_active: bool,
) -> Paragraph<'a> {
    let text = value.map(FieldValue::as_text).unwrap_or_default();
    let cursor = Span::styled(if is_active { "▌" } else { "" }, value_style(true));

    if text.is_empty() {
        let hint = match (&spec.placeholder, is_active) {
            (Some(placeholder), _) => placeholder.as_str(),
            (None, false) => "(empty)",
            (None, true) => "",
        };
        return Paragraph::new(Line::from(vec![
            cursor,
            Span::styled(
                hint,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]));
    }

    let mut lines: Vec<Line> = if spec.kind.is_multiline() {
        text.lines()
            .map(|l| Line::from(Span::styled(l, value_style(is_active))))
            .collect()
    } else {
        vec![Line::from(Span::styled(text, value_style(is_active)))]
    };
    match lines.last_mut() {
        Some(last) => last.spans.push(cursor),
        None => lines.push(Line::from(cursor)),
    }
    Paragraph::new(lines)
}

fn select_content<'a>(
    spec: &'a FieldSpec,
    value: Option<&'a FieldValue>,
    is_active: bool,
) -> Paragraph<'a> {
    let chosen = value.map(FieldValue::as_text).filter(|v| !v.is_empty());
    let (text, style) = match chosen {
        Some(v) => (option_label(v), value_style(is_active)),
        None => (
            "choose an option".to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    };

    let mut spans = vec![];
    if is_active {
        spans.push(Span::styled("‹ ", value_style(true)));
    }
    spans.push(Span::styled(text, style));
    if is_active {
        spans.push(Span::styled(" ›", value_style(true)));
        spans.push(Span::styled(
            format!("  ({} options)", spec.allowed_values.len()),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Paragraph::new(Line::from(spans))
}

fn checkbox_content(value: Option<&FieldValue>, is_active: bool) -> Paragraph<'static> {
    let checked = matches!(value, Some(FieldValue::Flag(true)));
    let mark = if checked { "[x]" } else { "[ ]" };
    let mut spans = vec![Span::styled(mark, value_style(is_active))];
    if is_active {
        spans.push(Span::styled(
            "  Space to toggle",
            Style::default().fg(Color::DarkGray),
        ));
    }
    Paragraph::new(Line::from(spans))
}

fn group_content<'a>(
    spec: &'a FieldSpec,
    value: Option<&'a FieldValue>,
    is_active: bool,
    option_cursor: usize,
) -> Paragraph<'a> {
    let selected = match value {
        Some(FieldValue::Choices(set)) => Some(set),
        _ => None,
    };

    let lines: Vec<Line> = spec
        .allowed_values
        .iter()
        .enumerate()
        .map(|(idx, option)| {
            let checked = selected.is_some_and(|set| set.contains(option));
            let mark = if checked { "[x]" } else { "[ ]" };
            let style = if is_active && idx == option_cursor {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(
                format!("{mark} {}", option_label(option)),
                style,
            ))
        })
        .collect();
    Paragraph::new(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod heights {
        use super::*;

        #[test]
        fn test_field_heights() {
            assert_eq!(field_height(&FieldSpec::text("a", "A")), 3);
            assert_eq!(field_height(&FieldSpec::textarea("a", "A")), 5);
            assert_eq!(field_height(&FieldSpec::checkbox("a", "A")), 3);
            assert_eq!(
                field_height(&FieldSpec::checkbox_group("a", "A", &["x", "y", "z"])),
                5
            );
        }
    }

    mod scrolling {
        use super::*;

        #[test]
        fn test_everything_fits() {
            assert_eq!(visible_range(&[3, 3, 3], 0, 20), 0..3);
        }

        #[test]
        fn test_scrolls_to_active_field() {
            assert_eq!(visible_range(&[3, 3, 3, 3], 3, 7), 2..4);
        }

        #[test]
        fn test_shows_following_fields_from_top() {
            assert_eq!(visible_range(&[3, 3, 3, 3], 0, 7), 0..2);
        }

        #[test]
        fn test_active_field_taller_than_area_still_drawn() {
            assert_eq!(visible_range(&[3, 10], 1, 5), 1..2);
        }

        #[test]
        fn test_no_fields() {
            assert_eq!(visible_range(&[], 0, 10), 0..0);
        }
    }

    #[test]
    fn test_option_label() {
        assert_eq!(option_label("intermediate"), "Intermediate");
        assert_eq!(option_label(""), "");
    }
}
