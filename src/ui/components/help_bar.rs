//! Contextual help bar component.
//!
//! Displays context-sensitive keyboard shortcut hints at the bottom of the screen.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::events::{get_context_hints, KeyContext};

/// Render the hints for `context`, prefixed by `status` spans.
pub fn render_context_help(
    frame: &mut Frame,
    area: Rect,
    context: KeyContext,
    status: Vec<Span<'static>>,
) {
    let mut spans = status;
    spans.push(Span::raw(" "));
    spans.extend(parse_hints_to_spans(get_context_hints(context)));
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Split hint text into styled spans, keys (in brackets) in cyan.
fn parse_hints_to_spans(hints: &str) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut in_bracket = false;

    for c in hints.chars() {
        match c {
            '[' => {
                if !current.is_empty() {
                    spans.push(Span::styled(
                        std::mem::take(&mut current),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                in_bracket = true;
                current.push(c);
            }
            ']' if in_bracket => {
                current.push(c);
                spans.push(Span::styled(
                    std::mem::take(&mut current),
                    Style::default().fg(Color::Cyan),
                ));
                in_bracket = false;
            }
            _ => current.push(c),
        }
    }

    if !current.is_empty() {
        spans.push(Span::styled(current, Style::default().fg(Color::DarkGray)));
    }

    spans
}
