//! Search input for filtering the table.
//!
//! The query is edited in place while the input is focused; the table view
//! filters and highlights with whatever the query currently holds.

use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Placeholder shown while the query is empty.
const PLACEHOLDER: &str = "Search in all columns... (/)";

/// Search input state.
#[derive(Debug, Clone, Default)]
pub struct QuickSearch {
    query: String,
    /// Whether the input has focus.
    active: bool,
}

impl QuickSearch {
    /// Create an empty, unfocused search input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Focus the input, keeping the current query.
    pub fn activate(&mut self) {
        self.active = true;
    }

    /// Unfocus the input, keeping the current query.
    pub fn deactivate(&mut self) {
        self.active = false;
    }

    /// Check if the input has focus.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Get the current search query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Check if the search query is empty.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
    }

    /// Push a character to the query.
    pub fn push_char(&mut self, c: char) {
        self.query.push(c);
    }

    /// Remove the last character from the query.
    pub fn pop_char(&mut self) -> Option<char> {
        self.query.pop()
    }

    /// Clear the query.
    pub fn clear(&mut self) {
        self.query.clear();
    }
}

/// Highlight every case-insensitive occurrence of `query` in `text`.
pub fn highlight_text(text: &str, query: &str, base: Style) -> Line<'static> {
    if query.is_empty() {
        return Line::from(Span::styled(text.to_string(), base));
    }

    // Byte offsets are only valid when lowercasing keeps lengths intact.
    let text_lower = text.to_lowercase();
    let query_lower = query.to_lowercase();
    if text_lower.len() != text.len() || query_lower.len() != query.len() {
        return Line::from(Span::styled(text.to_string(), base));
    }

    let highlight = Style::default()
        .bg(Color::Yellow)
        .fg(Color::Black)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let mut last_end = 0;

    for (start, _) in text_lower.match_indices(&query_lower) {
        let end = start + query_lower.len();
        if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
            return Line::from(Span::styled(text.to_string(), base));
        }
        if start > last_end {
            spans.push(Span::styled(text[last_end..start].to_string(), base));
        }
        spans.push(Span::styled(text[start..end].to_string(), highlight));
        last_end = end;
    }

    if last_end < text.len() {
        spans.push(Span::styled(text[last_end..].to_string(), base));
    }

    Line::from(spans)
}

/// Render the search input at the given area.
pub fn render_search_bar(frame: &mut Frame, area: Rect, search: &QuickSearch, match_count: usize) {
    let line = if search.query.is_empty() && !search.active {
        Line::from(Span::styled(
            format!("🔍 {}", PLACEHOLDER),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let style = if search.active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::Gray)
        };
        Line::from(vec![
            Span::styled(format!("/{}", search.query), style),
            Span::styled(
                format!("  [{} matches]", match_count),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };

    frame.render_widget(Paragraph::new(line), area);

    if search.active {
        frame.set_cursor_position(Position::new(
            area.x + 1 + search.query.chars().count() as u16,
            area.y,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quick_search_new() {
        let search = QuickSearch::new();
        assert!(!search.is_active());
        assert!(search.is_empty());
    }

    #[test]
    fn test_activate_keeps_query() {
        let mut search = QuickSearch::new();
        search.push_char('b');
        search.activate();
        assert!(search.is_active());
        assert_eq!(search.query(), "b");

        search.deactivate();
        assert!(!search.is_active());
        assert_eq!(search.query(), "b");
    }

    #[test]
    fn test_push_pop_clear() {
        let mut search = QuickSearch::new();
        search.push_char('a');
        search.push_char('b');
        assert_eq!(search.query(), "ab");
        assert_eq!(search.pop_char(), Some('b'));
        assert_eq!(search.query(), "a");
        search.clear();
        assert!(search.is_empty());
        assert_eq!(search.pop_char(), None);
    }

    #[test]
    fn test_highlight_text_empty_query() {
        let line = highlight_text("Hello world", "", Style::default());
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "Hello world");
    }

    #[test]
    fn test_highlight_text_no_match() {
        let line = highlight_text("Hello world", "xyz", Style::default());
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, "Hello world");
    }

    #[test]
    fn test_highlight_text_case_insensitive() {
        let line = highlight_text("BMW Evaluation", "bmw", Style::default());
        assert_eq!(line.spans.len(), 2);
        assert_eq!(line.spans[0].content, "BMW");
        assert_eq!(line.spans[0].style.bg, Some(Color::Yellow));
        assert_eq!(line.spans[1].content, " Evaluation");
    }

    #[test]
    fn test_highlight_text_multiple_matches() {
        let line = highlight_text("test one test two test", "test", Style::default());
        assert_eq!(line.spans.len(), 5);
        assert_eq!(line.spans[1].content, " one ");
        assert_eq!(line.spans[4].content, "test");
    }

    #[test]
    fn test_highlight_text_keeps_base_style() {
        let base = Style::default().fg(Color::Blue);
        let line = highlight_text("hello test", "test", base);
        assert_eq!(line.spans[0].style.fg, Some(Color::Blue));
    }

    #[test]
    fn test_highlight_text_shifted_char_boundaries() {
        // Same total length once lowercased, but the match starts inside 'ẞ'.
        let text = "İẞx";
        assert_eq!(text.to_lowercase().len(), text.len());
        let line = highlight_text(text, "ß", Style::default());
        assert_eq!(line.spans.len(), 1);
        assert_eq!(line.spans[0].content, text);
    }
}
