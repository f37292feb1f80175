//! Help overlay listing key and mouse bindings.
//!
//! Opened with '?' and closed with '?', 'q', or Escape. Scrolls when the
//! terminal is too short for the whole list.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

use crate::ui::components::Modal;

/// Actions that can be returned from the help view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelpAction {
    /// Close the help overlay.
    Close,
}

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Table",
        &[
            ("j / ↓", "Move cursor down"),
            ("k / ↑", "Move cursor up"),
            ("g / G", "First / last row"),
            ("v", "Toggle compact / expanded rows"),
            ("i", "Show enrichment card"),
        ],
    ),
    (
        "Selection",
        &[
            ("Space", "Toggle row selection"),
            ("Ctrl+A", "Select all / clear"),
            ("Esc", "Clear selection"),
        ],
    ),
    (
        "Rows",
        &[
            ("a", "Add row"),
            ("Enter / m", "Row actions menu"),
            ("e", "Edit row"),
            ("y", "Duplicate row"),
            ("d", "Delete row"),
            ("J / K", "Drag row down / up"),
            ("b", "Bulk actions menu"),
            ("w", "Toggle auto save"),
        ],
    ),
    (
        "Search",
        &[
            ("/", "Focus search"),
            ("Enter", "Leave search, keep filter"),
            ("Ctrl+U", "Clear query"),
            ("Backspace", "Delete character"),
        ],
    ),
    (
        "Mouse",
        &[
            ("click [ ]", "Toggle row selection"),
            ("click header", "Select all / clear"),
            ("drag row", "Reorder rows"),
            ("wheel", "Move cursor"),
        ],
    ),
    (
        "General",
        &[("?", "Toggle this help"), ("q / Ctrl+C", "Quit")],
    ),
];

/// The help overlay.
#[derive(Debug, Default)]
pub struct HelpView {
    /// Current scroll position.
    scroll: usize,
    /// Visible height (updated on render).
    visible_height: usize,
}

impl HelpView {
    /// Create a new help view.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of lines in the help content.
    fn total_lines() -> usize {
        // Header and a blank line per section, one line per binding, a
        // trailing blank, then the footer.
        SECTIONS
            .iter()
            .map(|(_, bindings)| bindings.len() + 3)
            .sum::<usize>()
            + 1
    }

    /// Reset scroll position to top.
    pub fn reset_scroll(&mut self) {
        self.scroll = 0;
    }

    fn max_scroll(&self) -> usize {
        Self::total_lines().saturating_sub(self.visible_height)
    }

    /// Handle keyboard input for the help view.
    pub fn handle_input(&mut self, key_event: KeyEvent) -> Option<HelpAction> {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('?'), _)
            | (KeyCode::Char('q'), KeyModifiers::NONE)
            | (KeyCode::Esc, _) => Some(HelpAction::Close),

            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.scroll = (self.scroll + 1).min(self.max_scroll());
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.scroll = self.scroll.saturating_sub(1);
                None
            }
            (KeyCode::Char('d'), KeyModifiers::CONTROL) | (KeyCode::PageDown, _) => {
                let page_size = self.visible_height.saturating_sub(2);
                self.scroll = (self.scroll + page_size).min(self.max_scroll());
                None
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) | (KeyCode::PageUp, _) => {
                let page_size = self.visible_height.saturating_sub(2);
                self.scroll = self.scroll.saturating_sub(page_size);
                None
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) => {
                self.scroll = 0;
                None
            }
            (KeyCode::Char('G'), _) => {
                self.scroll = self.max_scroll();
                None
            }

            // Swallow everything else while open
            _ => None,
        }
    }

    /// Render the help overlay.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let width = 52u16.min(area.width.saturating_sub(4));
        let height = (Self::total_lines() as u16 + 2).min(area.height.saturating_sub(2));
        let inner = Modal::new("Help - Keyboard & Mouse").render(frame, area, width, height);

        self.visible_height = inner.height as usize;
        self.scroll = self.scroll.min(self.max_scroll());

        let paragraph = Paragraph::new(build_content_lines()).scroll((self.scroll as u16, 0));
        frame.render_widget(paragraph, inner);

        if Self::total_lines() > self.visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));
            let mut scrollbar_state = ScrollbarState::new(self.max_scroll()).position(self.scroll);
            frame.render_stateful_widget(scrollbar, inner, &mut scrollbar_state);
        }
    }
}

fn build_content_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::with_capacity(HelpView::total_lines());

    for (title, bindings) in SECTIONS {
        lines.push(Line::from(Span::styled(
            format!("── {} ──", title),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::raw(""));

        for (key, description) in bindings.iter() {
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:>13}", key),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("  "),
                Span::raw(*description),
            ]));
        }
        lines.push(Line::raw(""));
    }

    lines.push(Line::from(Span::styled(
        "Press ?, q, or Esc to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_total_lines_matches_content() {
        assert_eq!(build_content_lines().len(), HelpView::total_lines());
    }

    #[test]
    fn test_close_keys() {
        let mut view = HelpView::new();
        for code in [KeyCode::Char('?'), KeyCode::Char('q'), KeyCode::Esc] {
            assert_eq!(view.handle_input(key(code)), Some(HelpAction::Close));
        }
    }

    #[test]
    fn test_scroll_down_and_up() {
        let mut view = HelpView::new();
        view.visible_height = 10;
        view.handle_input(key(KeyCode::Char('j')));
        view.handle_input(key(KeyCode::Char('j')));
        assert_eq!(view.scroll, 2);
        view.handle_input(key(KeyCode::Up));
        assert_eq!(view.scroll, 1);
    }

    #[test]
    fn test_scroll_is_bounded() {
        let mut view = HelpView::new();
        view.visible_height = 10;
        for _ in 0..200 {
            view.handle_input(key(KeyCode::Char('j')));
        }
        assert_eq!(view.scroll, view.max_scroll());

        for _ in 0..300 {
            view.handle_input(key(KeyCode::Char('k')));
        }
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_go_bottom_then_top() {
        let mut view = HelpView::new();
        view.visible_height = 5;
        view.handle_input(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert_eq!(view.scroll, view.max_scroll());
        view.handle_input(key(KeyCode::Char('g')));
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_other_keys_are_swallowed() {
        let mut view = HelpView::new();
        assert_eq!(view.handle_input(key(KeyCode::Char('d'))), None);
        assert_eq!(view.scroll, 0);
    }

    #[test]
    fn test_render_lists_bindings() {
        let mut view = HelpView::new();
        let mut terminal = Terminal::new(TestBackend::new(70, 60)).unwrap();
        terminal.draw(|frame| view.render(frame, frame.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Select all / clear"));
        assert!(text.contains("Reorder rows"));
    }
}
