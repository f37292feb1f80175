//! Popup frame shared by menus, cards and overlays.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear},
    Frame,
};

/// A bordered popup centered over the screen.
#[derive(Debug, Clone)]
pub struct Modal {
    /// Title shown in the top border.
    pub title: String,
    /// Border and title color.
    pub color: Color,
}

impl Modal {
    /// Create a new modal with the given title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            color: Color::Cyan,
        }
    }

    /// Use a different accent color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Clear and draw the popup frame, returning the inner area.
    pub fn render(&self, frame: &mut Frame, area: Rect, width: u16, height: u16) -> Rect {
        let dialog_area = centered_rect(area, width, height);
        frame.render_widget(Clear, dialog_area);

        let block = Block::default()
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().fg(self.color).add_modifier(Modifier::BOLD),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.color));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);
        inner
    }
}

/// Calculate a centered rectangle within the given area.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(area.width), height.min(area.height))
}
