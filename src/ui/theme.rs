//! Theme and styling configuration.

use ratatui::style::{Color, Modifier, Style};

use crate::table::EnrichmentStatus;

/// Color theme for the application.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Primary foreground color.
    pub fg: Color,
    /// Accent for titles and focused elements.
    pub accent: Color,
    /// Background of the cursor row.
    pub highlight_bg: Color,
    /// Background of selected rows.
    pub selected_bg: Color,
    /// Secondary text.
    pub muted: Color,
    /// Link cells.
    pub link: Color,
    /// The input column header.
    pub input_header: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: Color::White,
            accent: Color::Cyan,
            highlight_bg: Color::DarkGray,
            selected_bg: Color::Rgb(40, 40, 60),
            muted: Color::Gray,
            link: Color::Blue,
            input_header: Color::Yellow,
        }
    }
}

impl Theme {
    /// Color of an enrichment status badge.
    pub fn status_color(&self, status: EnrichmentStatus) -> Color {
        match status {
            EnrichmentStatus::Loading => self.accent,
            EnrichmentStatus::Complete => Color::Green,
            EnrichmentStatus::Error => Color::Red,
        }
    }

    /// Static badge for a terminal status; loading rows use the spinner.
    pub fn status_icon(&self, status: EnrichmentStatus) -> &'static str {
        match status {
            EnrichmentStatus::Loading => "…",
            EnrichmentStatus::Complete | EnrichmentStatus::Error => "●",
        }
    }

    /// Style of the table header row.
    pub fn header(&self) -> Style {
        Style::default().fg(self.fg).add_modifier(Modifier::BOLD)
    }

    /// Style of a row being dragged.
    pub fn dragged(&self) -> Style {
        Style::default().add_modifier(Modifier::DIM)
    }
}
