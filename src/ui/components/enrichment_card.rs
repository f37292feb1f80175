//! Popup card with a row's enrichment details.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::modal::Modal;
use crate::table::{Row, RowId};
use crate::ui::theme::Theme;

/// Shows the enrichment name, status and description of one row.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentCard {
    row_id: Option<RowId>,
}

impl EnrichmentCard {
    /// Create a hidden card.
    pub fn new() -> Self {
        Self::default()
    }

    /// Show the card for a row.
    pub fn show(&mut self, id: RowId) {
        self.row_id = Some(id);
    }

    /// Hide the card.
    pub fn hide(&mut self) {
        self.row_id = None;
    }

    /// Check if the card is visible.
    pub fn is_visible(&self) -> bool {
        self.row_id.is_some()
    }

    /// Get the row the card is showing.
    pub fn row_id(&self) -> Option<RowId> {
        self.row_id
    }

    /// Render the card. Nothing is drawn if `row` is `None`.
    pub fn render(&self, frame: &mut Frame, area: Rect, row: Option<&Row>, theme: &Theme) {
        let Some(row) = row else {
            return;
        };
        let enrichment = &row.enrichment;

        let lines = vec![
            Line::from(vec![
                Span::styled(
                    theme.status_icon(enrichment.status),
                    Style::default().fg(theme.status_color(enrichment.status)),
                ),
                Span::raw(" "),
                Span::styled(
                    enrichment.name.as_str(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({})", enrichment.status.label()),
                    Style::default().fg(theme.muted),
                ),
            ]),
            Line::raw(""),
            Line::styled(
                enrichment
                    .description
                    .as_deref()
                    .unwrap_or("No description available"),
                Style::default().fg(theme.muted),
            ),
            Line::raw(""),
            Line::styled(
                format!("Created {}", row.timestamp),
                Style::default().fg(theme.muted),
            ),
        ];

        let width = 50u16.min(area.width.saturating_sub(4));
        let height = 9u16.min(area.height.saturating_sub(2));
        let inner = Modal::new("Enrich Company")
            .with_color(theme.status_color(enrichment.status))
            .render(frame, area, width, height);
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: true }), inner);
    }
}
