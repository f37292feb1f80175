//! The main data table.
//!
//! Renders the filtered rows with their selection marks, enrichment badges
//! and search highlights, and maps mouse positions back to rows.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Row as TableRow, Table, TableState},
    Frame,
};
use serde::{Deserialize, Serialize};

use crate::table::{DragState, Row, SelectionSet};
use crate::ui::components::highlight_text;
use crate::ui::theme::Theme;

/// Width of the selection column.
const SELECT_COLUMN_WIDTH: u16 = 3;

/// Row density of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// One line per row.
    #[default]
    Compact,
    /// Three lines per row: cells, timestamp, enrichment description.
    Expanded,
}

impl ViewMode {
    /// Label shown in the toolbar.
    pub fn label(&self) -> &'static str {
        match self {
            ViewMode::Compact => "1/1 Row",
            ViewMode::Expanded => "3/3 Row",
        }
    }

    /// Terminal lines per table row.
    pub fn row_height(&self) -> u16 {
        match self {
            ViewMode::Compact => 1,
            ViewMode::Expanded => 3,
        }
    }

    /// The other mode.
    pub fn toggled(&self) -> Self {
        match self {
            ViewMode::Compact => ViewMode::Expanded,
            ViewMode::Expanded => ViewMode::Compact,
        }
    }
}

/// What a mouse position points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitTarget {
    /// The select-all cell in the header.
    SelectAll,
    /// The selection cell of the visible row at this index.
    SelectCell(usize),
    /// Any other cell of the visible row at this index.
    Row(usize),
}

/// Everything the table needs to draw one frame.
pub struct TableContext<'a> {
    /// Rows after filtering, in display order.
    pub rows: &'a [&'a Row],
    /// Number of rows in the store.
    pub total: usize,
    /// Current selection.
    pub selection: &'a SelectionSet,
    /// Current drag.
    pub drag: &'a DragState,
    /// Search query to highlight.
    pub query: &'a str,
    /// Current frame of the loading spinner.
    pub spinner: &'static str,
    /// Colors.
    pub theme: &'a Theme,
}

/// Table view state: cursor, scroll offset and last drawn geometry.
#[derive(Debug, Default)]
pub struct TableView {
    cursor: usize,
    state: TableState,
    view_mode: ViewMode,
    /// Inner area of the table block from the last render.
    inner: Option<Rect>,
}

impl TableView {
    /// Create a table view.
    pub fn new(view_mode: ViewMode) -> Self {
        Self {
            view_mode,
            ..Self::default()
        }
    }

    /// Index of the cursor row within the visible rows.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to `len` visible rows.
    pub fn set_cursor(&mut self, index: usize, len: usize) {
        self.cursor = index.min(len.saturating_sub(1));
    }

    /// Re-clamp the cursor after the visible rows changed.
    pub fn clamp(&mut self, len: usize) {
        self.set_cursor(self.cursor, len);
    }

    /// Move the cursor down one row.
    pub fn move_down(&mut self, len: usize) {
        self.set_cursor(self.cursor + 1, len);
    }

    /// Move the cursor up one row.
    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    /// Get the row density.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Switch between compact and expanded rows.
    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    /// Map a terminal position to a table target.
    ///
    /// `len` is the number of visible rows. Returns `None` for positions
    /// outside the last drawn table or below the last row.
    pub fn hit_test(&self, column: u16, row: u16, len: usize) -> Option<HitTarget> {
        let inner = self.inner?;
        if column < inner.x
            || column >= inner.x + inner.width
            || row < inner.y
            || row >= inner.y + inner.height
        {
            return None;
        }

        let in_select_column = column < inner.x + SELECT_COLUMN_WIDTH;

        if row == inner.y {
            return in_select_column.then_some(HitTarget::SelectAll);
        }

        let line = (row - inner.y - 1) as usize;
        let index = self.state.offset() + line / self.view_mode.row_height() as usize;
        if index >= len {
            return None;
        }

        Some(if in_select_column {
            HitTarget::SelectCell(index)
        } else {
            HitTarget::Row(index)
        })
    }

    /// Render the table.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, ctx: &TableContext<'_>) {
        let theme = ctx.theme;
        let all_selected = ctx.selection.is_all_selected(ctx.total);

        let header = TableRow::new(vec![
            Cell::from(if all_selected { " ✓" } else { " ›" }),
            Cell::from(Line::from(vec![
                Span::styled(
                    "A ",
                    Style::default()
                        .fg(theme.input_header)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::raw("Input Column"),
            ])),
            Cell::from("⊕ Action column"),
            Cell::from(Line::from(vec![
                Span::styled("★ ", Style::default().fg(theme.input_header)),
                Span::raw("Enrich Company"),
            ])),
        ])
        .style(theme.header())
        .height(1);

        let rows: Vec<TableRow> = ctx
            .rows
            .iter()
            .map(|row| self.build_row(row, ctx))
            .collect();

        let widths = [
            Constraint::Length(SELECT_COLUMN_WIDTH),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
            Constraint::Fill(1),
        ];

        let block = Block::default()
            .title(Span::styled(
                format!(" {}/{} rows ", ctx.rows.len(), ctx.total),
                Style::default().fg(theme.accent),
            ))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.muted));
        self.inner = Some(block.inner(area));

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .highlight_style(Style::default().bg(theme.highlight_bg));

        self.clamp(ctx.rows.len());
        self.state
            .select((!ctx.rows.is_empty()).then_some(self.cursor));
        frame.render_stateful_widget(table, area, &mut self.state);
    }

    fn build_row(&self, row: &Row, ctx: &TableContext<'_>) -> TableRow<'static> {
        let theme = ctx.theme;
        let selected = ctx.selection.contains(row.id);
        let expanded = self.view_mode == ViewMode::Expanded;

        let select_cell = Cell::from(if selected { " ✓" } else { " ›" });

        let mut input_lines = vec![input_line(row, ctx.query, theme)];
        let action_lines = vec![highlight_text(
            &row.action_column,
            ctx.query,
            Style::default(),
        )];
        let mut enrich_lines = vec![enrichment_line(row, ctx, theme)];

        if expanded {
            input_lines.push(Line::styled(
                row.timestamp.clone(),
                Style::default().fg(theme.muted),
            ));
            enrich_lines.push(Line::styled(
                row.enrichment.description.clone().unwrap_or_default(),
                Style::default().fg(theme.muted),
            ));
        }

        let mut style = Style::default();
        if selected {
            style = style.bg(theme.selected_bg);
        }
        if ctx.drag.is_dragged(row.id) {
            style = style.patch(theme.dragged());
        }

        TableRow::new(vec![
            select_cell,
            Cell::from(Text::from(input_lines)),
            Cell::from(Text::from(action_lines)),
            Cell::from(Text::from(enrich_lines)),
        ])
        .style(style)
        .height(self.view_mode.row_height())
    }
}

/// The input cell: links get an icon, loading placeholders a skeleton bar.
fn input_line(row: &Row, query: &str, theme: &Theme) -> Line<'static> {
    if row.is_link() {
        let mut line = highlight_text(
            &row.input_column,
            query,
            Style::default()
                .fg(theme.link)
                .add_modifier(Modifier::UNDERLINED),
        );
        line.spans.insert(0, Span::styled("🔗 ", Style::default().fg(theme.link)));
        line
    } else if row.is_placeholder() {
        Line::styled("░ ░░░░░░░░░░", Style::default().fg(theme.muted))
    } else {
        highlight_text(&row.input_column, query, Style::default())
    }
}

/// The enrichment cell: status badge followed by the company name.
fn enrichment_line(row: &Row, ctx: &TableContext<'_>, theme: &Theme) -> Line<'static> {
    let status = row.enrichment.status;
    let badge = if status.is_terminal() {
        theme.status_icon(status)
    } else {
        ctx.spinner
    };

    let mut line = highlight_text(&row.enrichment.name, ctx.query, Style::default());
    line.spans.insert(0, Span::raw(" "));
    line.spans.insert(
        0,
        Span::styled(badge, Style::default().fg(theme.status_color(status))),
    );
    line
}
