//! Main application state and event loop.
//!
//! This module implements The Elm Architecture (TEA) pattern: every key,
//! mouse and tick event goes through [`App::update`], which mutates the row
//! store, the selection and the view state, and [`App::view`] draws the
//! result.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};
use tracing::{debug, info, trace, warn};

use crate::config::Settings;
use crate::error::{AppError, Result};
use crate::events::{is_cancel, is_select_all_chord, Event, KeyContext};
use crate::table::{
    filter_rows, fixture_rows, now_timestamp, DragState, Row, RowId, RowStore, SelectionSet,
};
use crate::ui::{
    render_context_help, render_search_bar, ActionMenu, ActionMenuResult, BulkAction,
    EnrichmentCard, HelpAction, HelpView, HitTarget, MenuAction, Notification,
    NotificationManager, QuickSearch, RowAction, Spinner, TableContext, TableView, Theme,
};

/// The current screen state of the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppState {
    /// The table is shown.
    #[default]
    Table,
    /// The help overlay is open.
    Help,
    /// Application is in the process of exiting.
    Exiting,
}

/// The main application struct that holds all state.
///
/// This implements the Model part of The Elm Architecture (TEA).
pub struct App {
    /// The current view state.
    state: AppState,
    /// Whether the application should quit.
    should_quit: bool,
    /// The rows, in display order.
    store: RowStore,
    /// Ids of the selected rows.
    selection: SelectionSet,
    /// The row being dragged, if any.
    drag: DragState,
    /// Search input and query.
    search: QuickSearch,
    /// Cursor, scroll and geometry of the table.
    table_view: TableView,
    /// Row and bulk action popup.
    action_menu: ActionMenu,
    /// Enrichment details popup.
    enrichment_card: EnrichmentCard,
    /// Help overlay.
    help: HelpView,
    /// Toasts.
    notifications: NotificationManager,
    /// Animation shared by loading badges.
    spinner: Spinner,
    theme: Theme,
    /// State of the auto-save toggle. Nothing is saved either way.
    auto_save: bool,
    prune_selection_on_delete: bool,
    /// Rows collected by the last bulk export.
    last_export: Vec<Row>,
}

impl App {
    /// Create an application with the demo rows, unless the settings turn
    /// them off.
    pub fn with_settings(settings: &Settings) -> Result<Self> {
        let rows = if settings.load_fixtures {
            fixture_rows()
        } else {
            Vec::new()
        };
        Self::with_rows(rows, settings)
    }

    /// Create an application showing the given rows.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if two rows share an id.
    pub fn with_rows(rows: Vec<Row>, settings: &Settings) -> Result<Self> {
        let highest = rows.iter().map(|r| r.id).max().unwrap_or(0);
        let store = RowStore::with_rows(rows, settings.id_strategy.generator(highest))?;
        debug!(rows = store.len(), view = ?settings.view, "Creating application");

        Ok(Self {
            state: AppState::Table,
            should_quit: false,
            store,
            selection: SelectionSet::new(),
            drag: DragState::new(),
            search: QuickSearch::new(),
            table_view: TableView::new(settings.view),
            action_menu: ActionMenu::new(),
            enrichment_card: EnrichmentCard::new(),
            help: HelpView::new(),
            notifications: NotificationManager::with_max_visible(settings.notification_limit),
            spinner: Spinner::new(settings.spinner),
            theme: Theme::default(),
            auto_save: settings.auto_save,
            prune_selection_on_delete: settings.prune_selection_on_delete,
            last_export: Vec::new(),
        })
    }

    /// Returns whether the application should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Returns the current application state.
    pub fn state(&self) -> AppState {
        self.state
    }

    /// Get the row store.
    pub fn store(&self) -> &RowStore {
        &self.store
    }

    /// Get the selection.
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Get the drag state.
    pub fn drag(&self) -> &DragState {
        &self.drag
    }

    /// Get the search input.
    pub fn search(&self) -> &QuickSearch {
        &self.search
    }

    /// Get the table view.
    pub fn table_view(&self) -> &TableView {
        &self.table_view
    }

    /// Get the notification manager.
    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    /// Rows collected by the last bulk export, in store order.
    pub fn last_export(&self) -> &[Row] {
        &self.last_export
    }

    /// Whether auto save is on.
    pub fn auto_save(&self) -> bool {
        self.auto_save
    }

    /// Check if the row or bulk menu is open.
    pub fn is_action_menu_visible(&self) -> bool {
        self.action_menu.is_visible()
    }

    /// Check if the enrichment card is open.
    pub fn is_enrichment_card_visible(&self) -> bool {
        self.enrichment_card.is_visible()
    }

    /// The element that currently receives key input.
    pub fn key_context(&self) -> KeyContext {
        if self.state == AppState::Help {
            KeyContext::Help
        } else if self.action_menu.is_visible() {
            KeyContext::ActionMenu
        } else if self.enrichment_card.is_visible() {
            KeyContext::EnrichmentCard
        } else if self.search.is_active() {
            KeyContext::Search
        } else {
            KeyContext::Table
        }
    }

    /// Ids of the rows matching the search query, in display order.
    pub fn visible_ids(&self) -> Vec<RowId> {
        filter_rows(self.store.rows(), self.search.query())
            .iter()
            .map(|r| r.id)
            .collect()
    }

    /// Id of the row under the cursor.
    pub fn cursor_row_id(&self) -> Option<RowId> {
        self.visible_ids().get(self.table_view.cursor()).copied()
    }

    fn clamp_cursor(&mut self) {
        let len = self.visible_ids().len();
        self.table_view.clamp(len);
    }

    // ========================================================================
    // Notification and error handling
    // ========================================================================

    /// Handle an application error by showing it as a toast.
    pub fn handle_error(&mut self, error: &AppError) {
        if error.is_critical() {
            warn!(error = %error, "Critical error occurred");
        } else {
            debug!(error = %error, "Recoverable error occurred");
        }
        self.notifications
            .push(Notification::error("Error", error.user_message()));
    }

    // ========================================================================
    // Selection
    // ========================================================================

    /// Select every row, or clear if every row is already selected.
    pub fn toggle_select_all(&mut self) {
        let ids = self.store.ids();
        self.selection.select_all_toggle(&ids);
        debug!(selected = self.selection.len(), "Toggled select all");
    }

    /// Toggle one row's selection.
    pub fn toggle_row_selection(&mut self, id: RowId) {
        self.selection.toggle(id);
        debug!(id, selected = self.selection.contains(id), "Toggled row selection");
    }

    /// Deselect every row.
    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            debug!(cleared = self.selection.len(), "Clearing selection");
        }
        self.selection.clear();
    }

    // ========================================================================
    // Row actions
    // ========================================================================

    /// Append a template row. Returns its id.
    pub fn add_row(&mut self) -> Option<RowId> {
        let id = self.store.next_id();
        match self.store.add(Row::new_entry(id, now_timestamp())) {
            Ok(id) => {
                self.notifications.push(Notification::success(
                    "Row Added",
                    "New row has been added to the table",
                ));
                Some(id)
            }
            Err(e) => {
                self.handle_error(&AppError::from(e));
                None
            }
        }
    }

    /// Editing is announced but not implemented.
    pub fn edit_row(&mut self, id: RowId) {
        debug!(id, "Edit requested");
        self.notifications.push(Notification::info(
            "Edit Row",
            "Editing functionality coming soon",
        ));
    }

    /// Append a copy of a row. No-op for a missing id.
    pub fn duplicate_row(&mut self, id: RowId) -> Option<RowId> {
        let new_id = self.store.duplicate(id)?;
        self.notifications.push(Notification::success(
            "Row Copied",
            "A new copy has been created",
        ));
        Some(new_id)
    }

    /// Remove a row. No-op for a missing id.
    pub fn delete_row(&mut self, id: RowId) {
        let Some(row) = self.store.delete(id) else {
            return;
        };
        if self.prune_selection_on_delete {
            self.selection.remove(row.id);
        }
        if self.enrichment_card.row_id() == Some(row.id) {
            self.enrichment_card.hide();
        }
        self.notifications.push(Notification::error(
            "Row Deleted",
            "The row has been removed",
        ));
        self.clamp_cursor();
    }

    /// Apply a bulk action to the selection, then clear it.
    pub fn apply_bulk_action(&mut self, action: BulkAction) {
        let count = self.selection.len();
        if count == 0 {
            debug!(action = action.name(), "Bulk action without selection ignored");
            return;
        }

        match action {
            BulkAction::Copy => {
                let copies = self.store.copy_many(self.selection.ids());
                debug!(copies = copies.len(), "Copied selected rows");
            }
            BulkAction::Export => self.export_selection(),
            BulkAction::Delete => {
                self.store.bulk_delete(self.selection.ids());
            }
        }

        info!(action = action.name(), count, "Bulk action applied");
        self.notifications.push(Notification::info(
            "Bulk Action",
            format!("{} applied to {} rows", action.name(), count),
        ));
        self.selection.clear();
        self.clamp_cursor();
    }

    fn export_selection(&mut self) {
        let exported: Vec<Row> = self
            .store
            .rows()
            .iter()
            .filter(|r| self.selection.contains(r.id))
            .cloned()
            .collect();
        self.last_export = exported;

        match serde_json::to_string(&self.last_export) {
            Ok(payload) => info!(rows = self.last_export.len(), %payload, "Exported rows"),
            Err(e) => self.handle_error(&AppError::other(format!("Export failed: {}", e))),
        }
    }

    /// Flip the auto-save toggle.
    pub fn toggle_auto_save(&mut self) {
        self.auto_save = !self.auto_save;
        debug!(auto_save = self.auto_save, "Toggled auto save");
        let notification = if self.auto_save {
            Notification::success("Auto Save Enabled", "Changes will be saved automatically")
        } else {
            Notification::warning(
                "Auto Save Disabled",
                "Remember to save your changes manually",
            )
        };
        self.notifications.push(notification);
    }

    fn apply_menu_action(&mut self, action: MenuAction) {
        debug!(?action, "Applying menu action");
        match action {
            MenuAction::Row(id, RowAction::Edit) => self.edit_row(id),
            MenuAction::Row(id, RowAction::Duplicate) => {
                self.duplicate_row(id);
            }
            MenuAction::Row(id, RowAction::Delete) => self.delete_row(id),
            MenuAction::Bulk(bulk) => self.apply_bulk_action(bulk),
        }
    }

    // ========================================================================
    // Drag and drop
    // ========================================================================

    /// Begin dragging a row.
    pub fn drag_start(&mut self, id: RowId) {
        if self.store.contains(id) {
            debug!(id, "Drag started");
            self.drag.start(id);
        }
    }

    /// The dragged row passed over `target`: move it there immediately.
    pub fn drag_over(&mut self, target: RowId) {
        if self.drag.over(target, &mut self.store) {
            self.follow_dragged_row();
        }
    }

    /// Finish the drag.
    pub fn drag_end(&mut self) {
        if self.drag.is_dragging() {
            debug!(id = ?self.drag.dragged(), "Drag ended");
        }
        self.drag.end();
    }

    /// Keep the cursor on the dragged row after it moved.
    fn follow_dragged_row(&mut self) {
        let Some(id) = self.drag.dragged() else {
            return;
        };
        let ids = self.visible_ids();
        if let Some(index) = ids.iter().position(|&v| v == id) {
            self.table_view.set_cursor(index, ids.len());
        }
    }

    /// Drag the cursor row past its visible neighbour in one step.
    fn drag_cursor_row(&mut self, down: bool) {
        let ids = self.visible_ids();
        let cursor = self.table_view.cursor();
        let neighbour = if down {
            cursor.checked_add(1)
        } else {
            cursor.checked_sub(1)
        };
        let (Some(&dragged), Some(&target)) = (ids.get(cursor), neighbour.and_then(|i| ids.get(i)))
        else {
            return;
        };
        self.drag_start(dragged);
        self.drag_over(target);
        self.drag_end();
    }

    // ========================================================================
    // Update
    // ========================================================================

    /// Update the application state based on an event.
    ///
    /// This implements the Update part of The Elm Architecture (TEA).
    pub fn update(&mut self, event: Event) {
        match event {
            Event::Quit => {
                info!("Quit event received");
                self.quit();
            }
            Event::Key(key_event) => {
                trace!(key = ?key_event.code, modifiers = ?key_event.modifiers, "Key event");
                self.handle_key_event(key_event);
            }
            Event::Mouse(mouse_event) => {
                trace!(
                    kind = ?mouse_event.kind,
                    column = mouse_event.column,
                    row = mouse_event.row,
                    "Mouse event"
                );
                self.handle_mouse_event(mouse_event);
            }
            Event::Resize(width, height) => {
                trace!(width, height, "Terminal resize event");
            }
            Event::Tick => self.handle_tick(),
        }
    }

    fn quit(&mut self) {
        self.should_quit = true;
        self.state = AppState::Exiting;
    }

    /// Handle keyboard input events.
    fn handle_key_event(&mut self, key_event: KeyEvent) {
        if key_event.code == KeyCode::Char('c') && key_event.modifiers.contains(KeyModifiers::CONTROL)
        {
            self.quit();
            return;
        }

        // Select-all is consumed here and never reaches the focused element.
        if is_select_all_chord(&key_event) {
            self.toggle_select_all();
            return;
        }

        // Esc clears the selection and is still delivered below.
        if is_cancel(&key_event) {
            self.clear_selection();
        }

        if self.state == AppState::Help {
            if let Some(HelpAction::Close) = self.help.handle_input(key_event) {
                self.state = AppState::Table;
            }
            return;
        }

        if self.action_menu.is_visible() {
            match self.action_menu.handle_input(key_event) {
                Some(ActionMenuResult::Apply(action)) => self.apply_menu_action(action),
                Some(ActionMenuResult::Cancel) => debug!("Action menu cancelled"),
                None => {}
            }
            return;
        }

        if self.enrichment_card.is_visible() {
            if matches!(
                key_event.code,
                KeyCode::Esc | KeyCode::Char('i') | KeyCode::Char('q')
            ) {
                self.enrichment_card.hide();
            }
            return;
        }

        if self.search.is_active() {
            self.handle_search_key(key_event);
            return;
        }

        self.handle_table_key(key_event);
    }

    fn handle_search_key(&mut self, key_event: KeyEvent) {
        match (key_event.code, key_event.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Enter, _) => self.search.deactivate(),
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => {
                self.search.clear();
                self.on_query_changed();
            }
            (KeyCode::Backspace, _) => {
                if self.search.pop_char().is_some() {
                    self.on_query_changed();
                }
            }
            (KeyCode::Char(c), modifiers)
                if !modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
            {
                self.search.push_char(c);
                self.on_query_changed();
            }
            _ => {}
        }
    }

    fn on_query_changed(&mut self) {
        let len = self.visible_ids().len();
        debug!(query = self.search.query(), matches = len, "Search query changed");
        self.table_view.set_cursor(0, len);
    }

    fn handle_table_key(&mut self, key_event: KeyEvent) {
        let len = self.visible_ids().len();

        match (key_event.code, key_event.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => self.quit(),
            (KeyCode::Char('?'), _) => {
                self.help.reset_scroll();
                self.state = AppState::Help;
            }

            // Navigation
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.table_view.move_down(len)
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.table_view.move_up()
            }
            (KeyCode::Char('g'), KeyModifiers::NONE) | (KeyCode::Home, _) => {
                self.table_view.set_cursor(0, len)
            }
            (KeyCode::Char('G'), _) | (KeyCode::End, _) => {
                self.table_view.set_cursor(len.saturating_sub(1), len)
            }
            (KeyCode::Char('J'), _) => self.drag_cursor_row(true),
            (KeyCode::Char('K'), _) => self.drag_cursor_row(false),

            (KeyCode::Char(' '), _) => {
                if let Some(id) = self.cursor_row_id() {
                    self.toggle_row_selection(id);
                }
            }
            (KeyCode::Char('/'), _) => self.search.activate(),
            (KeyCode::Char('a'), KeyModifiers::NONE) => {
                self.add_row();
            }
            (KeyCode::Enter, _) | (KeyCode::Char('m'), KeyModifiers::NONE) => {
                if let Some(id) = self.cursor_row_id() {
                    self.action_menu.show_row(id);
                }
            }
            (KeyCode::Char('e'), KeyModifiers::NONE) => {
                if let Some(id) = self.cursor_row_id() {
                    self.edit_row(id);
                }
            }
            (KeyCode::Char('y'), KeyModifiers::NONE) => {
                if let Some(id) = self.cursor_row_id() {
                    self.duplicate_row(id);
                }
            }
            (KeyCode::Char('d'), KeyModifiers::NONE) => {
                if let Some(id) = self.cursor_row_id() {
                    self.delete_row(id);
                }
            }
            (KeyCode::Char('b'), KeyModifiers::NONE) => {
                if !self.selection.is_empty() {
                    self.action_menu.show_bulk(self.selection.len());
                }
            }
            (KeyCode::Char('w'), KeyModifiers::NONE) => self.toggle_auto_save(),
            (KeyCode::Char('v'), KeyModifiers::NONE) => {
                let mode = self.table_view.toggle_view_mode();
                debug!(?mode, "Toggled view mode");
            }
            (KeyCode::Char('i'), KeyModifiers::NONE) => {
                if let Some(id) = self.cursor_row_id() {
                    self.enrichment_card.show(id);
                }
            }
            _ => {}
        }
    }

    /// Handle mouse input. Ignored while a popup is open.
    fn handle_mouse_event(&mut self, mouse_event: MouseEvent) {
        if self.state == AppState::Help
            || self.action_menu.is_visible()
            || self.enrichment_card.is_visible()
        {
            return;
        }

        let ids = self.visible_ids();
        let target = self
            .table_view
            .hit_test(mouse_event.column, mouse_event.row, ids.len());

        match mouse_event.kind {
            MouseEventKind::Down(MouseButton::Left) => match target {
                Some(HitTarget::SelectAll) => self.toggle_select_all(),
                Some(HitTarget::SelectCell(index)) => {
                    if let Some(&id) = ids.get(index) {
                        self.table_view.set_cursor(index, ids.len());
                        self.toggle_row_selection(id);
                    }
                }
                Some(HitTarget::Row(index)) => {
                    if let Some(&id) = ids.get(index) {
                        self.table_view.set_cursor(index, ids.len());
                        self.drag_start(id);
                    }
                }
                None => {}
            },
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(HitTarget::Row(index) | HitTarget::SelectCell(index)) = target {
                    if let Some(&id) = ids.get(index) {
                        self.drag_over(id);
                    }
                }
            }
            MouseEventKind::Up(MouseButton::Left) => self.drag_end(),
            MouseEventKind::ScrollDown => self.table_view.move_down(ids.len()),
            MouseEventKind::ScrollUp => self.table_view.move_up(),
            _ => {}
        }
    }

    /// Handle periodic tick events.
    fn handle_tick(&mut self) {
        self.spinner.tick();
        self.notifications.tick();
    }

    // ========================================================================
    // View
    // ========================================================================

    /// Render the application UI.
    ///
    /// This implements the View part of The Elm Architecture (TEA).
    pub fn view(&mut self, frame: &mut Frame) {
        let area = frame.area();

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Header
                Constraint::Length(1), // Search and actions
                Constraint::Min(3),    // Table
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        self.render_header(frame, chunks[0]);
        self.render_toolbar(frame, chunks[1]);
        self.render_table(frame, chunks[2]);
        self.render_footer(frame, chunks[3]);

        self.action_menu.render(frame, area);
        let card_row = self
            .enrichment_card
            .row_id()
            .and_then(|id| self.store.get(id));
        self.enrichment_card
            .render(frame, area, card_row, &self.theme);
        if self.state == AppState::Help {
            self.help.render(frame, area);
        }

        // Toasts go on top of everything
        self.notifications.render(frame, area);
    }

    fn render_header(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Fill(1), Constraint::Length(18)])
            .split(area);

        let title = Paragraph::new(Line::from(vec![
            Span::styled(
                " LazyTable",
                Style::default()
                    .fg(self.theme.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  {} rows", self.store.len()),
                Style::default().fg(self.theme.muted),
            ),
        ]));
        frame.render_widget(title, chunks[0]);

        let (label, color) = if self.auto_save {
            ("● Auto save on ", Color::Green)
        } else {
            ("○ Auto save off ", self.theme.muted)
        };
        let auto_save = Paragraph::new(Span::styled(label, Style::default().fg(color)))
            .alignment(Alignment::Right);
        frame.render_widget(auto_save, chunks[1]);
    }

    fn render_toolbar(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Fill(1),
                Constraint::Length(11),
                Constraint::Length(14),
            ])
            .split(area);

        render_search_bar(frame, chunks[0], &self.search, self.visible_ids().len());

        frame.render_widget(
            Paragraph::new(Span::styled(
                format!("[{}]", self.table_view.view_mode().label()),
                Style::default().fg(self.theme.muted),
            )),
            chunks[1],
        );

        if !self.selection.is_empty() {
            frame.render_widget(
                Paragraph::new(Span::styled(
                    format!("Actions ({})", self.selection.len()),
                    Style::default()
                        .fg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Right),
                chunks[2],
            );
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let visible = filter_rows(self.store.rows(), self.search.query());
        let ctx = TableContext {
            rows: &visible,
            total: self.store.len(),
            selection: &self.selection,
            drag: &self.drag,
            query: self.search.query(),
            spinner: self.spinner.frame(),
            theme: &self.theme,
        };
        self.table_view.render(frame, area, &ctx);
    }

    fn render_footer(&self, frame: &mut Frame, area: Rect) {
        let context = self.key_context();
        let mode = match context {
            KeyContext::Table => "TABLE",
            KeyContext::Search => "SEARCH",
            KeyContext::ActionMenu => "MENU",
            KeyContext::EnrichmentCard => "CARD",
            KeyContext::Help => "HELP",
        };

        let mut status = vec![Span::styled(
            format!(" {} ", mode),
            Style::default().fg(Color::Black).bg(self.theme.accent),
        )];
        if !self.selection.is_empty() {
            status.push(Span::styled(
                format!(" {} selected", self.selection.len()),
                Style::default().fg(self.theme.accent),
            ));
        }

        render_context_help(frame, area, context, status);
    }
}
