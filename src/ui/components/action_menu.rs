//! Row and bulk action menus.
//!
//! A popup listing the actions available for one row, or for the current
//! selection. Choosing an entry hands the action back to the app.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Span,
    widgets::{List, ListItem, ListState, Paragraph},
    Frame,
};

use super::modal::Modal;
use crate::table::RowId;

/// Actions on a single row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowAction {
    /// Edit the row (not implemented beyond a notification).
    Edit,
    /// Append a copy of the row.
    Duplicate,
    /// Remove the row.
    Delete,
}

/// Actions on every selected row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    /// Append copies of the selected rows.
    Copy,
    /// Collect the selected rows for export.
    Export,
    /// Remove the selected rows.
    Delete,
}

impl BulkAction {
    /// Name used in notifications.
    pub fn name(&self) -> &'static str {
        match self {
            BulkAction::Copy => "Copy",
            BulkAction::Export => "Export",
            BulkAction::Delete => "Delete",
        }
    }
}

/// What a menu entry does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    /// A single-row action.
    Row(RowId, RowAction),
    /// A bulk action on the selection.
    Bulk(BulkAction),
}

/// Result of handling input in an open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionMenuResult {
    /// The user chose an entry.
    Apply(MenuAction),
    /// The menu was closed without choosing.
    Cancel,
}

#[derive(Debug, Clone)]
struct MenuItem {
    label: &'static str,
    action: MenuAction,
    destructive: bool,
}

/// Popup menu of row or bulk actions.
#[derive(Debug, Default)]
pub struct ActionMenu {
    title: String,
    items: Vec<MenuItem>,
    selected: usize,
    visible: bool,
    list_state: ListState,
}

impl ActionMenu {
    /// Create a hidden menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the menu for a single row.
    pub fn show_row(&mut self, id: RowId) {
        let items = vec![
            MenuItem {
                label: "✎ Edit",
                action: MenuAction::Row(id, RowAction::Edit),
                destructive: false,
            },
            MenuItem {
                label: "⧉ Duplicate",
                action: MenuAction::Row(id, RowAction::Duplicate),
                destructive: false,
            },
            MenuItem {
                label: "🗑 Delete",
                action: MenuAction::Row(id, RowAction::Delete),
                destructive: true,
            },
        ];
        self.open("Row Actions".to_string(), items);
    }

    /// Open the bulk menu for `count` selected rows.
    pub fn show_bulk(&mut self, count: usize) {
        let items = vec![
            MenuItem {
                label: "⧉ Copy Selected",
                action: MenuAction::Bulk(BulkAction::Copy),
                destructive: false,
            },
            MenuItem {
                label: "↗ Export Selected",
                action: MenuAction::Bulk(BulkAction::Export),
                destructive: false,
            },
            MenuItem {
                label: "🗑 Delete Selected",
                action: MenuAction::Bulk(BulkAction::Delete),
                destructive: true,
            },
        ];
        self.open(format!("Bulk Actions ({})", count), items);
    }

    fn open(&mut self, title: String, items: Vec<MenuItem>) {
        self.title = title;
        self.items = items;
        self.selected = 0;
        self.list_state.select(Some(0));
        self.visible = true;
    }

    /// Hide the menu.
    pub fn hide(&mut self) {
        self.visible = false;
    }

    /// Check if the menu is visible.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Get the menu title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the highlighted action.
    pub fn selected_action(&self) -> Option<MenuAction> {
        self.items.get(self.selected).map(|item| item.action)
    }

    fn move_down(&mut self) {
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
            self.list_state.select(Some(self.selected));
        }
    }

    fn move_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.list_state.select(Some(self.selected));
        }
    }

    /// Handle keyboard input while the menu is open.
    pub fn handle_input(&mut self, key: KeyEvent) -> Option<ActionMenuResult> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('j'), KeyModifiers::NONE) | (KeyCode::Down, _) => {
                self.move_down();
                None
            }
            (KeyCode::Char('k'), KeyModifiers::NONE) | (KeyCode::Up, _) => {
                self.move_up();
                None
            }
            (KeyCode::Enter, _) => {
                self.visible = false;
                self.selected_action().map(ActionMenuResult::Apply)
            }
            (KeyCode::Esc, _) | (KeyCode::Char('q'), KeyModifiers::NONE) => {
                self.visible = false;
                Some(ActionMenuResult::Cancel)
            }
            _ => None,
        }
    }

    /// Render the menu.
    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        if !self.visible {
            return;
        }

        let width = 32u16.min(area.width.saturating_sub(4));
        // Items + hint line + borders.
        let height = (self.items.len() as u16 + 3).min(area.height.saturating_sub(2));
        let inner = Modal::new(self.title.as_str()).render(frame, area, width, height);

        let list_area = Rect {
            height: inner.height.saturating_sub(1),
            ..inner
        };
        let hint_area = Rect {
            y: inner.y + list_area.height,
            height: 1,
            ..inner
        };

        let items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| {
                let style = if item.destructive {
                    Style::default().fg(Color::Red)
                } else {
                    Style::default()
                };
                ListItem::new(Span::styled(item.label, style))
            })
            .collect();

        let list = List::new(items)
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");
        frame.render_stateful_widget(list, list_area, &mut self.list_state);

        let hint = Paragraph::new(Span::styled(
            "Enter:apply  Esc:cancel",
            Style::default().fg(Color::DarkGray),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, hint_area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_new_menu_hidden() {
        let menu = ActionMenu::new();
        assert!(!menu.is_visible());
        assert_eq!(menu.selected_action(), None);
    }

    #[test]
    fn test_show_row_menu() {
        let mut menu = ActionMenu::new();
        menu.show_row(4);
        assert!(menu.is_visible());
        assert_eq!(menu.title(), "Row Actions");
        assert_eq!(
            menu.selected_action(),
            Some(MenuAction::Row(4, RowAction::Edit))
        );
    }

    #[test]
    fn test_show_bulk_menu_title() {
        let mut menu = ActionMenu::new();
        menu.show_bulk(3);
        assert_eq!(menu.title(), "Bulk Actions (3)");
        assert_eq!(menu.selected_action(), Some(MenuAction::Bulk(BulkAction::Copy)));
    }

    #[test]
    fn test_navigation_is_clamped() {
        let mut menu = ActionMenu::new();
        menu.show_bulk(1);

        menu.handle_input(key(KeyCode::Up));
        assert_eq!(menu.selected, 0);

        for _ in 0..5 {
            menu.handle_input(key(KeyCode::Char('j')));
        }
        assert_eq!(menu.selected, 2);
        assert_eq!(
            menu.selected_action(),
            Some(MenuAction::Bulk(BulkAction::Delete))
        );
    }

    #[test]
    fn test_enter_applies_and_hides() {
        let mut menu = ActionMenu::new();
        menu.show_row(9);
        menu.handle_input(key(KeyCode::Down));
        let result = menu.handle_input(key(KeyCode::Enter));
        assert_eq!(
            result,
            Some(ActionMenuResult::Apply(MenuAction::Row(
                9,
                RowAction::Duplicate
            )))
        );
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_escape_cancels() {
        let mut menu = ActionMenu::new();
        menu.show_row(1);
        assert_eq!(
            menu.handle_input(key(KeyCode::Esc)),
            Some(ActionMenuResult::Cancel)
        );
        assert!(!menu.is_visible());
    }

    #[test]
    fn test_reopen_resets_highlight() {
        let mut menu = ActionMenu::new();
        menu.show_row(1);
        menu.handle_input(key(KeyCode::Down));
        menu.hide();
        menu.show_row(2);
        assert_eq!(
            menu.selected_action(),
            Some(MenuAction::Row(2, RowAction::Edit))
        );
    }

    #[test]
    fn test_bulk_action_names() {
        assert_eq!(BulkAction::Copy.name(), "Copy");
        assert_eq!(BulkAction::Export.name(), "Export");
        assert_eq!(BulkAction::Delete.name(), "Delete");
    }
}
