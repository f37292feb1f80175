//! User interface components and views.
//!
//! This module contains all TUI rendering logic: the table view, popups,
//! toasts and the status bar.

mod components;
pub mod theme;
mod views;

pub use components::{
    centered_rect, highlight_text, render_context_help, render_search_bar, ActionMenu,
    ActionMenuResult, BulkAction, EnrichmentCard, MenuAction, Modal, Notification,
    NotificationManager, NotificationType, QuickSearch, RowAction, Spinner, SpinnerStyle,
};
pub use theme::Theme;
pub use views::{HelpAction, HelpView, HitTarget, TableContext, TableView, ViewMode};
