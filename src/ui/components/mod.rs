//! Reusable UI components.

mod action_menu;
mod enrichment_card;
mod help_bar;
mod loading;
mod modal;
mod notification;
mod search_bar;

pub use action_menu::{ActionMenu, ActionMenuResult, BulkAction, MenuAction, RowAction};
pub use enrichment_card::EnrichmentCard;
pub use help_bar::render_context_help;
pub use loading::{Spinner, SpinnerStyle};
pub use modal::{centered_rect, Modal};
pub use notification::{Notification, NotificationManager, NotificationType};
pub use search_bar::{highlight_text, render_search_bar, QuickSearch};
