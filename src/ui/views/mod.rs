//! Application views.

mod help;
mod table_view;

pub use help::{HelpAction, HelpView};
pub use table_view::{HitTarget, TableContext, TableView, ViewMode};
