//! LazyTable - a terminal data table.
//!
//! The row store, selection and filtering live in [`table`]; [`app`] turns
//! key and mouse events into operations on them and draws the result with
//! [`ui`].

pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod logging;
pub mod table;
pub mod terminal;
pub mod ui;

pub use app::{App, AppState};
pub use error::{AppError, Result};
