//! Event handling for the application.
//!
//! Terminal input is polled by [`EventHandler`] and delivered to the app as
//! [`Event`] values.

mod handler;
mod keys;

use crossterm::event::{KeyEvent, MouseEvent};

pub use handler::EventHandler;
pub use keys::{get_context_hints, is_cancel, is_select_all_chord, KeyContext};

/// Events processed by `App::update`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A key was pressed.
    Key(KeyEvent),
    /// A mouse button, drag or scroll event.
    Mouse(MouseEvent),
    /// The terminal was resized.
    Resize(u16, u16),
    /// The tick interval elapsed without input.
    Tick,
    /// The application was asked to exit.
    Quit,
}
