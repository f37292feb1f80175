//! Terminal session setup and teardown.
//!
//! Raw mode, the alternate screen and mouse capture are held for the
//! lifetime of a [`TerminalSession`] and released when it is dropped, so
//! keyboard capture ends with the session even on early return or panic.

use std::io::{self, Stdout};
use std::panic;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, warn};

use crate::error::{AppError, Result};

/// The terminal type the application draws to.
pub type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Guard owning the terminal while the UI runs.
pub struct TerminalSession {
    terminal: Tui,
}

impl TerminalSession {
    /// Enter raw mode, switch to the alternate screen and capture the mouse.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Terminal` if the terminal refuses a mode change,
    /// or `AppError::Io` if the backend cannot be created. Whatever was
    /// already enabled is rolled back.
    pub fn start() -> Result<Self> {
        install_panic_hook();

        enable_raw_mode().map_err(|e| AppError::terminal(format!("raw mode: {}", e)))?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen, EnableMouseCapture) {
            let _ = restore();
            return Err(AppError::terminal(format!("alternate screen: {}", e)));
        }

        let terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(e) => {
                let _ = restore();
                return Err(AppError::Io(e));
            }
        };

        debug!("Terminal session started");
        Ok(Self { terminal })
    }

    /// Get the terminal for drawing.
    pub fn terminal(&mut self) -> &mut Tui {
        &mut self.terminal
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = restore() {
            warn!(error = %e, "Failed to restore terminal");
        }
        let _ = self.terminal.show_cursor();
        debug!("Terminal session ended");
    }
}

/// Restore the terminal if the process panics while a session is active.
fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore();
        original_hook(panic_info);
    }));
}

fn restore() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}
