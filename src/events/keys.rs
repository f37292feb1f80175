//! Key binding definitions and contextual hints.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// The input context that decides which hints are shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyContext {
    /// The table has focus.
    Table,
    /// The search input has focus.
    Search,
    /// A row or bulk action menu is open.
    ActionMenu,
    /// The enrichment card is open.
    EnrichmentCard,
    /// The help overlay is open.
    Help,
}

/// Get the status bar hints for a context.
///
/// Keys are written in brackets so the help bar can style them.
pub fn get_context_hints(context: KeyContext) -> &'static str {
    match context {
        KeyContext::Table => {
            "[j/k] move  [Space] select  [^A] all  [/] search  [a] add  [Enter] row menu  [b] bulk  [J/K] drag  [?] help  [q] quit"
        }
        KeyContext::Search => "[type] filter  [Enter] done  [^U] clear  [Esc] leave",
        KeyContext::ActionMenu => "[j/k] navigate  [Enter] apply  [Esc] cancel",
        KeyContext::EnrichmentCard => "[i/Esc] close",
        KeyContext::Help => "[Esc/q] close",
    }
}

/// Check if a key is the select-all chord.
///
/// Ctrl+A everywhere; Super+A where the terminal reports the platform key.
pub fn is_select_all_chord(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('a') | KeyCode::Char('A'))
        && key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER)
}

/// Check if a key is the cancel key.
pub fn is_cancel(key: &KeyEvent) -> bool {
    key.code == KeyCode::Esc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all_chord_ctrl() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL);
        assert!(is_select_all_chord(&key));
    }

    #[test]
    fn test_select_all_chord_super() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::SUPER);
        assert!(is_select_all_chord(&key));
    }

    #[test]
    fn test_plain_a_is_not_chord() {
        let key = KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE);
        assert!(!is_select_all_chord(&key));
    }

    #[test]
    fn test_is_cancel() {
        assert!(is_cancel(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(!is_cancel(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)));
    }

    #[test]
    fn test_every_context_has_hints() {
        for context in [
            KeyContext::Table,
            KeyContext::Search,
            KeyContext::ActionMenu,
            KeyContext::EnrichmentCard,
            KeyContext::Help,
        ] {
            assert!(get_context_hints(context).contains('['));
        }
    }
}
