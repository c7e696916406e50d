//! Key handling for the keyboard view.
//!
//! Only quit keys are acted on; everything else typed into the terminal is
//! ignored.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Result of handling a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    None,
}

/// Map a key event to an action.
///
/// Quits on `quit_key` (case-insensitive), Esc, or Ctrl+C. Raw mode turns
/// Ctrl+C into a key event instead of a signal, so it is handled here.
pub fn handle_key_event(event: KeyEvent, quit_key: char) -> KeyAction {
    if event.kind == KeyEventKind::Release {
        return KeyAction::None;
    }

    match event.code {
        KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char(c) if event.modifiers.contains(KeyModifiers::CONTROL) => {
            if c.eq_ignore_ascii_case(&'c') {
                KeyAction::Quit
            } else {
                KeyAction::None
            }
        }
        KeyCode::Char(c) if c.eq_ignore_ascii_case(&quit_key) => KeyAction::Quit,
        _ => KeyAction::None,
    }
}
