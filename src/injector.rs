//! OS keystroke injection.
//!
//! Activations are fire-and-forget: a failed press is reported to the caller,
//! which logs it and keeps running.

use rdev::{simulate, EventType, Key};
use std::thread;
use std::time::Duration;

/// Delay between synthetic events; some platforms drop events sent back to back.
const EVENT_DELAY: Duration = Duration::from_millis(20);

#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("No keyboard key for token '{0}'")]
    UnknownToken(String),

    #[error("Failed to simulate {event} for '{token}'")]
    Simulate { token: String, event: &'static str },
}

/// Emits one keystroke per activated key token.
pub trait KeyInjector {
    fn press(&mut self, token: &str) -> Result<(), InjectError>;
}

impl<T: KeyInjector + ?Sized> KeyInjector for Box<T> {
    fn press(&mut self, token: &str) -> Result<(), InjectError> {
        (**self).press(token)
    }
}

/// Map a key token (as used in layout rows) to a physical key.
///
/// Tokens are case-insensitive; non-printable keys use their lowercase names.
pub fn key_for_token(token: &str) -> Option<Key> {
    let lower = token.to_ascii_lowercase();
    let key = match lower.as_str() {
        "`" => Key::BackQuote,
        "1" => Key::Num1,
        "2" => Key::Num2,
        "3" => Key::Num3,
        "4" => Key::Num4,
        "5" => Key::Num5,
        "6" => Key::Num6,
        "7" => Key::Num7,
        "8" => Key::Num8,
        "9" => Key::Num9,
        "0" => Key::Num0,
        "-" => Key::Minus,
        "=" => Key::Equal,
        "backspace" => Key::Backspace,
        "tab" => Key::Tab,
        "[" => Key::LeftBracket,
        "]" => Key::RightBracket,
        "\\" => Key::BackSlash,
        "caps" | "capslock" => Key::CapsLock,
        ";" => Key::SemiColon,
        "'" => Key::Quote,
        "enter" | "return" => Key::Return,
        "shift" => Key::ShiftLeft,
        "," => Key::Comma,
        "." => Key::Dot,
        "/" => Key::Slash,
        "space" | " " => Key::Space,
        "esc" | "escape" => Key::Escape,
        "delete" => Key::Delete,
        "up" => Key::UpArrow,
        "down" => Key::DownArrow,
        "left" => Key::LeftArrow,
        "right" => Key::RightArrow,
        "a" => Key::KeyA,
        "b" => Key::KeyB,
        "c" => Key::KeyC,
        "d" => Key::KeyD,
        "e" => Key::KeyE,
        "f" => Key::KeyF,
        "g" => Key::KeyG,
        "h" => Key::KeyH,
        "i" => Key::KeyI,
        "j" => Key::KeyJ,
        "k" => Key::KeyK,
        "l" => Key::KeyL,
        "m" => Key::KeyM,
        "n" => Key::KeyN,
        "o" => Key::KeyO,
        "p" => Key::KeyP,
        "q" => Key::KeyQ,
        "r" => Key::KeyR,
        "s" => Key::KeyS,
        "t" => Key::KeyT,
        "u" => Key::KeyU,
        "v" => Key::KeyV,
        "w" => Key::KeyW,
        "x" => Key::KeyX,
        "y" => Key::KeyY,
        "z" => Key::KeyZ,
        _ => return None,
    };
    Some(key)
}

/// Injects keystrokes into the focused application through rdev.
///
/// On macOS this needs Accessibility permission for the terminal.
#[derive(Debug)]
pub struct RdevInjector {
    delay: Duration,
}

impl Default for RdevInjector {
    fn default() -> Self {
        Self::new()
    }
}

impl RdevInjector {
    pub fn new() -> Self {
        Self { delay: EVENT_DELAY }
    }

    fn send(&self, token: &str, event: EventType, name: &'static str) -> Result<(), InjectError> {
        simulate(&event).map_err(|_| InjectError::Simulate {
            token: token.to_string(),
            event: name,
        })?;
        thread::sleep(self.delay);
        Ok(())
    }
}

impl KeyInjector for RdevInjector {
    fn press(&mut self, token: &str) -> Result<(), InjectError> {
        let key = key_for_token(token).ok_or_else(|| InjectError::UnknownToken(token.to_string()))?;
        log::debug!("Injecting {:?} for '{}'", key, token);
        self.send(token, EventType::KeyPress(key), "key press")?;
        self.send(token, EventType::KeyRelease(key), "key release")
    }
}

/// Dry-run injector: logs activations and keeps them for inspection.
#[derive(Debug, Default, Clone)]
pub struct LogInjector {
    pressed: Vec<String>,
}

impl LogInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokens pressed so far, oldest first.
    pub fn pressed(&self) -> &[String] {
        &self.pressed
    }
}

impl KeyInjector for LogInjector {
    fn press(&mut self, token: &str) -> Result<(), InjectError> {
        log::info!("[dry-run] press '{}'", token);
        self.pressed.push(token.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::default_rows;

    #[test]
    fn test_every_default_token_maps_to_a_key() {
        for token in default_rows().iter().flatten() {
            assert!(key_for_token(token).is_some(), "no key for '{}'", token);
        }
    }

    #[test]
    fn test_letters_and_digits() {
        assert_eq!(key_for_token("a"), Some(Key::KeyA));
        assert_eq!(key_for_token("Z"), Some(Key::KeyZ));
        assert_eq!(key_for_token("0"), Some(Key::Num0));
        assert_eq!(key_for_token("7"), Some(Key::Num7));
    }

    #[test]
    fn test_named_keys() {
        assert_eq!(key_for_token("space"), Some(Key::Space));
        assert_eq!(key_for_token("enter"), Some(Key::Return));
        assert_eq!(key_for_token("backspace"), Some(Key::Backspace));
        assert_eq!(key_for_token("shift"), Some(Key::ShiftLeft));
        assert_eq!(key_for_token("caps"), Some(Key::CapsLock));
        assert_eq!(key_for_token("\\"), Some(Key::BackSlash));
    }

    #[test]
    fn test_unknown_token() {
        assert_eq!(key_for_token("hyper"), None);
        assert_eq!(key_for_token(""), None);
    }

    #[test]
    fn test_log_injector_records_presses() {
        let mut injector = LogInjector::new();
        injector.press("h").unwrap();
        injector.press("i").unwrap();
        assert_eq!(injector.pressed(), ["h".to_string(), "i".to_string()]);
    }

    #[test]
    fn test_boxed_injector() {
        let mut boxed: Box<dyn KeyInjector> = Box::new(LogInjector::new());
        assert!(boxed.press("a").is_ok());
    }
}
