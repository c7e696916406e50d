//! Terminal management: raw mode, key handling and the full-screen view.

mod display;
mod input;
mod raw_mode;

pub use display::TerminalDisplay;
pub use input::{handle_key_event, KeyAction};
pub use raw_mode::RawModeGuard;
