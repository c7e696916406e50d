//! Full-screen terminal view of the camera with the keyboard overlay.

use crossterm::event::{self, Event};
use std::io::{self, Stdout, Write};
use std::time::Duration;

use super::input::{handle_key_event, KeyAction};
use super::raw_mode::RawModeGuard;
use crate::camera::Frame;
use crate::driver::Display;
use crate::render::{Canvas, DrawCommand, Renderer};

/// Longest wait for a key press per frame
const POLL_TIMEOUT: Duration = Duration::from_millis(5);

/// Draws each frame on the alternate screen and watches for quit keys.
///
/// The terminal is restored when the display is dropped.
pub struct TerminalDisplay {
    renderer: Renderer,
    canvas: Canvas,
    quit_key: char,
    stdout: Stdout,
    guard: RawModeGuard,
}

impl TerminalDisplay {
    pub fn new(renderer: Renderer, quit_key: char) -> io::Result<Self> {
        let guard = RawModeGuard::enter()?;
        let (cols, rows) = crossterm::terminal::size()?;
        log::debug!("Terminal size {}x{}", cols, rows);
        Ok(Self {
            renderer,
            canvas: Canvas::new(cols, rows),
            quit_key,
            stdout: io::stdout(),
            guard,
        })
    }

    /// Leave raw mode and the alternate screen.
    pub fn restore(&mut self) -> io::Result<()> {
        self.guard.exit()
    }
}

impl Display for TerminalDisplay {
    fn present(&mut self, frame: &Frame, commands: &[DrawCommand]) -> io::Result<()> {
        self.renderer.set_frame_size(frame.width, frame.height);
        self.renderer.compose(&mut self.canvas, Some(frame), commands);
        self.stdout.write_all(self.canvas.to_ansi().as_bytes())?;
        self.stdout.flush()
    }

    fn quit_requested(&mut self) -> io::Result<bool> {
        let mut timeout = POLL_TIMEOUT;
        while event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(key, self.quit_key) == KeyAction::Quit {
                        return Ok(true);
                    }
                }
                Event::Resize(cols, rows) => {
                    log::debug!("Terminal resized to {}x{}", cols, rows);
                    self.canvas.resize(cols, rows);
                    // Stale cells outside the new area would otherwise linger
                    crossterm::execute!(
                        self.stdout,
                        crossterm::terminal::Clear(crossterm::terminal::ClearType::All)
                    )?;
                }
                _ => {}
            }
            timeout = Duration::ZERO;
        }
        Ok(false)
    }
}
