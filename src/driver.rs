//! Main loop: frame → landmarks → session step → keystroke → display.
//!
//! The loop is synchronous and runs at the frame source's rate. Each
//! iteration:
//! 1. Pulls the next frame (end of stream ends the run)
//! 2. Asks the landmark provider for a hand pose
//! 3. Advances the [`Session`] with the frame's capture time
//! 4. Injects the activated key, if any
//! 5. Presents the draw list and polls for the quit key

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::camera::{Frame, FrameSource};
use crate::injector::KeyInjector;
use crate::render::{Canvas, DrawCommand, Renderer};
use crate::session::Session;
use crate::tracker::{LandmarkProvider, TrackerError};

/// Where the session is shown and the quit key is read.
pub trait Display {
    fn present(&mut self, frame: &Frame, commands: &[DrawCommand]) -> io::Result<()>;

    /// Whether the user asked to quit since the last call.
    fn quit_requested(&mut self) -> io::Result<bool>;
}

#[derive(Debug, thiserror::Error)]
pub enum RunError {
    #[error("Hand tracker failed: {0}")]
    Tracker(#[from] TrackerError),

    #[error("Terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
}

/// Why the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The frame source ran out
    EndOfStream,
    /// Quit key pressed
    QuitKey,
    /// Ctrl+C
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    /// Every activated key token, in order, including failed injections
    pub typed: Vec<String>,
    pub reason: StopReason,
}

pub struct Driver<S, P, I, D> {
    source: S,
    tracker: P,
    injector: I,
    display: D,
    session: Session,
}

impl<S, P, I, D> Driver<S, P, I, D>
where
    S: FrameSource,
    P: LandmarkProvider,
    I: KeyInjector,
    D: Display,
{
    pub fn new(source: S, tracker: P, injector: I, display: D, session: Session) -> Self {
        Self {
            source,
            tracker,
            injector,
            display,
            session,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn injector(&self) -> &I {
        &self.injector
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Run until end of stream, the quit key, or `stop` is set.
    ///
    /// Tracker and display failures end the run with an error. A failed
    /// keystroke is logged and the loop continues.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<RunSummary, RunError> {
        let mut frames = 0u64;
        let mut typed = Vec::new();

        let reason = loop {
            if stop.load(Ordering::SeqCst) {
                break StopReason::Interrupted;
            }

            let Some(frame) = self.source.next_frame() else {
                log::info!("Frame source ended after {} frames", frames);
                break StopReason::EndOfStream;
            };
            frames += 1;
            self.session.set_frame_size(frame.width, frame.height);

            let pose = self.tracker.detect(&frame)?;
            let output = self.session.advance(pose.as_ref(), frame.timestamp);

            if let Some(token) = output.activated() {
                log::info!("Key '{}' activated", token);
                typed.push(token.to_string());
                if let Err(e) = self.injector.press(token) {
                    log::warn!("Keystroke for '{}' not sent: {}", token, e);
                }
            }

            self.display.present(&frame, &output.draw)?;
            if self.display.quit_requested()? {
                break StopReason::QuitKey;
            }
        };

        log::info!(
            "Stopped ({:?}) after {} frames, {} keys typed",
            reason,
            frames,
            typed.len()
        );
        Ok(RunSummary {
            frames,
            typed,
            reason,
        })
    }
}

/// Off-screen display: renders into a fixed-size canvas.
///
/// Used for dry runs without a terminal and in tests.
pub struct HeadlessDisplay {
    renderer: Renderer,
    canvas: Canvas,
    presented: usize,
    quit_after: Option<usize>,
    last_commands: Vec<DrawCommand>,
}

impl HeadlessDisplay {
    pub fn new(renderer: Renderer, cols: u16, rows: u16) -> Self {
        Self {
            renderer,
            canvas: Canvas::new(cols, rows),
            presented: 0,
            quit_after: None,
            last_commands: Vec::new(),
        }
    }

    /// Report a quit request once `frames` frames have been presented.
    pub fn quit_after(mut self, frames: usize) -> Self {
        self.quit_after = Some(frames);
        self
    }

    pub fn presented(&self) -> usize {
        self.presented
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    pub fn last_commands(&self) -> &[DrawCommand] {
        &self.last_commands
    }
}

impl Display for HeadlessDisplay {
    fn present(&mut self, frame: &Frame, commands: &[DrawCommand]) -> io::Result<()> {
        self.renderer.set_frame_size(frame.width, frame.height);
        self.renderer.compose(&mut self.canvas, Some(frame), commands);
        self.last_commands = commands.to_vec();
        self.presented += 1;
        Ok(())
    }

    fn quit_requested(&mut self) -> io::Result<bool> {
        Ok(self.quit_after.is_some_and(|n| self.presented >= n))
    }
}
