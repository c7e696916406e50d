//! Frame sources consumed by the main loop.

use std::time::{Duration, Instant};

use super::types::Frame;

/// A sequence of frames, pulled one at a time.
pub trait FrameSource {
    /// Block until the next frame is available. `None` means end of stream.
    fn next_frame(&mut self) -> Option<Frame>;
}

impl<T: FrameSource + ?Sized> FrameSource for Box<T> {
    fn next_frame(&mut self) -> Option<Frame> {
        (**self).next_frame()
    }
}

/// Blank frames at a fixed rate, for running without a camera.
///
/// Timestamps advance by exactly one frame interval per frame, starting at
/// the moment the source was created, so runs are reproducible.
#[derive(Debug, Clone)]
pub struct SyntheticFrames {
    width: u32,
    height: u32,
    interval: Duration,
    start: Instant,
    produced: u32,
    limit: Option<u32>,
    pace: bool,
}

impl SyntheticFrames {
    pub fn new(width: u32, height: u32, fps: u32) -> Self {
        Self {
            width,
            height,
            interval: Duration::from_secs(1) / fps.max(1),
            start: Instant::now(),
            produced: 0,
            limit: None,
            pace: false,
        }
    }

    /// Stop after `count` frames.
    pub fn with_limit(mut self, count: u32) -> Self {
        self.limit = Some(count);
        self
    }

    /// Sleep between frames so playback runs in real time.
    pub fn paced(mut self) -> Self {
        self.pace = true;
        self
    }
}

impl FrameSource for SyntheticFrames {
    fn next_frame(&mut self) -> Option<Frame> {
        if self.limit.is_some_and(|limit| self.produced >= limit) {
            return None;
        }
        let timestamp = self.start + self.interval * self.produced;
        if self.pace {
            let now = Instant::now();
            if timestamp > now {
                std::thread::sleep(timestamp - now);
            }
        }
        self.produced += 1;
        Some(Frame::blank_at(self.width, self.height, timestamp))
    }
}
