//! Hand landmark detection.
//!
//! A [`LandmarkProvider`] turns a camera frame into zero or one [`HandPose`].
//! Two providers are available:
//! - [`MediaPipeTracker`] drives the MediaPipe hand landmarker through a
//!   helper subprocess
//! - [`ReplayTracker`] plays back a JSON-lines recording

mod landmarks;
mod mediapipe;
mod replay;

use std::path::PathBuf;

use crate::camera::Frame;

pub use landmarks::{index, DetectionResult, HandJson, HandPose, Landmark, LANDMARK_COUNT};
pub use mediapipe::{MediaPipeTracker, TrackerSettings};
pub use replay::ReplayTracker;

/// Anything that can find a hand in a frame.
pub trait LandmarkProvider {
    /// Detect a hand in `frame`.
    ///
    /// `Ok(None)` is the normal "no hand" result. Errors mean the provider
    /// itself is unusable.
    fn detect(&mut self, frame: &Frame) -> Result<Option<HandPose>, TrackerError>;
}

impl<T: LandmarkProvider + ?Sized> LandmarkProvider for Box<T> {
    fn detect(&mut self, frame: &Frame) -> Result<Option<HandPose>, TrackerError> {
        (**self).detect(frame)
    }
}

/// Errors that can occur while running a landmark provider.
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Landmark helper script not found at {0}")]
    ScriptNotFound(PathBuf),

    #[error("Failed to start landmark helper '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Landmark helper did not signal ready, got: {0:?}")]
    NotReady(String),

    #[error("Landmark helper exited")]
    HelperExited,

    #[error("Landmark helper I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read recording '{path}': {source}")]
    Recording {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid recording line {line}: {source}")]
    RecordingParse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}
