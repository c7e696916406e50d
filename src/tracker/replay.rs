//! Landmark playback from a JSON-lines recording.
//!
//! Each non-empty line is a [`DetectionResult`]; one line is consumed per
//! frame. Once the recording is exhausted every frame reports no hand.

use std::collections::VecDeque;
use std::io::BufRead;
use std::path::Path;

use super::landmarks::{DetectionResult, HandPose};
use super::{LandmarkProvider, TrackerError};
use crate::camera::Frame;

/// Provider that plays back recorded poses, one per frame.
#[derive(Debug, Clone, Default)]
pub struct ReplayTracker {
    poses: VecDeque<Option<HandPose>>,
}

impl ReplayTracker {
    /// Play back an in-memory pose sequence.
    pub fn from_poses<I>(poses: I) -> Self
    where
        I: IntoIterator<Item = Option<HandPose>>,
    {
        Self {
            poses: poses.into_iter().collect(),
        }
    }

    /// Parse a recording from any reader.
    pub fn from_reader<R: BufRead>(reader: R, min_confidence: f32) -> Result<Self, TrackerError> {
        let mut poses = VecDeque::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let result: DetectionResult = serde_json::from_str(line)
                .map_err(|e| TrackerError::RecordingParse {
                    line: i + 1,
                    source: e,
                })?;
            poses.push_back(result.best_hand(min_confidence));
        }
        Ok(Self { poses })
    }

    /// Load a recording file.
    pub fn open(path: &Path, min_confidence: f32) -> Result<Self, TrackerError> {
        let file = std::fs::File::open(path).map_err(|e| TrackerError::Recording {
            path: path.to_path_buf(),
            source: e,
        })?;
        let tracker = Self::from_reader(std::io::BufReader::new(file), min_confidence)?;
        log::info!(
            "Loaded {} recorded frame(s) from {}",
            tracker.remaining(),
            path.display()
        );
        Ok(tracker)
    }

    /// Frames left in the recording.
    pub fn remaining(&self) -> usize {
        self.poses.len()
    }
}

impl LandmarkProvider for ReplayTracker {
    fn detect(&mut self, _frame: &Frame) -> Result<Option<HandPose>, TrackerError> {
        Ok(self.poses.pop_front().flatten())
    }
}
