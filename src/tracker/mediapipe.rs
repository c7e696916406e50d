//! MediaPipe hand landmarker driven through a helper subprocess.
//!
//! Protocol, one request per frame:
//! - request: `width`, `height`, `channels` as little-endian u32, then the raw
//!   RGB pixel bytes
//! - response: a single JSON line, see [`DetectionResult`]
//!
//! The helper prints `READY` once its model is loaded. It is started with
//! `--min-confidence <value>`, which sets the model's detection and tracking
//! thresholds.

use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use super::landmarks::{DetectionResult, HandPose};
use super::{LandmarkProvider, TrackerError};
use crate::camera::Frame;

/// How to launch the landmark helper.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerSettings {
    /// Python interpreter
    pub python: PathBuf,
    /// Helper script
    pub script: PathBuf,
    /// Detection and tracking threshold passed to the model; also the
    /// minimum handedness score of an accepted hand
    pub min_confidence: f32,
}

impl Default for TrackerSettings {
    fn default() -> Self {
        Self {
            python: PathBuf::from("python3"),
            script: PathBuf::from("scripts/hand_landmarks.py"),
            min_confidence: 0.7,
        }
    }
}

/// Command line for the helper, without stdio setup.
fn helper_command(settings: &TrackerSettings) -> Command {
    let mut command = Command::new(&settings.python);
    command
        .arg(&settings.script)
        .arg("--min-confidence")
        .arg(settings.min_confidence.clamp(0.0, 1.0).to_string());
    command
}

/// Hand tracker backed by a MediaPipe helper process.
pub struct MediaPipeTracker {
    process: Child,
    stdin: ChildStdin,
    stdout_reader: BufReader<ChildStdout>,
    min_confidence: f32,
}

impl MediaPipeTracker {
    /// Start the helper and wait for it to signal readiness.
    pub fn spawn(settings: &TrackerSettings) -> Result<Self, TrackerError> {
        if !settings.script.exists() {
            return Err(TrackerError::ScriptNotFound(settings.script.clone()));
        }

        log::info!(
            "Starting landmark helper: {} {} (min confidence {})",
            settings.python.display(),
            settings.script.display(),
            settings.min_confidence
        );

        let mut process = helper_command(settings)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| TrackerError::SpawnFailed {
                program: settings.python.display().to_string(),
                source: e,
            })?;

        let (Some(stdin), Some(stdout)) = (process.stdin.take(), process.stdout.take()) else {
            let _ = process.kill();
            return Err(TrackerError::HelperExited);
        };
        let mut stdout_reader = BufReader::new(stdout);

        let mut ready_line = String::new();
        if stdout_reader.read_line(&mut ready_line)? == 0 {
            let _ = process.kill();
            return Err(TrackerError::HelperExited);
        }
        if ready_line.trim() != "READY" {
            let _ = process.kill();
            return Err(TrackerError::NotReady(ready_line.trim().to_string()));
        }

        log::info!("Landmark helper ready");

        Ok(Self {
            process,
            stdin,
            stdout_reader,
            min_confidence: settings.min_confidence.clamp(0.0, 1.0),
        })
    }
}

impl LandmarkProvider for MediaPipeTracker {
    fn detect(&mut self, frame: &Frame) -> Result<Option<HandPose>, TrackerError> {
        if frame.data.is_empty() || frame.width == 0 || frame.height == 0 {
            return Ok(None);
        }

        let channels = frame.bytes_per_pixel() as u32;
        self.stdin.write_all(&frame.width.to_le_bytes())?;
        self.stdin.write_all(&frame.height.to_le_bytes())?;
        self.stdin.write_all(&channels.to_le_bytes())?;
        self.stdin.write_all(&frame.data)?;
        self.stdin.flush()?;

        let mut response = String::new();
        if self.stdout_reader.read_line(&mut response)? == 0 {
            return Err(TrackerError::HelperExited);
        }

        let result: DetectionResult = match serde_json::from_str(&response) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Unparsable landmark output ({}): {}", e, response.trim());
                return Ok(None);
            }
        };

        if let Some(error) = &result.error {
            log::warn!("Landmark helper error: {}", error);
            return Ok(None);
        }

        let pose = result.best_hand(self.min_confidence);
        if let Some(ref p) = pose {
            let tip = p.index_tip();
            log::debug!(
                "Hand detected: {} (confidence={:.2}), index_tip=({:.3},{:.3})",
                p.handedness,
                p.confidence,
                tip.x,
                tip.y
            );
        }
        Ok(pose)
    }
}

impl Drop for MediaPipeTracker {
    fn drop(&mut self) {
        let _ = self.process.kill();
        let _ = self.process.wait();
    }
}
