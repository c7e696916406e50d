//! Hit testing and pinch-to-press decision logic.
//!
//! [`advance`] is a pure function of the previous [`GestureState`], the
//! current pose, the key list, the current time and the configuration. It
//! performs no I/O; the caller injects the activated key and draws the
//! outcome.

use std::time::{Duration, Instant};

use crate::keyboard::Key;
use crate::tracker::{HandPose, Landmark};

/// Tuning for hit testing and click detection.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureConfig {
    /// Capture frame width used to convert normalized landmarks to pixels
    pub frame_width: u32,
    /// Capture frame height used to convert normalized landmarks to pixels
    pub frame_height: u32,
    /// Pinch distances below this (in frame pixels) count as a click
    pub click_distance_threshold: f32,
    /// Minimum time between two activations
    pub click_cooldown: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            frame_width: 1920,
            frame_height: 1080,
            click_distance_threshold: 30.0,
            click_cooldown: Duration::from_millis(500),
        }
    }
}

/// A point in capture-frame pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PixelPoint {
    pub x: f32,
    pub y: f32,
}

impl PixelPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: PixelPoint) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// State carried from one frame to the next.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureState {
    /// When the last key fired; `None` until the first activation
    pub last_activation: Option<Instant>,
    /// Label of the key under the fingertip in the latest frame
    pub hovered: Option<String>,
}

/// What happened in one frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GestureOutcome {
    /// Label of the key under the fingertip, if any
    pub hovered: Option<String>,
    /// Label of the key that fired this frame, if any
    pub activated: Option<String>,
    /// Index fingertip in frame pixels (when a hand is present)
    pub fingertip: Option<PixelPoint>,
    /// Thumb tip in frame pixels (when a hand is present)
    pub thumb: Option<PixelPoint>,
    /// Fingertip to thumb tip distance in frame pixels
    pub pinch_distance: Option<f32>,
}

impl GestureOutcome {
    pub fn hand_present(&self) -> bool {
        self.fingertip.is_some()
    }
}

/// Whole frame pixels, truncated toward zero. Hit testing and the pinch
/// distance both work on these values.
fn to_pixels(landmark: Landmark, config: &GestureConfig) -> PixelPoint {
    PixelPoint::new(
        (landmark.x * config.frame_width as f32).trunc(),
        (landmark.y * config.frame_height as f32).trunc(),
    )
}

/// First key, in layout order, whose rectangle strictly contains `point`.
pub fn hit_test(keys: &[Key], point: PixelPoint) -> Option<&Key> {
    keys.iter().find(|k| k.contains(point.x, point.y))
}

/// Whether enough time has passed since `last` for another activation.
fn cooled_down(last: Option<Instant>, now: Instant, cooldown: Duration) -> bool {
    match last {
        None => true,
        // A clock that went backwards reads as zero elapsed
        Some(t) => now.saturating_duration_since(t) > cooldown,
    }
}

/// Run one frame of gesture evaluation.
///
/// A key fires iff the pinch distance is below the threshold, the cooldown
/// has strictly elapsed since the previous activation, and the fingertip is
/// over a key. Without a usable pose nothing is hovered and nothing fires.
pub fn advance(
    state: &GestureState,
    pose: Option<&HandPose>,
    keys: &[Key],
    now: Instant,
    config: &GestureConfig,
) -> (GestureState, GestureOutcome) {
    let usable = pose.filter(|p| p.index_tip().is_finite() && p.thumb_tip().is_finite());
    let Some(pose) = usable else {
        let next = GestureState {
            last_activation: state.last_activation,
            hovered: None,
        };
        return (next, GestureOutcome::default());
    };

    let fingertip = to_pixels(pose.index_tip(), config);
    let thumb = to_pixels(pose.thumb_tip(), config);

    let hovered = hit_test(keys, fingertip).map(|k| k.label.clone());
    let distance = fingertip.distance_to(thumb);

    let fires = distance < config.click_distance_threshold
        && cooled_down(state.last_activation, now, config.click_cooldown)
        && hovered.is_some();

    let activated = if fires { hovered.clone() } else { None };
    let last_activation = if fires { Some(now) } else { state.last_activation };

    let next = GestureState {
        last_activation,
        hovered: hovered.clone(),
    };
    let outcome = GestureOutcome {
        hovered,
        activated,
        fingertip: Some(fingertip),
        thumb: Some(thumb),
        pinch_distance: Some(distance),
    };
    (next, outcome)
}
