//! Hand pose types and the landmark JSON format.

use serde::{Deserialize, Serialize};

/// Hand landmark indices (MediaPipe hand landmark model convention)
#[allow(dead_code)]
pub mod index {
    pub const WRIST: usize = 0;
    pub const THUMB_CMC: usize = 1;
    pub const THUMB_MCP: usize = 2;
    pub const THUMB_IP: usize = 3;
    pub const THUMB_TIP: usize = 4;
    pub const INDEX_FINGER_MCP: usize = 5;
    pub const INDEX_FINGER_PIP: usize = 6;
    pub const INDEX_FINGER_DIP: usize = 7;
    pub const INDEX_FINGER_TIP: usize = 8;
    pub const MIDDLE_FINGER_MCP: usize = 9;
    pub const MIDDLE_FINGER_PIP: usize = 10;
    pub const MIDDLE_FINGER_DIP: usize = 11;
    pub const MIDDLE_FINGER_TIP: usize = 12;
    pub const RING_FINGER_MCP: usize = 13;
    pub const RING_FINGER_PIP: usize = 14;
    pub const RING_FINGER_DIP: usize = 15;
    pub const RING_FINGER_TIP: usize = 16;
    pub const PINKY_MCP: usize = 17;
    pub const PINKY_PIP: usize = 18;
    pub const PINKY_DIP: usize = 19;
    pub const PINKY_TIP: usize = 20;
}

/// Number of landmarks in a hand pose.
pub const LANDMARK_COUNT: usize = 21;

/// A single hand landmark.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// X coordinate (0.0 to 1.0, normalized to image width)
    pub x: f32,
    /// Y coordinate (0.0 to 1.0, normalized to image height)
    pub y: f32,
    /// Depth relative to the wrist
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// One detected hand for the current frame.
#[derive(Clone, Debug, PartialEq)]
pub struct HandPose {
    pub landmarks: [Landmark; LANDMARK_COUNT],
    /// Detection confidence (0.0 to 1.0)
    pub confidence: f32,
    /// "Left" or "Right" as reported by the model
    pub handedness: String,
}

impl HandPose {
    /// Pose with only the index tip and thumb tip set; every other landmark
    /// sits on the index tip.
    pub fn from_tips(index_tip: Landmark, thumb_tip: Landmark) -> Self {
        let mut landmarks = [index_tip; LANDMARK_COUNT];
        landmarks[index::THUMB_TIP] = thumb_tip;
        Self {
            landmarks,
            confidence: 1.0,
            handedness: "Right".to_string(),
        }
    }

    pub fn index_tip(&self) -> Landmark {
        self.landmarks[index::INDEX_FINGER_TIP]
    }

    pub fn thumb_tip(&self) -> Landmark {
        self.landmarks[index::THUMB_TIP]
    }

    /// All landmarks as pixel coordinates for a frame of the given size.
    pub fn to_pixels(&self, width: f32, height: f32) -> Vec<(f32, f32)> {
        self.landmarks
            .iter()
            .map(|lm| (lm.x * width, lm.y * height))
            .collect()
    }
}

/// Hand entry as emitted by the landmark helper and stored in recordings.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct HandJson {
    #[serde(default)]
    pub handedness: String,
    /// Handedness classification score (left/right certainty). The model's
    /// own detection threshold is applied inside the helper; this is a second
    /// filter on top of it.
    #[serde(default = "default_score")]
    pub score: f32,
    pub landmarks: Vec<Landmark>,
}

fn default_score() -> f32 {
    1.0
}

/// One line of landmark output: all hands found in one frame.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct DetectionResult {
    #[serde(default)]
    pub hands: Vec<HandJson>,
    #[serde(default)]
    pub error: Option<String>,
}

impl DetectionResult {
    /// Pick the first hand whose handedness score meets `min_confidence` and
    /// that has a full set of landmarks.
    pub fn best_hand(self, min_confidence: f32) -> Option<HandPose> {
        for hand in self.hands {
            if hand.score < min_confidence {
                log::debug!("Skipping hand with score {:.2}", hand.score);
                continue;
            }
            if hand.landmarks.len() != LANDMARK_COUNT {
                log::warn!(
                    "Expected {} landmarks, got {}",
                    LANDMARK_COUNT,
                    hand.landmarks.len()
                );
                continue;
            }

            let mut landmarks = [Landmark::default(); LANDMARK_COUNT];
            landmarks.copy_from_slice(&hand.landmarks);

            return Some(HandPose {
                landmarks,
                confidence: hand.score,
                handedness: hand.handedness,
            });
        }
        None
    }
}

impl From<&HandPose> for DetectionResult {
    fn from(pose: &HandPose) -> Self {
        Self {
            hands: vec![HandJson {
                handedness: pose.handedness.clone(),
                score: pose.confidence,
                landmarks: pose.landmarks.to_vec(),
            }],
            error: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hand(score: f32, count: usize) -> HandJson {
        HandJson {
            handedness: "Left".to_string(),
            score,
            landmarks: vec![Landmark::new(0.5, 0.5); count],
        }
    }

    #[test]
    fn test_from_tips() {
        let pose = HandPose::from_tips(Landmark::new(0.1, 0.2), Landmark::new(0.3, 0.4));
        assert_eq!(pose.index_tip(), Landmark::new(0.1, 0.2));
        assert_eq!(pose.thumb_tip(), Landmark::new(0.3, 0.4));
        assert_eq!(pose.landmarks[index::WRIST], Landmark::new(0.1, 0.2));
    }

    #[test]
    fn test_to_pixels() {
        let pose = HandPose::from_tips(Landmark::new(0.5, 0.25), Landmark::new(1.0, 0.0));
        let px = pose.to_pixels(200.0, 100.0);
        assert_eq!(px.len(), LANDMARK_COUNT);
        assert_eq!(px[index::INDEX_FINGER_TIP], (100.0, 25.0));
        assert_eq!(px[index::THUMB_TIP], (200.0, 0.0));
    }

    #[test]
    fn test_best_hand_filters_low_confidence() {
        let result = DetectionResult {
            hands: vec![hand(0.3, 21), hand(0.9, 21)],
            error: None,
        };
        let pose = result.best_hand(0.7).unwrap();
        assert!((pose.confidence - 0.9).abs() < 0.001);
    }

    #[test]
    fn test_best_hand_skips_wrong_landmark_count() {
        let result = DetectionResult {
            hands: vec![hand(0.9, 5)],
            error: None,
        };
        assert!(result.best_hand(0.5).is_none());
    }

    #[test]
    fn test_best_hand_empty() {
        assert!(DetectionResult::default().best_hand(0.0).is_none());
    }

    #[test]
    fn test_parse_helper_output() {
        let lm = r#"{"x":0.5,"y":0.5,"z":0.0}"#;
        let lms = vec![lm; 21].join(",");
        let line = format!(
            r#"{{"hands":[{{"handedness":"Right","score":0.95,"landmarks":[{}]}}]}}"#,
            lms
        );
        let result: DetectionResult = serde_json::from_str(&line).unwrap();
        assert!(result.error.is_none());
        let pose = result.best_hand(0.7).unwrap();
        assert_eq!(pose.handedness, "Right");
    }

    #[test]
    fn test_pose_round_trips_through_detection_result() {
        let pose = HandPose::from_tips(Landmark::new(0.1, 0.2), Landmark::new(0.3, 0.4));
        let json = serde_json::to_string(&DetectionResult::from(&pose)).unwrap();
        let back: DetectionResult = serde_json::from_str(&json).unwrap();
        assert_eq!(back.best_hand(0.0).unwrap(), pose);
    }
}
