//! Per-frame step: gesture evaluation plus the draw list for the renderer.
//!
//! [`Session::advance`] holds all of the loop's decision logic. The driver
//! owns the I/O around it: it supplies the pose and time, injects
//! [`FrameOutput::activated`] and hands [`FrameOutput::draw`] to the display.

use std::time::Instant;

use crate::gesture::{self, GestureConfig, GestureOutcome, GestureState};
use crate::keyboard::Keyboard;
use crate::render::DrawCommand;
use crate::tracker::HandPose;

/// Result of one session step.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameOutput {
    pub outcome: GestureOutcome,
    /// Draw commands in paint order
    pub draw: Vec<DrawCommand>,
}

impl FrameOutput {
    /// Key token to send to the OS this frame, if any.
    pub fn activated(&self) -> Option<&str> {
        self.outcome.activated.as_deref()
    }
}

/// Keyboard, gesture tuning and the gesture state threaded between frames.
#[derive(Debug, Clone)]
pub struct Session {
    keyboard: Keyboard,
    config: GestureConfig,
    state: GestureState,
    activations: u64,
    last_typed: Option<String>,
    status_bar: bool,
    quit_key: char,
}

impl Session {
    pub fn new(keyboard: Keyboard, config: GestureConfig) -> Self {
        Self {
            keyboard,
            config,
            state: GestureState::default(),
            activations: 0,
            last_typed: None,
            status_bar: true,
            quit_key: 'q',
        }
    }

    /// Enable or disable the status line in the draw list.
    pub fn with_status_bar(mut self, enabled: bool) -> Self {
        self.status_bar = enabled;
        self
    }

    /// Key named in the status line's quit hint.
    pub fn with_quit_key(mut self, key: char) -> Self {
        self.quit_key = key;
        self
    }

    /// Follow the resolution the camera actually delivers.
    ///
    /// Landmarks are scaled to this size; key rectangles stay where they are.
    pub fn set_frame_size(&mut self, width: u32, height: u32) {
        if (width, height) != (self.config.frame_width, self.config.frame_height) {
            log::info!(
                "Frame size {}x{} -> {}x{}",
                self.config.frame_width,
                self.config.frame_height,
                width,
                height
            );
            self.config.frame_width = width;
            self.config.frame_height = height;
        }
    }

    pub fn keyboard(&self) -> &Keyboard {
        &self.keyboard
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Number of keys fired since the session started.
    pub fn activations(&self) -> u64 {
        self.activations
    }

    /// Back to the freshly-created state.
    pub fn reset(&mut self) {
        self.state = GestureState::default();
        self.activations = 0;
        self.last_typed = None;
    }

    /// Evaluate one frame.
    pub fn advance(&mut self, pose: Option<&HandPose>, now: Instant) -> FrameOutput {
        let (state, outcome) =
            gesture::advance(&self.state, pose, self.keyboard.keys(), now, &self.config);
        self.state = state;

        if let Some(label) = &outcome.activated {
            self.activations += 1;
            self.last_typed = Some(label.clone());
        }

        let draw = self.draw_list(pose, &outcome);
        FrameOutput { outcome, draw }
    }

    fn draw_list(&self, pose: Option<&HandPose>, outcome: &GestureOutcome) -> Vec<DrawCommand> {
        let mut draw = Vec::with_capacity(self.keyboard.len() + 3);

        // Both shift keys light up together: hover identity is the label
        for key in self.keyboard.keys() {
            draw.push(DrawCommand::Key {
                x: key.x,
                y: key.y,
                width: key.width,
                height: key.height,
                label: key.display_label(),
                hovered: outcome.hovered.as_deref() == Some(key.label.as_str()),
            });
        }

        if let (Some(pose), Some(tip)) = (pose, outcome.fingertip) {
            let points = pose
                .to_pixels(self.config.frame_width as f32, self.config.frame_height as f32)
                .into_iter()
                .map(|(x, y)| gesture::PixelPoint::new(x, y))
                .collect();
            draw.push(DrawCommand::Landmarks(points));
            draw.push(DrawCommand::Cursor {
                at: tip,
                clicked: outcome.activated.is_some(),
            });
        }

        if self.status_bar {
            draw.push(DrawCommand::Status(self.status_text(outcome)));
        }
        draw
    }

    fn status_text(&self, outcome: &GestureOutcome) -> String {
        let hover = outcome
            .hovered
            .as_deref()
            .map_or_else(|| "-".to_string(), str::to_uppercase);
        let pinch = outcome
            .pinch_distance
            .map_or_else(|| "no hand".to_string(), |d| format!("{:.0}px", d));
        let last = self
            .last_typed
            .as_deref()
            .map_or_else(|| "-".to_string(), str::to_uppercase);
        format!(
            " hover: {} | pinch: {} | last: {} | typed: {} | {} to quit",
            hover, pinch, last, self.activations, self.quit_key
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::{Key, KeyGeometry};
    use crate::tracker::Landmark;
    use std::time::Duration;

    fn config() -> GestureConfig {
        GestureConfig {
            frame_width: 1000,
            frame_height: 1000,
            click_distance_threshold: 30.0,
            click_cooldown: Duration::from_millis(500),
        }
    }

    fn pinch_at(x: f32, y: f32) -> HandPose {
        HandPose::from_tips(
            Landmark::new(x / 1000.0, y / 1000.0),
            Landmark::new(x / 1000.0, (y + 5.0) / 1000.0),
        )
    }

    fn key_commands(output: &FrameOutput) -> Vec<(&str, bool)> {
        output
            .draw
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Key { label, hovered, .. } => Some((label.as_str(), *hovered)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_draw_list_without_hand() {
        let mut session = Session::new(Keyboard::default(), config());
        let output = session.advance(None, Instant::now());
        assert_eq!(key_commands(&output).len(), session.keyboard().len());
        assert!(key_commands(&output).iter().all(|(_, hovered)| !hovered));
        assert!(!output
            .draw
            .iter()
            .any(|c| matches!(c, DrawCommand::Cursor { .. })));
        match output.draw.last() {
            Some(DrawCommand::Status(text)) => assert!(text.contains("no hand")),
            other => panic!("Expected status line, got {:?}", other),
        }
    }

    #[test]
    fn test_both_shift_keys_highlight() {
        let mut session = Session::new(Keyboard::default(), config());
        // First shift key: row 3, col 0 -> (20, 320)
        let output = session.advance(Some(&pinch_at(60.0, 360.0)), Instant::now());
        assert_eq!(output.outcome.hovered.as_deref(), Some("shift"));
        let lit: Vec<&str> = key_commands(&output)
            .into_iter()
            .filter(|(_, hovered)| *hovered)
            .map(|(label, _)| label)
            .collect();
        assert_eq!(lit, vec!["SHIFT", "SHIFT"]);
    }

    #[test]
    fn test_cursor_turns_red_on_click() {
        let mut session = Session::new(Keyboard::default(), config());
        let t0 = Instant::now();
        // "q" is row 1, col 1 -> (120, 120)
        let output = session.advance(Some(&pinch_at(160.0, 150.0)), t0);
        assert_eq!(output.activated(), Some("q"));
        assert!(output
            .draw
            .iter()
            .any(|c| matches!(c, DrawCommand::Cursor { clicked: true, .. })));

        let output = session.advance(Some(&pinch_at(160.0, 150.0)), t0 + Duration::from_millis(100));
        assert_eq!(output.activated(), None);
        assert!(output
            .draw
            .iter()
            .any(|c| matches!(c, DrawCommand::Cursor { clicked: false, .. })));
        assert_eq!(session.activations(), 1);
    }

    #[test]
    fn test_reset_clears_cooldown() {
        let mut session = Session::new(Keyboard::default(), config());
        let t0 = Instant::now();
        session.advance(Some(&pinch_at(160.0, 150.0)), t0);
        session.reset();
        assert_eq!(session.state(), &GestureState::default());
        let output = session.advance(Some(&pinch_at(160.0, 150.0)), t0);
        assert_eq!(output.activated(), Some("q"));
    }

    #[test]
    fn test_status_bar_can_be_disabled() {
        let keys = vec![Key {
            label: "a".to_string(),
            x: 0,
            y: 0,
            width: 10,
            height: 10,
        }];
        let mut session = Session::new(Keyboard::new(keys), config()).with_status_bar(false);
        let output = session.advance(None, Instant::now());
        assert!(!output
            .draw
            .iter()
            .any(|c| matches!(c, DrawCommand::Status(_))));
    }

    #[test]
    fn test_custom_geometry_keyboard() {
        let keyboard = Keyboard::from_rows(&[vec!["x"]], &KeyGeometry::default());
        let mut session = Session::new(keyboard, config());
        let output = session.advance(Some(&pinch_at(50.0, 50.0)), Instant::now());
        assert_eq!(output.activated(), Some("x"));
    }

    #[test]
    fn test_status_names_quit_key() {
        let mut session = Session::new(Keyboard::default(), config()).with_quit_key('x');
        match session.advance(None, Instant::now()).draw.last() {
            Some(DrawCommand::Status(text)) => assert!(text.ends_with("x to quit")),
            other => panic!("Expected status line, got {:?}", other),
        }
    }

    #[test]
    fn test_frame_size_rescales_landmarks() {
        let mut session = Session::new(Keyboard::default(), config());
        session.set_frame_size(2000, 2000);
        assert_eq!(session.config().frame_width, 2000);
        // Normalized (0.08, 0.075) is now (160, 150): still over "q"
        let pose = HandPose::from_tips(Landmark::new(0.08, 0.075), Landmark::new(0.08, 0.08));
        let output = session.advance(Some(&pose), Instant::now());
        assert_eq!(output.outcome.hovered.as_deref(), Some("q"));
    }
}
