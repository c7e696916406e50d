//! Headless end-to-end runs of the main loop: synthetic frames, a recorded
//! landmark stream, the dry-run injector and an off-screen display.

use pinch_keys::camera::SyntheticFrames;
use pinch_keys::config::Config;
use pinch_keys::driver::{Driver, HeadlessDisplay, StopReason};
use pinch_keys::injector::LogInjector;
use pinch_keys::render::{CharSet, DrawCommand, Renderer};
use pinch_keys::session::Session;
use pinch_keys::tracker::{index, ReplayTracker, LANDMARK_COUNT};
use std::io::Cursor;
use std::sync::atomic::AtomicBool;

const WIDTH: f32 = 1920.0;
const HEIGHT: f32 = 1080.0;

/// Recording line with the index tip at pixel `(x, y)` and the thumb `gap`
/// pixels below it.
fn hand_line(x: f32, y: f32, gap: f32, score: f32) -> String {
    let landmarks: Vec<String> = (0..LANDMARK_COUNT)
        .map(|i| {
            let (px, py) = match i {
                index::THUMB_TIP => (x, y + gap),
                _ => (x, y),
            };
            format!(r#"{{"x":{},"y":{},"z":0.0}}"#, px / WIDTH, py / HEIGHT)
        })
        .collect();
    format!(
        r#"{{"hands":[{{"handedness":"Right","score":{},"landmarks":[{}]}}],"error":null}}"#,
        score,
        landmarks.join(",")
    )
}

fn no_hand() -> String {
    r#"{"hands":[],"error":null}"#.to_string()
}

fn driver_for(
    lines: &[String],
    config: &Config,
) -> Driver<SyntheticFrames, ReplayTracker, LogInjector, HeadlessDisplay> {
    let recording = lines.join("\n");
    let tracker =
        ReplayTracker::from_reader(Cursor::new(recording), config.tracker.min_confidence).unwrap();
    let frames = SyntheticFrames::new(config.camera.width, config.camera.height, 30)
        .with_limit(tracker.remaining() as u32);
    let renderer = Renderer::new(config.colors.clone(), CharSet::Off, config.camera.width, config.camera.height);
    let session = Session::new(config.build_keyboard(), config.gesture_config());
    Driver::new(frames, tracker, LogInjector::new(), HeadlessDisplay::new(renderer, 96, 27), session)
}

#[test]
fn pinches_type_keys_with_cooldown() {
    // Default layout: "a" spans (120,220)-(200,300), "s" (220,220)-(300,300)
    let mut lines = vec![
        hand_line(160.0, 260.0, 10.0, 0.95),
        hand_line(160.0, 260.0, 10.0, 0.95),
    ];
    lines.extend((0..17).map(|_| no_hand()));
    lines.push(hand_line(260.0, 260.0, 8.0, 0.9));
    lines.push(no_hand());

    let config = Config::default();
    let mut driver = driver_for(&lines, &config);
    let summary = driver.run(&AtomicBool::new(false)).unwrap();

    assert_eq!(summary.reason, StopReason::EndOfStream);
    assert_eq!(summary.frames, 21);
    assert_eq!(summary.typed, vec!["a".to_string(), "s".to_string()]);
    assert_eq!(driver.injector().pressed(), ["a".to_string(), "s".to_string()]);
    assert_eq!(driver.session().activations(), 2);
    assert_eq!(driver.display().presented(), 21);
}

#[test]
fn low_confidence_hands_and_comments_are_skipped() {
    let lines = vec![
        "# recorded at 30 fps".to_string(),
        String::new(),
        hand_line(160.0, 260.0, 5.0, 0.3),
        hand_line(160.0, 260.0, 5.0, 0.5),
    ];
    let config = Config::default();
    let mut driver = driver_for(&lines, &config);
    let summary = driver.run(&AtomicBool::new(false)).unwrap();

    assert_eq!(summary.frames, 2);
    assert!(summary.typed.is_empty());
}

#[test]
fn threshold_override_changes_what_counts_as_a_pinch() {
    let lines = vec![hand_line(160.0, 260.0, 40.0, 0.95)];

    let config = Config::default();
    let summary = driver_for(&lines, &config).run(&AtomicBool::new(false)).unwrap();
    assert!(summary.typed.is_empty());

    let mut config = Config::default();
    config.gesture.click_distance_threshold = 50.0;
    let summary = driver_for(&lines, &config).run(&AtomicBool::new(false)).unwrap();
    assert_eq!(summary.typed, vec!["a".to_string()]);
}

#[test]
fn last_frame_draws_keys_cursor_and_status() {
    let lines = vec![hand_line(160.0, 260.0, 100.0, 0.95)];
    let config = Config::default();
    let mut driver = driver_for(&lines, &config);
    driver.run(&AtomicBool::new(false)).unwrap();

    let commands = driver.display().last_commands();
    let keys = commands
        .iter()
        .filter(|c| matches!(c, DrawCommand::Key { .. }))
        .count();
    assert_eq!(keys, driver.session().keyboard().len());

    let hovered: Vec<&str> = commands
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Key { label, hovered: true, .. } => Some(label.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(hovered, vec!["A"]);

    assert!(commands
        .iter()
        .any(|c| matches!(c, DrawCommand::Cursor { clicked: false, .. })));
    match commands.last() {
        Some(DrawCommand::Status(text)) => assert!(text.contains("hover: A")),
        other => panic!("Expected status line last, got {:?}", other),
    }

    // Key labels reach the terminal canvas
    let canvas = driver.display().canvas();
    let text: String = (0..canvas.height()).map(|y| canvas.row_text(y)).collect();
    assert!(text.contains('Q'));
    assert!(text.contains("hover: A"));
}

#[test]
fn malformed_recording_reports_line_number() {
    let recording = format!("{}\nnot json\n", no_hand());
    let err = ReplayTracker::from_reader(Cursor::new(recording), 0.7).unwrap_err();
    assert!(err.to_string().contains("line 2"), "{}", err);
}
