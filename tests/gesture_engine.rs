//! Gesture rules exercised through the public API: hover, pinch threshold,
//! cooldown debounce, and replay determinism.

use pinch_keys::gesture::{advance, GestureConfig, GestureState};
use pinch_keys::keyboard::{Key, Keyboard};
use pinch_keys::session::Session;
use pinch_keys::tracker::{HandPose, Landmark};
use std::time::{Duration, Instant};

const FRAME: f32 = 2000.0;

fn config() -> GestureConfig {
    GestureConfig {
        frame_width: FRAME as u32,
        frame_height: FRAME as u32,
        click_distance_threshold: 30.0,
        click_cooldown: Duration::from_millis(500),
    }
}

fn key_a() -> Vec<Key> {
    vec![Key {
        label: "A".to_string(),
        x: 40,
        y: 40,
        width: 80,
        height: 80,
    }]
}

/// Pose with the index tip at `(x, y)` and the thumb `gap` pixels below it.
fn pose(x: f32, y: f32, gap: f32) -> HandPose {
    HandPose::from_tips(
        Landmark::new(x / FRAME, y / FRAME),
        Landmark::new(x / FRAME, (y + gap) / FRAME),
    )
}

#[test]
fn first_pinch_over_key_fires() {
    let (state, outcome) = advance(
        &GestureState::default(),
        Some(&pose(70.0, 70.0, 10.0)),
        &key_a(),
        Instant::now(),
        &config(),
    );
    assert_eq!(outcome.hovered.as_deref(), Some("A"));
    assert_eq!(outcome.activated.as_deref(), Some("A"));
    assert!(state.last_activation.is_some());
}

#[test]
fn second_pinch_within_cooldown_is_ignored() {
    let t0 = Instant::now();
    let keys = key_a();
    let (state, first) = advance(&GestureState::default(), Some(&pose(70.0, 70.0, 10.0)), &keys, t0, &config());
    assert!(first.activated.is_some());

    let (state, second) = advance(
        &state,
        Some(&pose(70.0, 70.0, 10.0)),
        &keys,
        t0 + Duration::from_millis(100),
        &config(),
    );
    assert_eq!(second.hovered.as_deref(), Some("A"));
    assert_eq!(second.activated, None);
    assert_eq!(state.last_activation, Some(t0));
}

#[test]
fn pinch_outside_keys_does_nothing() {
    let (state, outcome) = advance(
        &GestureState::default(),
        Some(&pose(1000.0, 1000.0, 10.0)),
        &key_a(),
        Instant::now(),
        &config(),
    );
    assert_eq!(outcome.hovered, None);
    assert_eq!(outcome.activated, None);
    assert!(outcome.hand_present());
    assert_eq!(state.last_activation, None);
}

#[test]
fn wide_pinch_over_key_does_nothing() {
    let (_, outcome) = advance(
        &GestureState::default(),
        Some(&pose(70.0, 70.0, 50.0)),
        &key_a(),
        Instant::now(),
        &config(),
    );
    assert_eq!(outcome.hovered.as_deref(), Some("A"));
    assert_eq!(outcome.activated, None);
}

#[test]
fn fingertip_half_a_pixel_past_the_edge_is_not_over_the_key() {
    // 40.5 px lands on pixel 40, the key's left edge
    let (_, outcome) = advance(
        &GestureState::default(),
        Some(&pose(40.5, 70.5, 10.0)),
        &key_a(),
        Instant::now(),
        &config(),
    );
    assert_eq!(outcome.hovered, None);
    assert_eq!(outcome.activated, None);

    let (_, outcome) = advance(
        &GestureState::default(),
        Some(&pose(41.5, 70.5, 10.0)),
        &key_a(),
        Instant::now(),
        &config(),
    );
    assert_eq!(outcome.activated.as_deref(), Some("A"));
}

#[test]
fn cooldown_must_strictly_elapse() {
    let t0 = Instant::now();
    let keys = key_a();
    let p = pose(70.0, 70.0, 10.0);
    let (state, _) = advance(&GestureState::default(), Some(&p), &keys, t0, &config());

    let (_, at_boundary) = advance(&state, Some(&p), &keys, t0 + Duration::from_millis(500), &config());
    assert_eq!(at_boundary.activated, None);

    let (_, after) = advance(&state, Some(&p), &keys, t0 + Duration::from_millis(501), &config());
    assert_eq!(after.activated.as_deref(), Some("A"));
}

#[test]
fn losing_the_hand_clears_hover_but_keeps_cooldown() {
    let t0 = Instant::now();
    let keys = key_a();
    let (state, _) = advance(&GestureState::default(), Some(&pose(70.0, 70.0, 10.0)), &keys, t0, &config());

    let (state, outcome) = advance(&state, None, &keys, t0 + Duration::from_millis(50), &config());
    assert!(!outcome.hand_present());
    assert_eq!(state.hovered, None);
    assert_eq!(state.last_activation, Some(t0));
}

#[test]
fn hover_follows_the_fingertip_across_the_default_layout() {
    let keyboard = Keyboard::default();
    let cfg = config();
    let mut state = GestureState::default();
    let now = Instant::now();

    // Every key's center hovers that key; widely open fingers never fire
    for key in keyboard.keys() {
        let cx = key.x as f32 + key.width as f32 / 2.0;
        let cy = key.y as f32 + key.height as f32 / 2.0;
        let (next, outcome) = advance(&state, Some(&pose(cx, cy, 200.0)), keyboard.keys(), now, &cfg);
        assert_eq!(outcome.hovered.as_deref(), Some(key.label.as_str()));
        assert_eq!(outcome.activated, None);
        state = next;
    }
}

#[test]
fn replaying_a_sequence_is_deterministic() {
    let t0 = Instant::now();
    let frames: Vec<(Option<HandPose>, Instant)> = (0..40u64)
        .map(|i| {
            let p = match i % 4 {
                0 => Some(pose(70.0, 70.0, 10.0)),
                1 => None,
                2 => Some(pose(150.0, 70.0, 5.0)),
                _ => Some(pose(70.0, 70.0, 80.0)),
            };
            (p, t0 + Duration::from_millis(i * 90))
        })
        .collect();

    let run = || {
        let mut session = Session::new(Keyboard::default(), config());
        frames
            .iter()
            .map(|(p, t)| session.advance(p.as_ref(), *t))
            .collect::<Vec<_>>()
    };

    let first = run();
    let second = run();
    assert_eq!(first, second);
    assert!(first.iter().any(|o| o.activated().is_some()));
}
