//! Gesture recognition: which key is under the fingertip, and whether a
//! pinch presses it.

mod engine;

pub use engine::{advance, hit_test, GestureConfig, GestureOutcome, GestureState, PixelPoint};
