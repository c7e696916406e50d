//! Virtual keyboard layout model.
//!
//! The keyboard is a static list of [`Key`] rectangles in capture-frame
//! pixel space, generated once at startup from a grid of key tokens via
//! [`build_layout`].

mod layout;

pub use layout::{build_layout, default_rows, Bounds, Key, KeyGeometry, Keyboard};
