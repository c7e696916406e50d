//! pinch-keys library crate.
//!
//! A virtual keyboard drawn over the webcam image. The index fingertip
//! hovers keys, and pinching thumb and index finger types the hovered key.
//!
//! - [`camera`] captures frames, [`tracker`] finds hand landmarks in them
//! - [`session`] runs the [`gesture`] rules over a [`keyboard`] layout
//! - [`driver`] ties the loop together; [`injector`] sends keystrokes and
//!   [`terminal`] shows the [`render`]ed overlay

pub mod camera;
pub mod cli;
pub mod config;
pub mod driver;
pub mod gesture;
pub mod injector;
pub mod keyboard;
pub mod render;
pub mod session;
pub mod terminal;
pub mod tracker;
