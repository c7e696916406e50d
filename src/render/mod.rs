//! Keyboard overlay rendering into a terminal cell canvas.
//!
//! Rendering happens in two steps:
//! 1. The session produces a list of [`DrawCommand`]s in capture-pixel space
//! 2. [`Renderer::compose`] paints the camera image as a colored ASCII
//!    background and then the commands onto a [`Canvas`], scaled through a
//!    [`Viewport`]
//!
//! [`Canvas::to_ansi`] turns the result into an escape sequence stream.

mod background;
mod canvas;
mod compose;
mod viewport;

use serde::{Deserialize, Serialize};

use crate::gesture::PixelPoint;

pub use background::{paint_background, CharSet};
pub use canvas::{Canvas, Cell};
pub use compose::Renderer;
pub use viewport::{CellRect, Viewport};

/// 24-bit RGB color. Serialized as `[r, g, b]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors used for the overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub key: Rgb,
    pub key_hover: Rgb,
    pub key_text: Rgb,
    pub cursor: Rgb,
    pub cursor_click: Rgb,
    pub landmarks: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            key: Rgb(0, 50, 100),
            key_hover: Rgb(0, 100, 150),
            key_text: Rgb(255, 255, 255),
            cursor: Rgb(0, 255, 0),
            cursor_click: Rgb(255, 0, 0),
            landmarks: Rgb(255, 255, 0),
        }
    }
}

/// One drawing operation, in capture-frame pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A key rectangle with its display label
    Key {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        label: String,
        hovered: bool,
    },
    /// Hand landmark positions
    Landmarks(Vec<PixelPoint>),
    /// The fingertip cursor; `clicked` when a key fired this frame
    Cursor { at: PixelPoint, clicked: bool },
    /// Text for the status line
    Status(String),
}
