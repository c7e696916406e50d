//! Paint draw commands over the camera background.

use super::background::{paint_background, CharSet};
use super::canvas::Canvas;
use super::viewport::Viewport;
use super::{DrawCommand, Palette, Rgb};
use crate::camera::Frame;

const CURSOR_GLYPH: char = '●';
const LANDMARK_GLYPH: char = '•';

/// Turns a frame plus draw commands into canvas cells.
#[derive(Debug, Clone)]
pub struct Renderer {
    palette: Palette,
    charset: CharSet,
    /// Capture resolution the draw commands are expressed in
    frame_width: u32,
    frame_height: u32,
}

impl Renderer {
    pub fn new(palette: Palette, charset: CharSet, frame_width: u32, frame_height: u32) -> Self {
        Self {
            palette,
            charset,
            frame_width,
            frame_height,
        }
    }

    /// Capture resolution of the frames being drawn.
    pub fn set_frame_size(&mut self, width: u32, height: u32) {
        self.frame_width = width;
        self.frame_height = height;
    }

    /// Repaint `canvas` from scratch.
    ///
    /// With a status command the last row is reserved for it and the image
    /// area shrinks by one row.
    pub fn compose(&self, canvas: &mut Canvas, frame: Option<&Frame>, commands: &[DrawCommand]) {
        canvas.clear();

        let has_status = commands.iter().any(|c| matches!(c, DrawCommand::Status(_)));
        let image_rows = if has_status {
            canvas.height().saturating_sub(1)
        } else {
            canvas.height()
        };
        let viewport = Viewport::new(self.frame_width, self.frame_height, canvas.width(), image_rows);

        if let Some(frame) = frame {
            paint_background(canvas, frame, image_rows, self.charset);
        }

        for command in commands {
            match command {
                DrawCommand::Key {
                    x,
                    y,
                    width,
                    height,
                    label,
                    hovered,
                } => {
                    let bg = if *hovered {
                        self.palette.key_hover
                    } else {
                        self.palette.key
                    };
                    self.draw_key(canvas, &viewport, (*x, *y, *width, *height), label, bg);
                }
                DrawCommand::Landmarks(points) => {
                    for p in points {
                        if let Some((cx, cy)) = viewport.cell_of(p.x, p.y) {
                            canvas.put_char(cx, cy, LANDMARK_GLYPH, self.palette.landmarks);
                        }
                    }
                }
                DrawCommand::Cursor { at, clicked } => {
                    let color = if *clicked {
                        self.palette.cursor_click
                    } else {
                        self.palette.cursor
                    };
                    if let Some((cx, cy)) = viewport.cell_of(at.x, at.y) {
                        canvas.put_char(cx, cy, CURSOR_GLYPH, color);
                    }
                }
                DrawCommand::Status(text) => {
                    if let Some(row) = canvas.height().checked_sub(1) {
                        canvas.fill_rect(0, row, canvas.width(), row + 1, self.palette.key);
                        canvas.put_text(0, row, text, self.palette.key_text);
                    }
                }
            }
        }
    }

    fn draw_key(
        &self,
        canvas: &mut Canvas,
        viewport: &Viewport,
        (x, y, width, height): (i32, i32, i32, i32),
        label: &str,
        bg: Rgb,
    ) {
        let Some(rect) = viewport.rect(x, y, width, height) else {
            return;
        };
        canvas.fill_rect(rect.x0, rect.y0, rect.x1, rect.y1, bg);

        let text: String = label.chars().take(rect.width() as usize).collect();
        let len = text.chars().count() as u16;
        let tx = rect.x0 + (rect.width() - len) / 2;
        let ty = rect.y0 + rect.height().saturating_sub(1) / 2;
        canvas.put_text(tx, ty, &text, self.palette.key_text);
    }
}
