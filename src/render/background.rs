//! Camera image as a colored ASCII background.
//!
//! Each cell averages the RGB pixels it covers, picks a density character
//! from the cell's BT.601 luminance and keeps the average as the foreground
//! color.

use super::canvas::{Canvas, Cell};
use super::Rgb;
use crate::camera::Frame;

/// Standard ASCII density ramp, darkest to brightest.
pub const STANDARD_CHARSET: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Unicode shade blocks, darkest to brightest.
pub const BLOCKS_CHARSET: &[char] = &[' ', '░', '▒', '▓', '█'];

/// Four levels for a quieter background.
pub const MINIMAL_CHARSET: &[char] = &[' ', '.', ':', '#'];

/// Character ramp used for the camera background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSet {
    #[default]
    Standard,
    Blocks,
    Minimal,
    /// No camera image, keys only
    Off,
}

impl CharSet {
    pub fn chars(&self) -> &'static [char] {
        match self {
            CharSet::Standard => STANDARD_CHARSET,
            CharSet::Blocks => BLOCKS_CHARSET,
            CharSet::Minimal => MINIMAL_CHARSET,
            CharSet::Off => &[],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CharSet::Standard => "standard",
            CharSet::Blocks => "blocks",
            CharSet::Minimal => "minimal",
            CharSet::Off => "off",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "standard" => Some(CharSet::Standard),
            "blocks" => Some(CharSet::Blocks),
            "minimal" => Some(CharSet::Minimal),
            "off" | "none" => Some(CharSet::Off),
            _ => None,
        }
    }
}

/// ITU-R BT.601 luminance with integer math (coefficients scaled by 1000).
#[inline]
fn luminance(r: u32, g: u32, b: u32) -> u32 {
    (299 * r + 587 * g + 114 * b) / 1000
}

/// Paint `frame` into the top `rows` rows of `canvas`.
///
/// Rows below `rows` are left untouched. Nothing is painted for an empty
/// frame or an empty charset.
pub fn paint_background(canvas: &mut Canvas, frame: &Frame, rows: u16, charset: CharSet) {
    let chars = charset.chars();
    let cols = canvas.width();
    let rows = rows.min(canvas.height());
    let bpp = frame.bytes_per_pixel();
    if chars.is_empty() || cols == 0 || rows == 0 || frame.width == 0 || frame.height == 0 {
        return;
    }
    if frame.data.len() < frame.width as usize * frame.height as usize * bpp {
        log::warn!("Frame buffer shorter than {}x{}", frame.width, frame.height);
        return;
    }

    let cell_w = frame.width as f32 / cols as f32;
    let cell_h = frame.height as f32 / rows as f32;
    // Large cells are sampled sparsely; four samples per axis is plenty
    let step_x = ((cell_w / 4.0) as usize).max(1);
    let step_y = ((cell_h / 4.0) as usize).max(1);
    let levels = chars.len();

    for cy in 0..rows {
        let start_y = (cy as f32 * cell_h) as usize;
        let end_y = (((cy + 1) as f32 * cell_h) as usize).min(frame.height as usize);
        for cx in 0..cols {
            let start_x = (cx as f32 * cell_w) as usize;
            let end_x = (((cx + 1) as f32 * cell_w) as usize).min(frame.width as usize);

            let (mut sr, mut sg, mut sb, mut count) = (0u32, 0u32, 0u32, 0u32);
            for py in (start_y..end_y).step_by(step_y) {
                let row = py * frame.width as usize;
                for px in (start_x..end_x).step_by(step_x) {
                    let idx = (row + px) * bpp;
                    sr += frame.data[idx] as u32;
                    sg += frame.data[idx + 1] as u32;
                    sb += frame.data[idx + 2] as u32;
                    count += 1;
                }
            }
            if count == 0 {
                continue;
            }

            let (r, g, b) = (sr / count, sg / count, sb / count);
            let idx = luminance(r, g, b) as usize * (levels - 1) / 255;
            canvas.set(
                cx,
                cy,
                Cell {
                    ch: chars[idx],
                    fg: Some(Rgb(r as u8, g as u8, b as u8)),
                    bg: None,
                },
            );
        }
    }
}
