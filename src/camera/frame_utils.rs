//! Conversion from nokhwa buffers and in-place frame transforms.

use nokhwa::pixel_format::RgbFormat;
use std::time::Instant;

use super::types::{Frame, FrameFormat};

/// Decode a nokhwa buffer (MJPEG, YUYV, NV12, ...) into an RGB [`Frame`].
///
/// Returns `None` for unsupported formats or corrupt data.
pub fn convert_to_rgb(buffer: &nokhwa::Buffer) -> Option<Frame> {
    let decoded = buffer.decode_image::<RgbFormat>().ok()?;
    let (width, height) = decoded.dimensions();

    Some(Frame {
        data: decoded.into_raw(),
        width,
        height,
        format: FrameFormat::Rgb,
        timestamp: Instant::now(),
    })
}

/// Flip a frame left-right so the preview behaves like a mirror.
///
/// Landmarks are detected on the mirrored image, so moving the hand right
/// moves the cursor right.
pub fn mirror_horizontal(frame: &mut Frame) {
    let bpp = frame.bytes_per_pixel();
    let row_len = frame.width as usize * bpp;
    if row_len == 0 {
        return;
    }

    for row in frame.data.chunks_exact_mut(row_len) {
        // Reversing bytes reverses pixel order and each pixel's channels;
        // reversing each pixel again restores channel order.
        row.reverse();
        for pixel in row.chunks_exact_mut(bpp) {
            pixel.reverse();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(data: Vec<u8>, width: u32, height: u32) -> Frame {
        Frame {
            data,
            width,
            height,
            format: FrameFormat::Rgb,
            timestamp: Instant::now(),
        }
    }

    #[test]
    fn test_mirror_swaps_pixels_keeps_channels() {
        let mut f = frame(vec![1, 2, 3, 4, 5, 6], 2, 1);
        mirror_horizontal(&mut f);
        assert_eq!(f.data, vec![4, 5, 6, 1, 2, 3]);
    }

    #[test]
    fn test_mirror_each_row_independently() {
        let mut f = frame(
            vec![
                1, 1, 1, 2, 2, 2, 3, 3, 3, //
                4, 4, 4, 5, 5, 5, 6, 6, 6,
            ],
            3,
            2,
        );
        mirror_horizontal(&mut f);
        assert_eq!(
            f.data,
            vec![
                3, 3, 3, 2, 2, 2, 1, 1, 1, //
                6, 6, 6, 5, 5, 5, 4, 4, 4,
            ]
        );
    }

    #[test]
    fn test_mirror_twice_is_identity() {
        let original: Vec<u8> = (0..36).collect();
        let mut f = frame(original.clone(), 4, 3);
        mirror_horizontal(&mut f);
        mirror_horizontal(&mut f);
        assert_eq!(f.data, original);
    }

    #[test]
    fn test_mirror_empty_frame() {
        let mut f = frame(Vec::new(), 0, 0);
        mirror_horizontal(&mut f);
        assert!(f.data.is_empty());
    }
}
