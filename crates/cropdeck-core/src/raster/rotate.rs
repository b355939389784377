//! Lossless quarter-turn rotation.

use super::{RasterBuffer, CHANNELS};

/// Rotate a buffer 90 degrees clockwise.
///
/// This is an exact pixel permutation: width and height swap and no
/// interpolation takes place. Source pixel `(x, y)` lands at
/// `(height - 1 - y, x)`.
pub fn rotate90(source: &RasterBuffer) -> RasterBuffer {
    let (src_w, src_h) = (source.width(), source.height());
    let (dst_w, dst_h) = (src_h, src_w);
    let mut output = Vec::with_capacity(source.pixels().len());

    for dst_y in 0..dst_h {
        for dst_x in 0..dst_w {
            let idx = source.index(dst_y, src_h - 1 - dst_x);
            output.extend_from_slice(&source.pixels()[idx..idx + CHANNELS]);
        }
    }

    RasterBuffer::new(dst_w, dst_h, output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::test_support::gradient;

    #[test]
    fn test_rotate_swaps_dimensions() {
        let img = gradient(100, 50);
        let rotated = rotate90(&img);
        assert_eq!(rotated.width(), 50);
        assert_eq!(rotated.height(), 100);
    }

    #[test]
    fn test_rotate_clockwise() {
        // 2x1: red | green
        let img = RasterBuffer::new(2, 1, vec![255, 0, 0, 0, 255, 0]);
        let rotated = rotate90(&img);

        // Clockwise turns the left pixel into the top one
        assert_eq!((rotated.width(), rotated.height()), (1, 2));
        assert_eq!(rotated.pixel(0, 0), [255, 0, 0]);
        assert_eq!(rotated.pixel(0, 1), [0, 255, 0]);
    }

    #[test]
    fn test_rotate_corner_mapping() {
        let img = gradient(4, 3);
        let rotated = rotate90(&img);

        // Top-left goes to top-right, bottom-left to top-left
        assert_eq!(rotated.pixel(2, 0), img.pixel(0, 0));
        assert_eq!(rotated.pixel(0, 0), img.pixel(0, 2));
        assert_eq!(rotated.pixel(0, 3), img.pixel(3, 2));
    }

    #[test]
    fn test_rotate_single_pixel() {
        let img = RasterBuffer::filled(1, 1, [7, 8, 9]);
        assert_eq!(rotate90(&img), img);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::raster::test_support::gradient;
    use proptest::prelude::*;

    proptest! {
        /// Property: Four quarter turns restore the original exactly.
        #[test]
        fn prop_four_rotations_identity(
            (w, h) in (1u32..=50, 1u32..=50),
        ) {
            let img = gradient(w, h);
            let result = rotate90(&rotate90(&rotate90(&rotate90(&img))));
            prop_assert_eq!(result, img);
        }

        /// Property: Rotation permutes pixels without changing the pixel count.
        #[test]
        fn prop_rotation_preserves_pixel_count(
            (w, h) in (1u32..=50, 1u32..=50),
        ) {
            let img = gradient(w, h);
            let rotated = rotate90(&img);
            prop_assert_eq!(rotated.pixels().len(), img.pixels().len());
        }
    }
}
