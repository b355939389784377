//! Mask application for shaped crops.

use super::{RasterBuffer, CHANNELS};
use crate::error::EditError;
use crate::geometry::Mask;

/// Value written to pixels outside the mask.
pub const EMPTY_PIXEL: [u8; 3] = [0, 0, 0];

/// Keep source pixels where `mask` is set and write [`EMPTY_PIXEL`]
/// everywhere else. Output dimensions equal the source's.
///
/// # Errors
///
/// Returns [`EditError::OutOfBounds`] if the mask and source sizes differ.
pub fn apply_mask(source: &RasterBuffer, mask: &Mask) -> Result<RasterBuffer, EditError> {
    if mask.width() != source.width() || mask.height() != source.height() {
        return Err(EditError::OutOfBounds {
            x1: 0,
            y1: 0,
            x2: mask.width(),
            y2: mask.height(),
            width: source.width(),
            height: source.height(),
        });
    }

    let width = source.width();
    let mut output = Vec::with_capacity(source.pixels().len());

    for (idx, chunk) in source.pixels().chunks_exact(CHANNELS).enumerate() {
        let x = (idx as u32) % width;
        let y = (idx as u32) / width;
        if mask.is_set(x, y) {
            output.extend_from_slice(chunk);
        } else {
            output.extend_from_slice(&EMPTY_PIXEL);
        }
    }

    Ok(RasterBuffer::new(source.width(), source.height(), output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::geometry::Rectangle;
    use crate::raster::test_support::gradient;
    use proptest::prelude::*;

    proptest! {
        /// Property: Inside pixels are unchanged, outside pixels are empty.
        #[test]
        fn prop_mask_keeps_inside_only(
            (w, h) in (1u32..=40, 1u32..=40),
        ) {
            let img = gradient(w, h);
            let mask = Mask::circle(&Rectangle::from_size(w, h));
            let result = apply_mask(&img, &mask).unwrap();

            for y in 0..h {
                for x in 0..w {
                    if mask.is_set(x, y) {
                        prop_assert_eq!(result.pixel(x, y), img.pixel(x, y));
                    } else {
                        prop_assert_eq!(result.pixel(x, y), EMPTY_PIXEL);
                    }
                }
            }
        }
    }
}
