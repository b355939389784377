//! Sub-rectangle extraction.

use super::{RasterBuffer, CHANNELS};
use crate::error::EditError;
use crate::geometry::Rectangle;

/// Copy the pixels inside `region` into a new buffer.
///
/// The output is exactly `region.width() x region.height()` and pixel
/// `(0, 0)` of the output is pixel `(x1, y1)` of the source.
///
/// # Errors
///
/// Returns [`EditError::OutOfBounds`] if the region reaches past the source
/// dimensions or has swapped corners. Regions produced by the geometry
/// engine never do.
pub fn extract(source: &RasterBuffer, region: &Rectangle) -> Result<RasterBuffer, EditError> {
    if !Rectangle::from_size(source.width(), source.height()).contains_rect(region) {
        return Err(EditError::OutOfBounds {
            x1: region.x1,
            y1: region.y1,
            x2: region.x2,
            y2: region.y2,
            width: source.width(),
            height: source.height(),
        });
    }

    let out_width = region.width();
    let out_height = region.height();
    let row_bytes = out_width as usize * CHANNELS;
    let mut output = Vec::with_capacity(row_bytes * out_height as usize);

    // Copy pixel data row by row
    for y in region.y1..region.y2 {
        let start = source.index(region.x1, y);
        output.extend_from_slice(&source.pixels()[start..start + row_bytes]);
    }

    Ok(RasterBuffer::new(out_width, out_height, output))
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
        /// Property: Output dimensions equal the region and pixels map 1:1.
        #[test]
        fn prop_extract_is_pixel_exact(
            (w, h) in (1u32..=60, 1u32..=60),
            (ax, ay, bx, by) in (0u32..=60, 0u32..=60, 0u32..=60, 0u32..=60),
        ) {
            let rect = Rectangle::new(ax.min(w), ay.min(h), bx.min(w), by.min(h));
            let img = gradient(w, h);
            let result = extract(&img, &rect).unwrap();

            prop_assert_eq!(result.width(), rect.width());
            prop_assert_eq!(result.height(), rect.height());
            for y in 0..result.height() {
                for x in 0..result.width() {
                    prop_assert_eq!(result.pixel(x, y), img.pixel(rect.x1 + x, rect.y1 + y));
                }
            }
        }
    }
}
