//! Percentage-based resampling.
//!
//! Provides scaling using the `image` crate's algorithms. The input is never
//! modified and 100% is an exact identity copy.

use super::{FilterType, RasterBuffer};
use crate::error::EditError;

/// Smallest accepted scale, in percent.
pub const MIN_SCALE_PERCENT: u32 = 10;

/// Largest accepted scale, in percent.
pub const MAX_SCALE_PERCENT: u32 = 200;

/// Dimensions of a `width x height` buffer scaled by `scale_percent`,
/// rounded down.
pub fn scaled_dimensions(width: u32, height: u32, scale_percent: u32) -> (u32, u32) {
    let scale = |v: u32| (v as u64 * scale_percent as u64 / 100) as u32;
    (scale(width), scale(height))
}

/// Resize a buffer to `scale_percent` of its size.
///
/// # Arguments
///
/// * `source` - The buffer to resize
/// * `scale_percent` - Target scale, 10 to 200
/// * `filter` - Interpolation filter to use
///
/// # Errors
///
/// Returns [`EditError::InvalidScale`] if the scale is out of range or a
/// scaled dimension rounds down to zero.
pub fn resize(
    source: &RasterBuffer,
    scale_percent: u32,
    filter: FilterType,
) -> Result<RasterBuffer, EditError> {
    if !(MIN_SCALE_PERCENT..=MAX_SCALE_PERCENT).contains(&scale_percent) {
        return Err(EditError::InvalidScale(scale_percent));
    }

    let (width, height) = scaled_dimensions(source.width(), source.height(), scale_percent);
    if width == 0 || height == 0 {
        return Err(EditError::InvalidScale(scale_percent));
    }

    // Fast path: if dimensions match, just clone
    if width == source.width() && height == source.height() {
        return Ok(source.clone());
    }

    let view = source
        .as_view()
        .ok_or(EditError::InvalidScale(scale_percent))?;
    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(RasterBuffer::from_rgb_image(resized))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::test_support::gradient;

    #[test]
    fn test_resize_half() {
        let img = gradient(100, 50);
        let resized = resize(&img, 50, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width(), 50);
        assert_eq!(resized.height(), 25);
        assert_eq!(resized.pixels().len(), 50 * 25 * 3);
    }

    #[test]
    fn test_resize_floors_dimensions() {
        let img = gradient(33, 17);
        let resized = resize(&img, 150, FilterType::Bilinear).unwrap();
        // 33 * 1.5 = 49.5, 17 * 1.5 = 25.5
        assert_eq!((resized.width(), resized.height()), (49, 25));
    }

    #[test]
    fn test_resize_upscale() {
        let img = gradient(50, 25);
        let resized = resize(&img, 200, FilterType::Lanczos3).unwrap();
        assert_eq!((resized.width(), resized.height()), (100, 50));
    }

    #[test]
    fn test_resize_identity() {
        let img = gradient(64, 48);
        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            assert_eq!(resize(&img, 100, filter).unwrap(), img);
        }
    }

    #[test]
    fn test_resize_out_of_range() {
        let img = gradient(100, 100);
        assert_eq!(
            resize(&img, 9, FilterType::Bilinear),
            Err(EditError::InvalidScale(9))
        );
        assert_eq!(
            resize(&img, 201, FilterType::Bilinear),
            Err(EditError::InvalidScale(201))
        );
    }

    #[test]
    fn test_resize_collapses_to_zero() {
        let img = gradient(5, 100);
        // 5 * 10 / 100 = 0
        assert_eq!(
            resize(&img, 10, FilterType::Bilinear),
            Err(EditError::InvalidScale(10))
        );
    }

    #[test]
    fn test_scaled_dimensions() {
        assert_eq!(scaled_dimensions(100, 80, 10), (10, 8));
        assert_eq!(scaled_dimensions(7, 3, 200), (14, 6));
        assert_eq!(scaled_dimensions(9, 9, 15), (1, 1));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
