//! Region derivation from a completed or in-progress drag.
//!
//! # Algorithm
//!
//! 1. Clamp both pointer positions into `[x1, x2) x [y1, y2)` of the bounds
//! 2. Normalize them into a rectangle, rejecting zero width or height
//! 3. Apply the policy rule:
//!    - Freeform keeps the rectangle
//!    - Square keeps the top-left corner, side = shorter edge
//!    - Fixed ratios keep the width and derive the height, truncated at the
//!      bottom edge of the bounds
//!    - Circle keeps the rectangle and adds a filled-circle mask

use super::{CropPolicy, Point, Rectangle};
use crate::error::EditError;

/// Per-pixel keep/discard mask in the coordinate frame of its region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mask {
    width: u32,
    height: u32,
    bits: Vec<bool>,
}

impl Mask {
    /// Filled circle inscribed in `rect`, rasterized in the rectangle's own
    /// frame.
    ///
    /// The radius is half the shorter edge (rounded down) and the center is
    /// the rectangle's integer midpoint, so the circle hugs the top-left on
    /// odd-sized boxes.
    pub fn circle(rect: &Rectangle) -> Self {
        let width = rect.width();
        let height = rect.height();
        let radius = (width.min(height) / 2) as i64;
        let cx = ((rect.x1 as i64 + rect.x2 as i64) / 2) - rect.x1 as i64;
        let cy = ((rect.y1 as i64 + rect.y2 as i64) / 2) - rect.y1 as i64;
        let r_sq = radius * radius;

        let mut bits = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height as i64 {
            let dy = y - cy;
            for x in 0..width as i64 {
                let dx = x - cx;
                bits.push(dx * dx + dy * dy <= r_sq);
            }
        }

        Self {
            width,
            height,
            bits,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the pixel at `(x, y)` is kept. Out-of-range positions are not.
    #[inline]
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        self.bits[(y as usize) * (self.width as usize) + x as usize]
    }

    /// Number of kept pixels.
    pub fn count(&self) -> usize {
        self.bits.iter().filter(|b| **b).count()
    }
}

/// A definitive crop: the rectangle to extract and, for circular crops, the
/// mask to apply to the extracted pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub rect: Rectangle,
    pub mask: Option<Mask>,
}

impl Region {
    fn rect(rect: Rectangle) -> Self {
        Self { rect, mask: None }
    }
}

/// Derive the crop region for a drag from `start` to `end` under `policy`.
///
/// # Errors
///
/// Returns [`EditError::InvalidRegion`] when the clamped rectangle, or the
/// height derived by a fixed-ratio policy, is zero.
///
/// # Example
///
/// ```
/// use cropdeck_core::geometry::{derive_region, CropPolicy, Point, Rectangle};
///
/// let bounds = Rectangle::from_size(100, 100);
/// let region = derive_region(
///     CropPolicy::Square,
///     Point::new(10, 10),
///     Point::new(90, 60),
///     bounds,
/// )
/// .unwrap();
/// assert_eq!(region.rect, Rectangle::new(10, 10, 60, 60));
/// ```
pub fn derive_region(
    policy: CropPolicy,
    start: Point,
    end: Point,
    bounds: Rectangle,
) -> Result<Region, EditError> {
    if !bounds.is_valid() {
        return Err(EditError::InvalidRegion);
    }

    let rect = Rectangle::new(
        clamp_axis(start.x, bounds.x1, bounds.x2),
        clamp_axis(start.y, bounds.y1, bounds.y2),
        clamp_axis(end.x, bounds.x1, bounds.x2),
        clamp_axis(end.y, bounds.y1, bounds.y2),
    );

    if !rect.is_valid() {
        return Err(EditError::InvalidRegion);
    }

    match policy {
        CropPolicy::Freeform => Ok(Region::rect(rect)),
        CropPolicy::Square => {
            let size = rect.width().min(rect.height());
            Ok(Region::rect(Rectangle {
                x1: rect.x1,
                y1: rect.y1,
                x2: rect.x1 + size,
                y2: rect.y1 + size,
            }))
        }
        CropPolicy::Widescreen16x9 | CropPolicy::Classic4x3 => {
            let (num, den) = policy.height_ratio().unwrap_or((1, 1));
            let mut height = (rect.width() as u64 * num as u64 / den as u64) as u32;
            if rect.y1.saturating_add(height) > bounds.y2 {
                height = bounds.y2 - rect.y1;
            }
            if height == 0 {
                return Err(EditError::InvalidRegion);
            }
            Ok(Region::rect(Rectangle {
                x1: rect.x1,
                y1: rect.y1,
                x2: rect.x2,
                y2: rect.y1 + height,
            }))
        }
        CropPolicy::Circle => Ok(Region {
            rect,
            mask: Some(Mask::circle(&rect)),
        }),
    }
}

/// Clamp a raw coordinate into the half-open range `[lo, hi)`.
fn clamp_axis(value: i32, lo: u32, hi: u32) -> u32 {
    (value as i64).clamp(lo as i64, hi as i64 - 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> Rectangle {
        Rectangle::from_size(100, 100)
    }

    fn derive(policy: CropPolicy, start: (i32, i32), end: (i32, i32)) -> Result<Region, EditError> {
        derive_region(
            policy,
            Point::new(start.0, start.1),
            Point::new(end.0, end.1),
            bounds(),
        )
    }

    #[test]
    fn test_freeform_keeps_rectangle() {
        let region = derive(CropPolicy::Freeform, (10, 20), (60, 50)).unwrap();
        assert_eq!(region.rect, Rectangle::new(10, 20, 60, 50));
        assert!(region.mask.is_none());
    }

    #[test]
    fn test_reversed_drag_is_normalized() {
        let region = derive(CropPolicy::Freeform, (60, 50), (10, 20)).unwrap();
        assert_eq!(region.rect, Rectangle::new(10, 20, 60, 50));
    }

    #[test]
    fn test_degenerate_drag_rejected() {
        assert_eq!(
            derive(CropPolicy::Freeform, (40, 40), (40, 40)),
            Err(EditError::InvalidRegion)
        );
        assert_eq!(
            derive(CropPolicy::Freeform, (40, 10), (40, 90)),
            Err(EditError::InvalidRegion)
        );
        assert_eq!(
            derive(CropPolicy::Circle, (10, 40), (90, 40)),
            Err(EditError::InvalidRegion)
        );
    }

    #[test]
    fn test_drag_leaving_bounds_is_clamped() {
        let region = derive(CropPolicy::Freeform, (50, 50), (250, 300)).unwrap();
        assert_eq!(region.rect, Rectangle::new(50, 50, 99, 99));

        let region = derive(CropPolicy::Freeform, (-20, -5), (30, 40)).unwrap();
        assert_eq!(region.rect, Rectangle::new(0, 0, 30, 40));
    }

    #[test]
    fn test_drag_entirely_outside_collapses() {
        assert_eq!(
            derive(CropPolicy::Freeform, (150, 10), (200, 90)),
            Err(EditError::InvalidRegion)
        );
    }

    #[test]
    fn test_square_anchored_top_left() {
        let region = derive(CropPolicy::Square, (10, 10), (90, 90)).unwrap();
        assert_eq!(region.rect, Rectangle::new(10, 10, 90, 90));

        let region = derive(CropPolicy::Square, (80, 70), (20, 30)).unwrap();
        assert_eq!(region.rect, Rectangle::new(20, 30, 60, 70));
    }

    #[test]
    fn test_widescreen_derives_height() {
        let region = derive(CropPolicy::Widescreen16x9, (0, 0), (64, 90)).unwrap();
        assert_eq!(region.rect, Rectangle::new(0, 0, 64, 36));
    }

    #[test]
    fn test_widescreen_truncated_at_bottom() {
        let region = derive(CropPolicy::Widescreen16x9, (0, 80), (96, 95)).unwrap();
        // 96 * 9 / 16 = 54, clamped to 100 - 80 = 20
        assert_eq!(region.rect, Rectangle::new(0, 80, 96, 100));
    }

    #[test]
    fn test_widescreen_too_narrow() {
        assert_eq!(
            derive(CropPolicy::Widescreen16x9, (10, 10), (11, 50)),
            Err(EditError::InvalidRegion)
        );
    }

    #[test]
    fn test_classic_derives_height() {
        let region = derive(CropPolicy::Classic4x3, (10, 10), (50, 20)).unwrap();
        assert_eq!(region.rect, Rectangle::new(10, 10, 50, 40));
    }

    #[test]
    fn test_classic_floors_height() {
        // 10 * 3 / 4 = 7.5 -> 7
        let region = derive(CropPolicy::Classic4x3, (0, 0), (10, 10)).unwrap();
        assert_eq!(region.rect.height(), 7);
    }

    #[test]
    fn test_circle_mask_shape() {
        let region = derive(CropPolicy::Circle, (0, 0), (11, 11)).unwrap();
        let mask = region.mask.unwrap();
        assert_eq!((mask.width(), mask.height()), (11, 11));

        // Center and edge midpoints are inside, corners are not
        assert!(mask.is_set(5, 5));
        assert!(mask.is_set(0, 5));
        assert!(mask.is_set(10, 5));
        assert!(mask.is_set(5, 0));
        assert!(!mask.is_set(0, 0));
        assert!(!mask.is_set(10, 10));
        assert!(!mask.is_set(11, 5));
    }

    #[test]
    fn test_circle_on_wide_box() {
        let region = derive(CropPolicy::Circle, (0, 0), (40, 10)).unwrap();
        let mask = region.mask.unwrap();
        assert_eq!((mask.width(), mask.height()), (40, 10));
        assert!(mask.is_set(20, 5));
        assert!(!mask.is_set(2, 5));
        assert!(!mask.is_set(38, 5));
    }

    #[test]
    fn test_invalid_bounds() {
        let result = derive_region(
            CropPolicy::Freeform,
            Point::new(0, 0),
            Point::new(5, 5),
            Rectangle::from_size(0, 10),
        );
        assert_eq!(result, Err(EditError::InvalidRegion));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
