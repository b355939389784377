//! Crop geometry: turning two raw pointer positions into a crop region.
//!
//! The engine is pure. Given the same policy, pointer positions and bounds it
//! always returns the same region, and it never touches pixel data.
//!
//! # Coordinate System
//!
//! - Coordinates are integer pixels in the working buffer's space
//! - Origin is the top-left corner
//! - Rectangles are half-open: `x1..x2` by `y1..y2`

mod policy;
mod region;

pub use policy::CropPolicy;
pub use region::{derive_region, Mask, Region};

use serde::{Deserialize, Serialize};

/// A raw pointer position. May lie outside the image until clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle with `x1 <= x2` and `y1 <= y2`.
///
/// A rectangle with zero width or height is invalid and is never committed
/// as a crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rectangle {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl Rectangle {
    /// Create a rectangle from two corners in any order.
    pub fn new(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Rectangle covering a whole `width x height` buffer.
    pub fn from_size(width: u32, height: u32) -> Self {
        Self {
            x1: 0,
            y1: 0,
            x2: width,
            y2: height,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.x2.saturating_sub(self.x1)
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.y2.saturating_sub(self.y1)
    }

    /// True when both dimensions are non-zero.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }

    /// True when the corners are ordered (`x1 <= x2`, `y1 <= y2`).
    #[inline]
    pub fn is_normalized(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// True when `other` is normalized and lies entirely inside this
    /// rectangle.
    pub fn contains_rect(&self, other: &Rectangle) -> bool {
        other.is_normalized()
            && other.x1 >= self.x1
            && other.y1 >= self.y1
            && other.x2 <= self.x2
            && other.y2 <= self.y2
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_normalizes_corners() {
        let rect = Rectangle::new(90, 80, 10, 20);
        assert_eq!(rect, Rectangle::new(10, 20, 90, 80));
        assert_eq!(rect.width(), 80);
        assert_eq!(rect.height(), 60);
    }

    #[test]
    fn test_rectangle_validity() {
        assert!(Rectangle::new(0, 0, 1, 1).is_valid());
        assert!(!Rectangle::new(5, 0, 5, 10).is_valid());
        assert!(!Rectangle::new(0, 5, 10, 5).is_valid());
    }

    #[test]
    fn test_swapped_corners_not_contained() {
        let swapped = Rectangle {
            x1: 5,
            y1: 0,
            x2: 3,
            y2: 4,
        };
        assert!(!swapped.is_normalized());
        assert_eq!(swapped.width(), 0);
        assert!(!swapped.is_valid());
        assert!(!Rectangle::from_size(10, 10).contains_rect(&swapped));
    }

    #[test]
    fn test_contains_rect() {
        let bounds = Rectangle::from_size(100, 50);
        assert!(bounds.contains_rect(&Rectangle::new(0, 0, 100, 50)));
        assert!(bounds.contains_rect(&Rectangle::new(10, 10, 20, 20)));
        assert!(!bounds.contains_rect(&Rectangle::new(90, 0, 101, 10)));
        assert!(!bounds.contains_rect(&Rectangle::new(0, 40, 10, 51)));
    }
}
