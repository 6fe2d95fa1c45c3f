//! Screen-space geometry.
//!
//! Layer positions live in signed screen coordinates since a drag can move
//! a layer past the left or top edge. Sizes are always pixel counts.

use serde::{Deserialize, Serialize};

/// A point in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component-wise difference `self - other`, saturating at the `i32` bounds.
    pub fn offset_from(self, other: Point) -> Point {
        Point::new(self.x.saturating_sub(other.x), self.y.saturating_sub(other.y))
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn from_origin(origin: Point, size: SizePx) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }

    /// Smallest rectangle containing every input rectangle.
    ///
    /// Returns `None` for an empty iterator.
    pub fn bounding<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        let mut iter = rects.into_iter();
        let first = iter.next()?;

        let (mut min_x, mut min_y) = (first.x as i64, first.y as i64);
        let (mut max_x, mut max_y) = (first.right(), first.bottom());
        for rect in iter {
            min_x = min_x.min(rect.x as i64);
            min_y = min_y.min(rect.y as i64);
            max_x = max_x.max(rect.right());
            max_y = max_y.max(rect.bottom());
        }

        Some(Rect::new(
            min_x as i32,
            min_y as i32,
            (max_x - min_x) as u32,
            (max_y - min_y) as u32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let rect = Rect::new(10, -20, 100, 200);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 180);
        assert_eq!(rect.origin(), Point::new(10, -20));
        assert_eq!(rect.size(), SizePx::new(100, 200));
    }

    #[test]
    fn bounding_box_of_overlapping_rects() {
        let bbox = Rect::bounding([Rect::new(0, 0, 50, 50), Rect::new(10, 10, 50, 50)]).unwrap();
        assert_eq!(bbox, Rect::new(0, 0, 60, 60));
    }

    #[test]
    fn bounding_box_with_negative_origin() {
        let bbox = Rect::bounding([Rect::new(-5, 3, 10, 10), Rect::new(20, -7, 5, 5)]).unwrap();
        assert_eq!(bbox, Rect::new(-5, -7, 30, 20));
    }

    #[test]
    fn bounding_box_of_nothing() {
        assert!(Rect::bounding(std::iter::empty()).is_none());
    }

    #[test]
    fn point_offset() {
        assert_eq!(Point::new(30, 40).offset_from(Point::new(10, 15)), Point::new(20, 25));
    }

    #[test]
    fn point_offset_saturates() {
        let far = Point::new(i32::MIN, i32::MAX);
        assert_eq!(far.offset_from(Point::new(1, -1)), Point::new(i32::MIN, i32::MAX));
    }
}
