//! Axis-aligned rectangle math in screen pixel space.

use serde::{Deserialize, Serialize};

/// Integer point in screen pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle `(x, y, width, height)` in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> i64 {
        (self.width.max(0) as i64) * (self.height.max(0) as i64)
    }

    /// Center point, integer truncation of `x + w/2`, `y + h/2`.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn intersects(&self, other: &Rect) -> bool {
        self.intersection(other).is_some()
    }

    /// Overlapping region of two rectangles, `None` when disjoint.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = self.x.max(other.x);
        let top = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        if right <= left || bottom <= top {
            return None;
        }
        Some(Rect::new(left, top, right - left, bottom - top))
    }

    /// Intersection over Union. Zero for disjoint rectangles and for a
    /// degenerate union (both rectangles with zero area).
    pub fn iou(&self, other: &Rect) -> f64 {
        let intersection = match self.intersection(other) {
            Some(overlap) => overlap.area(),
            None => return 0.0,
        };
        let union = self.area() + other.area() - intersection;
        if union <= 0 {
            return 0.0;
        }
        intersection as f64 / union as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_area_and_center() {
        let rect = Rect::new(10, 10, 40, 20);
        assert_eq!(rect.area(), 800);
        assert_eq!(rect.center(), Point::new(30, 20));
    }

    #[test]
    fn test_center_truncates() {
        let rect = Rect::new(0, 0, 5, 5);
        assert_eq!(rect.center(), Point::new(2, 2));
    }

    #[test]
    fn test_iou_identity() {
        let rect = Rect::new(10, 10, 40, 20);
        assert!((rect.iou(&rect) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_iou_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(100, 100, 10, 10);
        assert_eq!(a.iou(&b), 0.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_iou_symmetric() {
        let a = Rect::new(10, 10, 40, 20);
        let b = Rect::new(12, 12, 38, 18);
        assert!((a.iou(&b) - b.iou(&a)).abs() < 1e-12);
        assert!(a.iou(&b) > 0.8);
    }

    #[test]
    fn test_iou_degenerate_union() {
        let a = Rect::new(0, 0, 0, 0);
        let b = Rect::new(0, 0, 0, 0);
        assert_eq!(a.iou(&b), 0.0);
    }

    #[test]
    fn test_intersection_touching_edges_is_disjoint() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(10, 0, 10, 10);
        assert!(a.intersection(&b).is_none());
    }
}
