//! Axis-aligned bounding boxes
//!
//! Every collision in the game is a box-vs-box overlap test. Boxes are never
//! stored; they are rebuilt from an entity's position and sprite footprint
//! whenever a test needs one.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Box of the given size centered on `center` (sprites are drawn centered)
    #[inline]
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap test. Boxes that only share an edge do not intersect.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// True if this box lies entirely within `bounds` (edges may touch)
    #[inline]
    pub fn is_inside(&self, bounds: &Aabb) -> bool {
        self.min.x >= bounds.min.x
            && self.min.y >= bounds.min.y
            && self.max.x <= bounds.max.x
            && self.max.y <= bounds.max.y
    }

    /// True if the point lies within the box (edges inclusive)
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

/// Free-function form of [`Aabb::intersects`]
#[inline]
pub fn intersects(a: &Aabb, b: &Aabb) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_overlapping_boxes_intersect() {
        let a = Aabb::centered(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::centered(Vec2::new(6.0, 6.0), Vec2::new(10.0, 10.0));
        assert!(a.intersects(&b));
        assert!(intersects(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_intersect() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_is_inside() {
        let field = Aabb::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        assert!(Aabb::centered(Vec2::new(50.0, 50.0), Vec2::new(20.0, 20.0)).is_inside(&field));
        assert!(!Aabb::centered(Vec2::new(5.0, 50.0), Vec2::new(20.0, 20.0)).is_inside(&field));
    }

    proptest! {
        #[test]
        fn prop_intersects_is_symmetric(
            ax in -500.0f32..500.0, ay in -500.0f32..500.0,
            bx in -500.0f32..500.0, by in -500.0f32..500.0,
            aw in 1.0f32..100.0, ah in 1.0f32..100.0,
            bw in 1.0f32..100.0, bh in 1.0f32..100.0,
        ) {
            let a = Aabb::centered(Vec2::new(ax, ay), Vec2::new(aw, ah));
            let b = Aabb::centered(Vec2::new(bx, by), Vec2::new(bw, bh));
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }

        #[test]
        fn prop_box_intersects_itself(x in -500.0f32..500.0, y in -500.0f32..500.0, w in 1.0f32..100.0) {
            let a = Aabb::centered(Vec2::new(x, y), Vec2::splat(w));
            prop_assert!(a.intersects(&a));
        }
    }
}
