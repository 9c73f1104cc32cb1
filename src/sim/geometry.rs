//! Axis-aligned geometry helpers
//!
//! Everything on the table is a box: the ball, both paddles, the table
//! itself. Positions are top-left corners in pixels, y grows downward.

use glam::Vec2;

/// An axis-aligned box given by its top-left corner and size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Clamp `val` into `[min, max]`.
///
/// Unlike `f32::clamp` this never panics: when the range is inverted (a
/// table shorter than a paddle) `min` wins.
#[inline]
pub fn clamp(val: f32, min: f32, max: f32) -> f32 {
    min.max(max.min(val))
}
