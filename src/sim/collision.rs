//! Axis-aligned rectangle overlap
//!
//! Every contact in Sky Angel (bird strike, parachute catch, star catch)
//! goes through the same strict overlap test.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box: top-left corner plus extent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Bounds {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap: shared edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Bounds) -> bool {
        rects_overlap(self, other)
    }
}

/// Check whether two rectangles overlap on both axes.
///
/// All four comparisons are strict, so rectangles that only touch along an
/// edge or a corner are reported as separate.
#[inline]
pub fn rects_overlap(a: &Bounds, b: &Bounds) -> bool {
    a.left() < b.right() && a.right() > b.left() && a.top() < b.bottom() && a.bottom() > b.top()
}
