//! Axis-aligned rectangle geometry
//!
//! All entities use a top-left origin with y growing downward, matching
//! screen space. The visible area is `[0, width] x [0, height]`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Build a rectangle of `size` centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
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

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Non-empty overlap; rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Overlapping region, if any
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        if !self.intersects(other) {
            return None;
        }
        let min = self.pos.max(other.pos);
        let max = Vec2::new(self.right(), self.bottom()).min(Vec2::new(other.right(), other.bottom()));
        Some(Rect::new(min, max - min))
    }

    /// Shift `pos` so the rectangle lies within `[0, bounds.x] x [0, bounds.y]`
    ///
    /// Assumes the rectangle is no larger than the bounds.
    pub fn clamp_within(&mut self, bounds: Vec2) {
        self.pos = self.pos.max(Vec2::ZERO).min(bounds - self.size);
    }

    /// True when the rectangle lies wholly more than `margin` outside the visible area
    pub fn is_beyond(&self, bounds: Vec2, margin: f32) -> bool {
        self.right() < -margin
            || self.left() > bounds.x + margin
            || self.bottom() < -margin
            || self.top() > bounds.y + margin
    }

    /// True when the rectangle lies inside `[0, bounds.x] x [0, bounds.y]`
    pub fn is_within(&self, bounds: Vec2) -> bool {
        self.left() >= 0.0 && self.top() >= 0.0 && self.right() <= bounds.x && self.bottom() <= bounds.y
    }
}
