//! Axis-aligned rectangle geometry
//!
//! Screen coordinates: x grows right, y grows down.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle given by its min (top-left) and max (bottom-right) corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: Vec2,
    pub max: Vec2,
}

impl Rect {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self {
            min: min.min(max),
            max: min.max(max),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Shift horizontally so the left edge sits at `x`
    pub fn set_left(&mut self, x: f32) {
        let width = self.width();
        self.min.x = x;
        self.max.x = x + width;
    }

    /// Overlap test; touching edges count as overlapping
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.min.x <= other.max.x
            && other.min.x <= self.max.x
            && self.min.y <= other.max.y
            && other.min.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(100.0, 540.0), Vec2::splat(100.0));
        assert_eq!(r.min, Vec2::new(50.0, 490.0));
        assert_eq!(r.max, Vec2::new(150.0, 590.0));
        assert_eq!(r.center(), Vec2::new(100.0, 540.0));
    }

    #[test]
    fn test_new_normalizes_corners() {
        let r = Rect::new(Vec2::new(10.0, 20.0), Vec2::new(0.0, 0.0));
        assert_eq!(r.min, Vec2::ZERO);
        assert_eq!(r.width(), 10.0);
        assert_eq!(r.height(), 20.0);
    }

    #[test]
    fn test_intersects_overlap_and_miss() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::splat(5.0), Vec2::splat(15.0));
        let c = Rect::new(Vec2::splat(20.0), Vec2::splat(30.0));
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        assert!(!a.intersects(&c));
    }

    #[test]
    fn test_touching_edges_intersect() {
        let a = Rect::new(Vec2::ZERO, Vec2::splat(10.0));
        let b = Rect::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(a.intersects(&b));
    }

    #[test]
    fn test_set_left_keeps_width() {
        let mut r = Rect::new(Vec2::new(100.0, 0.0), Vec2::new(280.0, 50.0));
        r.set_left(-20.0);
        assert_eq!(r.min.x, -20.0);
        assert_eq!(r.width(), 180.0);
    }
}
