//! Axis-aligned boxes and overlap tests
//!
//! Entity counts stay in the tens, so collision resolution is a full
//! pairwise scan per step; there is no broad phase.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};

/// An axis-aligned box: top-left corner plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    /// Strict overlap test; boxes that merely share an edge do not collide.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && self.pos.x + self.size.x > other.pos.x
            && self.pos.y < other.pos.y + other.size.y
            && self.pos.y + self.size.y > other.pos.y
    }

    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }
}

/// Clamp a box position so the box stays fully inside the world.
#[inline]
pub fn clamp_to_world(pos: Vec2, size: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, Vec2::new(WORLD_WIDTH, WORLD_HEIGHT) - size)
}

/// True once `pos` is more than `margin` outside the world on any axis.
#[inline]
pub fn outside_world(pos: Vec2, margin: f32) -> bool {
    pos.x < -margin
        || pos.x > WORLD_WIDTH + margin
        || pos.y < -margin
        || pos.y > WORLD_HEIGHT + margin
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_hit() {
        let a = Aabb::new(Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0));
        let b = Aabb::new(Vec2::new(25.0, 25.0), Vec2::new(20.0, 20.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_overlap_miss() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(50.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_touching_edges_do_not_collide() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_contained_box_overlaps() {
        let outer = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(100.0, 100.0));
        let inner = Aabb::new(Vec2::new(40.0, 40.0), Vec2::new(10.0, 10.0));
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }

    #[test]
    fn test_clamp_to_world() {
        let size = Vec2::new(50.0, 50.0);

        let clamped = clamp_to_world(Vec2::new(-30.0, 20.0), size);
        assert_eq!(clamped, Vec2::new(0.0, 20.0));

        let clamped = clamp_to_world(Vec2::new(WORLD_WIDTH + 10.0, WORLD_HEIGHT + 10.0), size);
        assert_eq!(clamped, Vec2::new(WORLD_WIDTH - 50.0, WORLD_HEIGHT - 50.0));

        let inside = Vec2::new(300.0, 400.0);
        assert_eq!(clamp_to_world(inside, size), inside);
    }

    #[test]
    fn test_outside_world_margin() {
        assert!(!outside_world(Vec2::new(-49.0, 500.0), 50.0));
        assert!(outside_world(Vec2::new(-51.0, 500.0), 50.0));
        assert!(outside_world(Vec2::new(400.0, WORLD_HEIGHT + 51.0), 50.0));
        assert!(!outside_world(Vec2::new(400.0, WORLD_HEIGHT + 49.0), 50.0));
    }
}
