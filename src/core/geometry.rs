//! Axis-aligned bounds for zones.
//!
//! The table is laid out in world space with `y` up. Zones sit on the table
//! plane, so most queries care about the `x`/`z` footprint.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Horizontal axis along which a zone lays out its cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

impl Axis {
    /// Unit vector for this axis.
    #[must_use]
    pub const fn unit(self) -> Vec3 {
        match self {
            Axis::X => Vec3::X,
            Axis::Z => Vec3::Z,
        }
    }
}

/// An axis-aligned box given by its min and max corners.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// Build from two corners in any order.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Build from a center point and full extents.
    #[must_use]
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Inclusive 3D containment.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Inclusive containment on the table plane, ignoring height.
    #[must_use]
    pub fn contains_footprint(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Do the footprints of two boxes overlap (touching edges excluded)?
    #[must_use]
    pub fn overlaps_footprint(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.z < other.max.z
            && other.min.z < self.max.z
    }

    /// The longer horizontal axis. Ties go to `X`.
    #[must_use]
    pub fn dominant_axis(&self) -> Axis {
        let size = self.size();
        if size.z > size.x {
            Axis::Z
        } else {
            Axis::X
        }
    }

    /// Extent along a horizontal axis.
    #[must_use]
    pub fn extent(&self, axis: Axis) -> f32 {
        let size = self.size();
        match axis {
            Axis::X => size.x,
            Axis::Z => size.z,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_center_size() {
        let bounds = Aabb::from_center_size(Vec3::new(0.0, 0.0, 6.0), Vec3::new(12.0, 1.0, 3.0));
        assert_eq!(bounds.min, Vec3::new(-6.0, -0.5, 4.5));
        assert_eq!(bounds.max, Vec3::new(6.0, 0.5, 7.5));
        assert_eq!(bounds.center(), Vec3::new(0.0, 0.0, 6.0));
    }

    #[test]
    fn test_corners_any_order() {
        let bounds = Aabb::new(Vec3::new(1.0, 1.0, 1.0), Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(bounds.min, Vec3::splat(-1.0));
        assert_eq!(bounds.max, Vec3::splat(1.0));
    }

    #[test]
    fn test_contains_is_inclusive() {
        let bounds = Aabb::new(Vec3::ZERO, Vec3::ONE);
        assert!(bounds.contains(Vec3::ONE));
        assert!(bounds.contains(Vec3::ZERO));
        assert!(!bounds.contains(Vec3::new(1.01, 0.5, 0.5)));
    }

    #[test]
    fn test_footprint_ignores_height() {
        let bounds = Aabb::from_center_size(Vec3::ZERO, Vec3::new(2.0, 0.1, 2.0));
        let lifted = Vec3::new(0.5, 3.0, -0.5);
        assert!(!bounds.contains(lifted));
        assert!(bounds.contains_footprint(lifted));
    }

    #[test]
    fn test_overlaps_footprint() {
        let a = Aabb::new(Vec3::ZERO, Vec3::new(2.0, 1.0, 2.0));
        let b = Aabb::new(Vec3::new(1.0, 0.0, 1.0), Vec3::new(3.0, 1.0, 3.0));
        let c = Aabb::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(4.0, 1.0, 2.0));
        assert!(a.overlaps_footprint(&b));
        assert!(!a.overlaps_footprint(&c));
    }

    #[test]
    fn test_dominant_axis() {
        let wide = Aabb::from_center_size(Vec3::ZERO, Vec3::new(12.0, 1.0, 3.0));
        let deep = Aabb::from_center_size(Vec3::ZERO, Vec3::new(2.0, 1.0, 8.0));
        assert_eq!(wide.dominant_axis(), Axis::X);
        assert_eq!(deep.dominant_axis(), Axis::Z);
        assert_eq!(deep.extent(Axis::Z), 8.0);
    }
}
