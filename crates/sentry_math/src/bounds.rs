//! Collider shapes

use crate::vector::Vec2;

/// 2D Axis-Aligned Bounding Box
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Aabb2 {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb2 {
    /// Create from corners (order-independent)
    #[inline]
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Create from center and half extents
    #[inline]
    pub fn from_center(center: Vec2, half_extents: Vec2) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        (self.max - self.min) * 0.5
    }

    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }

    /// Closest point inside the box to `point`
    #[inline]
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        point.max(self.min).min(self.max)
    }
}

/// Circle shape
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    pub center: Vec2,
    pub radius: f32,
}

impl Circle {
    #[inline]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        self.center.distance_squared(point) <= self.radius * self.radius
    }

    #[inline]
    pub fn intersects_circle(&self, other: &Circle) -> bool {
        let r = self.radius + other.radius;
        self.center.distance_squared(other.center) <= r * r
    }

    #[inline]
    pub fn intersects_aabb(&self, aabb: &Aabb2) -> bool {
        self.contains_point(aabb.closest_point(self.center))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_corners_normalized() {
        let aabb = Aabb2::new(Vec2::new(2.0, 2.0), Vec2::new(-2.0, -1.0));
        assert_eq!(aabb.min, Vec2::new(-2.0, -1.0));
        assert_eq!(aabb.max, Vec2::new(2.0, 2.0));
        assert_eq!(aabb.center(), Vec2::new(0.0, 0.5));
    }

    #[test]
    fn test_aabb_contains() {
        let aabb = Aabb2::from_center(Vec2::ZERO, Vec2::ONE);
        assert!(aabb.contains_point(Vec2::new(0.5, -0.5)));
        assert!(!aabb.contains_point(Vec2::new(1.5, 0.0)));
    }

    #[test]
    fn test_circle_aabb_overlap() {
        let aabb = Aabb2::from_center(Vec2::ZERO, Vec2::ONE);
        assert!(Circle::new(Vec2::new(1.5, 0.0), 0.6).intersects_aabb(&aabb));
        assert!(!Circle::new(Vec2::new(3.0, 0.0), 0.6).intersects_aabb(&aabb));
    }
}
