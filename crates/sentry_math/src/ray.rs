//! 2D ray for line-of-sight testing

use crate::vector::Vec2;

/// 2D ray with a normalized direction
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray2 {
    /// Ray origin point
    pub origin: Vec2,
    /// Ray direction (normalized, or zero for a degenerate ray)
    pub direction: Vec2,
}

impl Ray2 {
    /// Create a new ray with normalized direction
    #[inline]
    pub fn new(origin: Vec2, direction: Vec2) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Create a ray from two points
    #[inline]
    pub fn from_points(start: Vec2, end: Vec2) -> Self {
        Self::new(start, end - start)
    }

    /// Whether the direction collapsed to zero
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.direction == Vec2::ZERO
    }

    /// Get a point at distance t along the ray
    #[inline]
    pub fn at(&self, t: f32) -> Vec2 {
        self.origin + self.direction * t
    }

    /// Get the closest point on the ray to a given point
    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        let t = (point - self.origin).dot(self.direction);
        if t <= 0.0 {
            self.origin
        } else {
            self.at(t)
        }
    }

    /// Get the distance from a point to the ray
    pub fn distance_to_point(&self, point: Vec2) -> f32 {
        (point - self.closest_point(point)).length()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ray_at() {
        let ray = Ray2::new(Vec2::ZERO, Vec2::new(2.0, 0.0));
        assert_eq!(ray.direction, Vec2::X);
        assert_eq!(ray.at(3.0), Vec2::new(3.0, 0.0));
    }

    #[test]
    fn test_closest_point_behind_origin() {
        let ray = Ray2::new(Vec2::ZERO, Vec2::X);
        assert_eq!(ray.closest_point(Vec2::new(-5.0, 1.0)), Vec2::ZERO);
        assert!((ray.distance_to_point(Vec2::new(4.0, 2.0)) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_ray() {
        let ray = Ray2::from_points(Vec2::ONE, Vec2::ONE);
        assert!(ray.is_degenerate());
    }
}
