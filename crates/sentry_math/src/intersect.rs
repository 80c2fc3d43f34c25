//! Ray intersection tests against collider shapes
//!
//! A ray that starts inside a shape hits it at distance 0.

use crate::bounds::{Aabb2, Circle};
use crate::ray::Ray2;
use crate::vector::Vec2;

/// Result of a ray-shape intersection
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RayShapeHit {
    /// Distance along the ray to the hit point
    pub distance: f32,
    /// Hit point in world space
    pub point: Vec2,
}

/// Ray-AABB intersection using the slab method
pub fn ray_aabb(ray: &Ray2, aabb: &Aabb2) -> Option<f32> {
    if aabb.contains_point(ray.origin) {
        return Some(0.0);
    }
    if ray.is_degenerate() {
        return None;
    }

    let mut tmin = f32::NEG_INFINITY;
    let mut tmax = f32::INFINITY;

    for (origin, dir, min, max) in [
        (ray.origin.x, ray.direction.x, aabb.min.x, aabb.max.x),
        (ray.origin.y, ray.direction.y, aabb.min.y, aabb.max.y),
    ] {
        if dir.abs() < crate::consts::EPSILON {
            // Parallel to this slab: must already be inside it
            if origin < min || origin > max {
                return None;
            }
        } else {
            let inv = 1.0 / dir;
            let t1 = (min - origin) * inv;
            let t2 = (max - origin) * inv;
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));
        }
    }

    if tmax < 0.0 || tmin > tmax {
        None
    } else {
        Some(tmin.max(0.0))
    }
}

/// Ray-Circle intersection
pub fn ray_circle(ray: &Ray2, circle: &Circle) -> Option<f32> {
    if circle.contains_point(ray.origin) {
        return Some(0.0);
    }
    if ray.is_degenerate() {
        return None;
    }

    let oc = ray.origin - circle.center;
    let b = oc.dot(ray.direction);
    let c = oc.length_squared() - circle.radius * circle.radius;
    let discriminant = b * b - c;

    if discriminant < 0.0 {
        return None;
    }

    let t = -b - discriminant.sqrt();
    if t >= 0.0 { Some(t) } else { None }
}

/// Convenience wrapper returning the hit point as well
pub fn ray_circle_hit(ray: &Ray2, circle: &Circle) -> Option<RayShapeHit> {
    ray_circle(ray, circle).map(|distance| RayShapeHit {
        distance,
        point: ray.at(distance),
    })
}

/// Convenience wrapper returning the hit point as well
pub fn ray_aabb_hit(ray: &Ray2, aabb: &Aabb2) -> Option<RayShapeHit> {
    ray_aabb(ray, aabb).map(|distance| RayShapeHit {
        distance,
        point: ray.at(distance),
    })
}
