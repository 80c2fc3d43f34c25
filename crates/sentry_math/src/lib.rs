//! # sentry_math - 2D Math Primitives
//!
//! Small, copyable math types for a top-down world:
//! - `Vec2` with the usual operators
//! - `Ray2` for line-of-sight queries
//! - `Aabb2` and `Circle` collider shapes
//! - Ray/shape intersection tests

pub mod bounds;
pub mod intersect;
pub mod ray;
pub mod vector;

pub use bounds::*;
pub use intersect::*;
pub use ray::*;
pub use vector::*;

/// Common math constants
pub mod consts {
    pub const PI: f32 = core::f32::consts::PI;
    pub const TAU: f32 = PI * 2.0;
    pub const EPSILON: f32 = 1e-6;
}

/// Linear interpolation
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

pub mod prelude {
    pub use crate::bounds::{Aabb2, Circle};
    pub use crate::intersect::{ray_aabb, ray_circle, RayShapeHit};
    pub use crate::ray::Ray2;
    pub use crate::vector::Vec2;
    pub use crate::lerp;
}
