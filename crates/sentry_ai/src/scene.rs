//! Scene queries consumed by perception
//!
//! The core never owns geometry. Hosts implement [`SceneQuery`] over their
//! collision world; layers are filtered with a [`LayerMask`].

use sentry_math::{Ray2, Vec2};
use serde::{Deserialize, Serialize};
use std::ops::{BitOr, Not};

/// Well-known layer indices
pub mod layers {
    pub const DEFAULT: u8 = 0;
    pub const AGENT: u8 = 1;
    pub const TARGET: u8 = 2;
    pub const WALL: u8 = 3;
    pub const PROP: u8 = 4;
}

/// Bitmask of collision layers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerMask(pub u32);

/// Bit for `index`; layers past 31 have no bit and match nothing
const fn layer_bit(index: u8) -> u32 {
    match 1u32.checked_shl(index as u32) {
        Some(bit) => bit,
        None => 0,
    }
}

impl LayerMask {
    pub const NONE: Self = Self(0);
    pub const ALL: Self = Self(0xFFFF_FFFF);

    /// Mask containing a single layer
    #[inline]
    pub const fn layer(index: u8) -> Self {
        Self(layer_bit(index))
    }

    /// Add a layer
    #[inline]
    pub const fn with_layer(self, index: u8) -> Self {
        Self(self.0 | layer_bit(index))
    }

    /// Remove every layer present in `other`
    #[inline]
    pub const fn without(self, other: LayerMask) -> Self {
        Self(self.0 & !other.0)
    }

    #[inline]
    pub const fn contains_layer(self, index: u8) -> bool {
        self.0 & layer_bit(index) != 0
    }

    #[inline]
    pub const fn intersects(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl Not for LayerMask {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0)
    }
}

/// What a collider represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColliderTag {
    /// The tracked target (the player)
    Target,
    /// Static level geometry
    Wall,
    /// Another agent's body
    Agent,
    /// Anything else
    Prop,
}

/// Collider identifier within a scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u64);

/// First hit of a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Collider that was hit
    pub collider: ColliderId,
    /// Tag of the collider
    pub tag: ColliderTag,
    /// Distance along the ray
    pub distance: f32,
    /// Hit point
    pub point: Vec2,
}

impl RayHit {
    #[inline]
    pub fn is_target(&self) -> bool {
        self.tag == ColliderTag::Target
    }
}

/// Static collision queries
///
/// Implementations must be deterministic for a given scene state.
pub trait SceneQuery: Send + Sync {
    /// Cast `ray` up to `max_distance`, considering only colliders on a layer in
    /// `mask`; returns the nearest hit.
    fn raycast(&self, ray: &Ray2, max_distance: f32, mask: LayerMask) -> Option<RayHit>;
}

/// A scene with nothing in it
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyScene;

impl SceneQuery for EmptyScene {
    fn raycast(&self, _ray: &Ray2, _max_distance: f32, _mask: LayerMask) -> Option<RayHit> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_mask_ops() {
        let agents = LayerMask::layer(layers::AGENT);
        let everything_else = LayerMask::ALL.without(agents);

        assert!(agents.contains_layer(layers::AGENT));
        assert!(!everything_else.contains_layer(layers::AGENT));
        assert!(everything_else.contains_layer(layers::WALL));
        assert_eq!(!agents, everything_else);

        let both = agents | LayerMask::layer(layers::PROP);
        assert!(both.intersects(LayerMask::layer(layers::PROP)));
        assert_eq!(both, agents.with_layer(layers::PROP));
    }

    #[test]
    fn test_out_of_range_layers_match_nothing() {
        assert_eq!(LayerMask::layer(32), LayerMask::NONE);
        assert_eq!(LayerMask::layer(u8::MAX), LayerMask::NONE);
        assert!(LayerMask::layer(31).contains_layer(31));
        assert!(!LayerMask::ALL.contains_layer(40));
        assert_eq!(LayerMask::ALL.with_layer(40), LayerMask::ALL);
    }

    #[test]
    fn test_empty_scene_never_hits() {
        let ray = Ray2::new(Vec2::ZERO, Vec2::X);
        assert!(EmptyScene.raycast(&ray, 100.0, LayerMask::ALL).is_none());
    }
}
