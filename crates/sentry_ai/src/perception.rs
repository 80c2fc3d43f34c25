//! Perception queries
//!
//! Pure functions over the agent's position, the config and the scene. The
//! agent applies their results to its runtime state.

use crate::config::AgentConfig;
use crate::scene::{RayHit, SceneQuery};
use crate::state::Facing;
use sentry_math::{Ray2, Vec2};

/// Effective vision range toward `target`
///
/// Reduced by the rear divisor when the target's horizontal offset disagrees
/// with `facing`.
pub fn vision_range_for(config: &AgentConfig, origin: Vec2, facing: Facing, target: Vec2) -> f32 {
    if facing.is_behind(origin.x, target.x) {
        config.vision_range / config.rear_vision_divisor
    } else {
        config.vision_range
    }
}

/// Result of a single vision ray
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisionReport {
    /// First hit was the target
    pub seen: bool,
    /// Range the ray was cast with
    pub effective_range: f32,
    /// Ray start
    pub origin: Vec2,
    /// Ray end at full effective range
    pub ray_end: Vec2,
    /// First collider hit, if any
    pub hit: Option<RayHit>,
}

/// Cast the vision ray from `origin` toward `target`
pub fn cast_vision(
    config: &AgentConfig,
    origin: Vec2,
    facing: Facing,
    target: Vec2,
    scene: &dyn SceneQuery,
) -> VisionReport {
    let effective_range = vision_range_for(config, origin, facing, target);
    let ray = Ray2::from_points(origin, target);
    let hit = scene.raycast(&ray, effective_range, config.vision_mask());

    VisionReport {
        seen: hit.map_or(false, |h| h.is_target()),
        effective_range,
        origin,
        ray_end: ray.at(effective_range),
        hit,
    }
}

/// Whether a noise at a given point reaches the agent
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Audibility {
    /// Farther than the hearing radius
    OutOfRange { distance: f32 },
    /// Something solid stands in between
    Occluded,
    /// Nothing in the way
    Audible,
}

/// Check a noise at `source` against the hearing radius and occluders
pub fn check_hearing(
    config: &AgentConfig,
    origin: Vec2,
    source: Vec2,
    scene: &dyn SceneQuery,
) -> Audibility {
    let distance = origin.distance(source);
    if distance > config.hearing_radius {
        return Audibility::OutOfRange { distance };
    }

    let ray = Ray2::from_points(origin, source);
    match scene.raycast(&ray, distance.min(config.hearing_radius), config.hearing_mask()) {
        Some(hit) if !hit.is_target() => Audibility::Occluded,
        _ => Audibility::Audible,
    }
}

/// Whether the target is within attack range with a clear line to it
pub fn target_in_attack_range(
    config: &AgentConfig,
    origin: Vec2,
    target: Vec2,
    scene: &dyn SceneQuery,
) -> bool {
    if origin.distance(target) > config.attack_range {
        return false;
    }

    let ray = Ray2::from_points(origin, target);
    scene
        .raycast(&ray, config.attack_range, config.attack_mask())
        .map_or(false, |hit| hit.is_target())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{ColliderId, ColliderTag, LayerMask};

    /// One target disk and optional vertical walls at given x positions
    struct LineScene {
        target: Vec2,
        target_radius: f32,
        walls: Vec<f32>,
    }

    impl SceneQuery for LineScene {
        fn raycast(&self, ray: &Ray2, max_distance: f32, _mask: LayerMask) -> Option<RayHit> {
            let circle = sentry_math::Circle::new(self.target, self.target_radius);
            let mut best: Option<RayHit> = sentry_math::ray_circle(ray, &circle)
                .filter(|d| *d <= max_distance)
                .map(|d| RayHit {
                    collider: ColliderId(0),
                    tag: ColliderTag::Target,
                    distance: d,
                    point: ray.at(d),
                });

            for (i, wall_x) in self.walls.iter().enumerate() {
                if ray.direction.x.abs() < 1e-6 {
                    continue;
                }
                let d = (wall_x - ray.origin.x) / ray.direction.x;
                if d >= 0.0 && d <= max_distance && best.map_or(true, |b| d < b.distance) {
                    best = Some(RayHit {
                        collider: ColliderId(i as u64 + 1),
                        tag: ColliderTag::Wall,
                        distance: d,
                        point: ray.at(d),
                    });
                }
            }
            best
        }
    }

    fn scene(target: Vec2) -> LineScene {
        LineScene {
            target,
            target_radius: 0.25,
            walls: Vec::new(),
        }
    }

    fn config() -> AgentConfig {
        AgentConfig::guard(Vec2::ZERO).with_vision(12.0, 3.0)
    }

    #[test]
    fn test_range_full_ahead_reduced_behind() {
        let config = config();
        let ahead = vision_range_for(&config, Vec2::ZERO, Facing::Right, Vec2::new(5.0, 0.0));
        let behind = vision_range_for(&config, Vec2::ZERO, Facing::Right, Vec2::new(-5.0, 0.0));
        assert_eq!(ahead, 12.0);
        assert!((behind - 4.0).abs() < 1e-6);

        let behind_left = vision_range_for(&config, Vec2::ZERO, Facing::Left, Vec2::new(5.0, 0.0));
        assert!((behind_left - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_target_ahead_seen() {
        let target = Vec2::new(10.0, 0.0);
        let report = cast_vision(&config(), Vec2::ZERO, Facing::Right, target, &scene(target));
        assert!(report.seen);
        assert_eq!(report.effective_range, 12.0);
        assert!((report.ray_end.x - 12.0).abs() < 1e-5);
    }

    #[test]
    fn test_target_behind_same_distance_missed() {
        let target = Vec2::new(-10.0, 0.0);
        let report = cast_vision(&config(), Vec2::ZERO, Facing::Right, target, &scene(target));
        assert!(!report.seen);
        assert!((report.effective_range - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_rear_threshold() {
        // Target disk front edge at distance x - 0.25
        let inside = Vec2::new(-4.2, 0.0);
        let outside = Vec2::new(-4.3, 0.0);
        assert!(cast_vision(&config(), Vec2::ZERO, Facing::Right, inside, &scene(inside)).seen);
        assert!(!cast_vision(&config(), Vec2::ZERO, Facing::Right, outside, &scene(outside)).seen);
    }

    #[test]
    fn test_wall_blocks_vision() {
        let target = Vec2::new(6.0, 0.0);
        let mut scene = scene(target);
        scene.walls.push(3.0);
        let report = cast_vision(&config(), Vec2::ZERO, Facing::Right, target, &scene);
        assert!(!report.seen);
        assert_eq!(report.hit.map(|h| h.tag), Some(ColliderTag::Wall));
    }

    #[test]
    fn test_hearing_radius_boundary() {
        let config = AgentConfig::guard(Vec2::ZERO).with_hearing_radius(6.0);
        let empty = crate::scene::EmptyScene;

        assert_eq!(
            check_hearing(&config, Vec2::ZERO, Vec2::new(5.999, 0.0), &empty),
            Audibility::Audible
        );
        assert!(matches!(
            check_hearing(&config, Vec2::ZERO, Vec2::new(6.001, 0.0), &empty),
            Audibility::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_hearing_occluded_by_wall() {
        let config = AgentConfig::guard(Vec2::ZERO);
        let source = Vec2::new(4.0, 0.0);
        let mut scene = scene(source);
        scene.walls.push(2.0);
        assert_eq!(check_hearing(&config, Vec2::ZERO, source, &scene), Audibility::Occluded);
    }

    #[test]
    fn test_hearing_reaching_target_is_clear() {
        let config = AgentConfig::guard(Vec2::ZERO);
        let source = Vec2::new(4.0, 0.0);
        assert_eq!(check_hearing(&config, Vec2::ZERO, source, &scene(source)), Audibility::Audible);
    }

    #[test]
    fn test_attack_range() {
        let config = AgentConfig::guard(Vec2::ZERO).with_attack(4.0, 1.0);
        let near = Vec2::new(3.5, 0.0);
        let far = Vec2::new(4.5, 0.0);
        assert!(target_in_attack_range(&config, Vec2::ZERO, near, &scene(near)));
        assert!(!target_in_attack_range(&config, Vec2::ZERO, far, &scene(far)));

        let mut blocked = scene(near);
        blocked.walls.push(1.0);
        assert!(!target_in_attack_range(&config, Vec2::ZERO, near, &blocked));
    }
}
