//! Collider world answering agent ray casts

use sentry_ai::scene::{layers, ColliderId, ColliderTag, LayerMask, RayHit, SceneQuery};
use sentry_math::{ray_aabb, ray_circle, Aabb2, Circle, Ray2, Vec2};

/// Collider geometry
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Rect(Aabb2),
    Circle(Circle),
}

impl Shape {
    fn raycast(&self, ray: &Ray2) -> Option<f32> {
        match self {
            Shape::Rect(aabb) => ray_aabb(ray, aabb),
            Shape::Circle(circle) => ray_circle(ray, circle),
        }
    }
}

/// A shape with a layer and a tag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub id: ColliderId,
    pub shape: Shape,
    pub layer: u8,
    pub tag: ColliderTag,
}

/// Flat list of colliders with one distinguished target disk
#[derive(Debug, Clone)]
pub struct Scene {
    colliders: Vec<Collider>,
    target: ColliderId,
    next_id: u64,
}

impl Scene {
    /// Scene holding only the target disk
    pub fn new(target_position: Vec2, target_radius: f32) -> Self {
        let mut scene = Self {
            colliders: Vec::new(),
            target: ColliderId(0),
            next_id: 0,
        };
        scene.target = scene.add_circle(
            target_position,
            target_radius,
            layers::TARGET,
            ColliderTag::Target,
        );
        scene
    }

    fn insert(&mut self, shape: Shape, layer: u8, tag: ColliderTag) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.colliders.push(Collider { id, shape, layer, tag });
        id
    }

    /// Add a static wall
    pub fn add_wall(&mut self, bounds: Aabb2) -> ColliderId {
        self.insert(Shape::Rect(bounds), layers::WALL, ColliderTag::Wall)
    }

    /// Add a disk collider
    pub fn add_circle(&mut self, center: Vec2, radius: f32, layer: u8, tag: ColliderTag) -> ColliderId {
        self.insert(Shape::Circle(Circle::new(center, radius)), layer, tag)
    }

    /// Move a disk collider; boxes are static
    pub fn move_circle(&mut self, id: ColliderId, center: Vec2) -> bool {
        match self.colliders.iter_mut().find(|c| c.id == id) {
            Some(Collider {
                shape: Shape::Circle(circle),
                ..
            }) => {
                circle.center = center;
                true
            }
            _ => false,
        }
    }

    pub fn remove(&mut self, id: ColliderId) -> bool {
        if id == self.target {
            return false;
        }
        let before = self.colliders.len();
        self.colliders.retain(|c| c.id != id);
        self.colliders.len() != before
    }

    /// Move the target disk
    pub fn set_target(&mut self, position: Vec2) {
        let target = self.target;
        self.move_circle(target, position);
    }

    pub fn target_id(&self) -> ColliderId {
        self.target
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }
}

impl SceneQuery for Scene {
    fn raycast(&self, ray: &Ray2, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        self.colliders
            .iter()
            .filter(|c| mask.contains_layer(c.layer))
            .filter_map(|c| {
                let distance = c.shape.raycast(ray)?;
                (distance <= max_distance).then(|| RayHit {
                    collider: c.id,
                    tag: c.tag,
                    distance,
                    point: ray.at(distance),
                })
            })
            .min_by(|a, b| a.distance.total_cmp(&b.distance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_without_agents() -> LayerMask {
        LayerMask::ALL.without(LayerMask::layer(layers::AGENT))
    }

    #[test]
    fn test_nearest_hit_wins() {
        let mut scene = Scene::new(Vec2::new(6.0, 0.0), 0.5);
        scene.add_wall(Aabb2::new(Vec2::new(3.0, -1.0), Vec2::new(3.5, 1.0)));

        let ray = Ray2::new(Vec2::ZERO, Vec2::X);
        let hit = scene.raycast(&ray, 10.0, LayerMask::ALL).unwrap();
        assert_eq!(hit.tag, ColliderTag::Wall);
        assert!((hit.distance - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_max_distance_limits_hits() {
        let scene = Scene::new(Vec2::new(6.0, 0.0), 0.5);
        let ray = Ray2::new(Vec2::ZERO, Vec2::X);
        assert!(scene.raycast(&ray, 5.0, LayerMask::ALL).is_none());
        assert!(scene.raycast(&ray, 5.5, LayerMask::ALL).unwrap().is_target());
    }

    #[test]
    fn test_mask_skips_layers() {
        let mut scene = Scene::new(Vec2::new(6.0, 0.0), 0.5);
        scene.add_circle(Vec2::new(2.0, 0.0), 0.4, layers::AGENT, ColliderTag::Agent);

        let ray = Ray2::new(Vec2::ZERO, Vec2::X);
        assert_eq!(scene.raycast(&ray, 10.0, LayerMask::ALL).unwrap().tag, ColliderTag::Agent);
        assert!(scene.raycast(&ray, 10.0, mask_without_agents()).unwrap().is_target());
    }

    #[test]
    fn test_colliders_past_last_layer_are_never_hit() {
        let mut scene = Scene::new(Vec2::new(6.0, 0.0), 0.5);
        scene.add_circle(Vec2::new(2.0, 0.0), 0.4, 40, ColliderTag::Prop);

        let ray = Ray2::new(Vec2::ZERO, Vec2::X);
        assert!(scene.raycast(&ray, 10.0, LayerMask::ALL).unwrap().is_target());
    }

    #[test]
    fn test_move_target() {
        let mut scene = Scene::new(Vec2::new(6.0, 0.0), 0.5);
        scene.set_target(Vec2::new(0.0, 4.0));

        let ray = Ray2::new(Vec2::ZERO, Vec2::Y);
        assert!(scene.raycast(&ray, 10.0, LayerMask::ALL).unwrap().is_target());
        assert!(!scene.remove(scene.target_id()));
    }

    #[test]
    fn test_remove_collider() {
        let mut scene = Scene::new(Vec2::new(6.0, 0.0), 0.5);
        let wall = scene.add_wall(Aabb2::new(Vec2::new(3.0, -1.0), Vec2::new(3.5, 1.0)));
        assert_eq!(scene.len(), 2);
        assert!(scene.remove(wall));
        assert!(!scene.remove(wall));
        assert_eq!(scene.len(), 1);
    }
}
