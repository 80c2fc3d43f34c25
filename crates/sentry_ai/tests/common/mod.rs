//! Shared fixtures for sentry_ai integration tests

#![allow(dead_code)]

use sentry_ai::prelude::*;
use sentry_math::{ray_aabb, ray_circle, Aabb2, Circle, Ray2};

pub const DT: f32 = 0.1;

/// Target disk, axis-aligned walls and agent bodies
pub struct TestScene {
    pub target: Vec2,
    pub target_radius: f32,
    pub walls: Vec<Aabb2>,
    pub bodies: Vec<Vec2>,
}

impl TestScene {
    pub fn new(target: Vec2) -> Self {
        Self {
            target,
            target_radius: 0.25,
            walls: Vec::new(),
            bodies: Vec::new(),
        }
    }

    pub fn with_wall(mut self, min: Vec2, max: Vec2) -> Self {
        self.walls.push(Aabb2::new(min, max));
        self
    }

    pub fn with_body(mut self, center: Vec2) -> Self {
        self.bodies.push(center);
        self
    }
}

fn keep_nearest(best: &mut Option<RayHit>, ray: &Ray2, distance: Option<f32>, max: f32, tag: ColliderTag, id: u64) {
    let Some(distance) = distance else {
        return;
    };
    if distance > max || best.map_or(false, |b| b.distance <= distance) {
        return;
    }
    *best = Some(RayHit {
        collider: ColliderId(id),
        tag,
        distance,
        point: ray.at(distance),
    });
}

impl SceneQuery for TestScene {
    fn raycast(&self, ray: &Ray2, max_distance: f32, mask: LayerMask) -> Option<RayHit> {
        let mut best = None;

        if mask.contains_layer(layers::TARGET) {
            let circle = Circle::new(self.target, self.target_radius);
            keep_nearest(&mut best, ray, ray_circle(ray, &circle), max_distance, ColliderTag::Target, 0);
        }
        if mask.contains_layer(layers::WALL) {
            for (i, wall) in self.walls.iter().enumerate() {
                keep_nearest(&mut best, ray, ray_aabb(ray, wall), max_distance, ColliderTag::Wall, 100 + i as u64);
            }
        }
        if mask.contains_layer(layers::AGENT) {
            for (i, body) in self.bodies.iter().enumerate() {
                let circle = Circle::new(*body, 0.4);
                keep_nearest(&mut best, ray, ray_circle(ray, &circle), max_distance, ColliderTag::Agent, 200 + i as u64);
            }
        }
        best
    }
}

/// Far away and out of sight
pub fn nowhere() -> Vec2 {
    Vec2::new(100.0, 100.0)
}

pub fn build(config: AgentConfig, at: Vec2, bus: &EventBus) -> Agent {
    Agent::builder(config)
        .id(AgentId(1))
        .navigator(StraightLineNavigator::new(at))
        .listen(bus)
        .seed(42)
        .build()
        .unwrap()
}

/// Tick with the scene's target as the shared target snapshot
pub fn tick(agent: &mut Agent, scene: &TestScene, effects: &EffectLog) {
    agent.tick(&TickContext::new(DT, scene.target, scene, effects));
}

pub fn tick_n(agent: &mut Agent, scene: &TestScene, effects: &EffectLog, n: usize) {
    for _ in 0..n {
        tick(agent, scene, effects);
    }
}
