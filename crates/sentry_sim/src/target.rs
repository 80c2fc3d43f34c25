//! Scripted target movement

use sentry_math::Vec2;
use serde::{Deserialize, Serialize};

/// Waypoint path the target walks along at constant speed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetRoute {
    pub waypoints: Vec<Vec2>,
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Restart from the first waypoint after the last
    #[serde(default)]
    pub looped: bool,
    #[serde(skip)]
    next: usize,
}

fn default_speed() -> f32 {
    1.5
}

impl TargetRoute {
    pub fn new(waypoints: Vec<Vec2>, speed: f32) -> Self {
        Self {
            waypoints,
            speed,
            looped: false,
            next: 0,
        }
    }

    pub fn looped(mut self) -> Self {
        self.looped = true;
        self
    }

    /// Whether the last waypoint has been reached on a non-looping route
    pub fn is_finished(&self) -> bool {
        self.next >= self.waypoints.len()
    }

    /// Walk from `from` for `delta_time` seconds; returns the new position
    pub fn advance(&mut self, from: Vec2, delta_time: f32) -> Vec2 {
        let mut position = from;
        let mut budget = (self.speed * delta_time).max(0.0);

        while budget > 0.0 && !self.is_finished() {
            let waypoint = self.waypoints[self.next];
            let distance = position.distance(waypoint);
            if distance > budget {
                return position.move_towards(waypoint, budget);
            }

            position = waypoint;
            budget -= distance;
            self.next += 1;
            if self.looped && self.is_finished() {
                self.next = 0;
                if distance == 0.0 && self.waypoints.iter().all(|w| *w == waypoint) {
                    break;
                }
            }
        }
        position
    }
}
