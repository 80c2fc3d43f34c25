//! Navigation adapter
//!
//! Path planning and per-tick displacement belong to the host. The agent only
//! hands out destinations and speeds, then reads the position back.

use sentry_math::Vec2;

/// Locomotion primitive consumed by an agent
///
/// Destinations may change every tick; implementations must not accumulate
/// error when they do.
pub trait Navigator: Send {
    /// Walk toward `point`
    fn set_destination(&mut self, point: Vec2);

    /// Movement speed in units per second
    fn set_speed(&mut self, speed: f32);

    /// Drop the current destination and hold position
    fn stop(&mut self);

    /// Current position
    fn position(&self) -> Vec2;

    /// Whether a destination is active and not yet reached
    fn is_moving(&self) -> bool;

    /// Advance movement by `delta_time` seconds
    fn step(&mut self, delta_time: f32);
}

/// Moves in a straight line toward the destination, ignoring obstacles
#[derive(Debug, Clone)]
pub struct StraightLineNavigator {
    position: Vec2,
    destination: Option<Vec2>,
    speed: f32,
}

impl StraightLineNavigator {
    /// Create a navigator standing at `position`
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            destination: None,
            speed: 0.0,
        }
    }

    /// Teleport to `position`, keeping the destination
    pub fn warp(&mut self, position: Vec2) {
        self.position = position;
    }

    pub fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Navigator for StraightLineNavigator {
    fn set_destination(&mut self, point: Vec2) {
        self.destination = Some(point);
    }

    fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    fn stop(&mut self) {
        self.destination = None;
    }

    fn position(&self) -> Vec2 {
        self.position
    }

    fn is_moving(&self) -> bool {
        matches!(self.destination, Some(dest) if dest != self.position)
    }

    fn step(&mut self, delta_time: f32) {
        let Some(destination) = self.destination else {
            return;
        };

        let max_distance = (self.speed * delta_time).max(0.0);
        self.position = self.position.move_towards(destination, max_distance);
    }
}
