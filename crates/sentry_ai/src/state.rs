//! Behavior states, facing and patrol routes

use sentry_math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Active behavior of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorState {
    /// Walk between two anchors
    Patrol,
    /// Return to and hold the guard post
    Guard,
    /// Heard something: hold position and look around
    Warning,
    /// Walk to where the noise came from
    Explore,
    /// Run to the last place the target was seen
    Chase,
    /// Lost visual contact: search around the last sighting
    Lost,
    /// Guard only: attack the target, then cool down
    Attack,
}

impl BehaviorState {
    /// All states, in dispatch-table order
    pub const ALL: [BehaviorState; 7] = [
        BehaviorState::Patrol,
        BehaviorState::Guard,
        BehaviorState::Warning,
        BehaviorState::Explore,
        BehaviorState::Chase,
        BehaviorState::Lost,
        BehaviorState::Attack,
    ];

    /// Index into the dispatch table
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Whether this is a resting state (Patrol or Guard)
    pub fn is_home(self) -> bool {
        matches!(self, BehaviorState::Patrol | BehaviorState::Guard)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            BehaviorState::Patrol => "patrol",
            BehaviorState::Guard => "guard",
            BehaviorState::Warning => "warning",
            BehaviorState::Explore => "explore",
            BehaviorState::Chase => "chase",
            BehaviorState::Lost => "lost",
            BehaviorState::Attack => "attack",
        }
    }
}

impl fmt::Display for BehaviorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Horizontal facing of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// The opposite facing
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }

    /// Unit X direction of this facing
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    /// Facing implied by a horizontal displacement, if any
    #[inline]
    pub fn from_delta_x(dx: f32) -> Option<Self> {
        if dx > 0.0 {
            Some(Facing::Right)
        } else if dx < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    /// Whether a point at `target_x` lies behind an observer at `origin_x`
    #[inline]
    pub fn is_behind(self, origin_x: f32, target_x: f32) -> bool {
        match self {
            Facing::Right => target_x < origin_x,
            Facing::Left => target_x > origin_x,
        }
    }
}

/// Movement intent consumed by the animation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locomotion {
    Idle,
    Walking,
}

/// Two-anchor patrol route
///
/// The active anchor flips whenever the agent arrives within tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatrolRoute {
    anchors: [Vec2; 2],
    current: usize,
}

impl PatrolRoute {
    /// Create a route heading for the second anchor first
    pub fn new(first: Vec2, second: Vec2) -> Self {
        Self {
            anchors: [first, second],
            current: 1,
        }
    }

    /// Anchor currently walked toward
    #[inline]
    pub fn current(&self) -> Vec2 {
        self.anchors[self.current]
    }

    /// Both anchors
    #[inline]
    pub fn anchors(&self) -> [Vec2; 2] {
        self.anchors
    }

    /// Switch to the other anchor
    #[inline]
    pub fn flip(&mut self) {
        self.current = 1 - self.current;
    }
}
