//! Data handed to animation, VFX and debug layers
//!
//! Purely observational. Nothing here feeds back into behavior.

use crate::schedule::TaskKind;
use crate::state::{BehaviorState, Facing, Locomotion};
use sentry_math::Vec2;
use serde::{Deserialize, Serialize};

/// Debug overlay geometry
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DebugOverlay {
    /// Start of the last vision ray
    pub vision_origin: Vec2,
    /// End of the last vision ray at full effective range
    pub vision_end: Vec2,
    /// Range the last vision ray was cast with
    pub effective_vision_range: f32,
    pub hearing_radius: f32,
    /// Guard only
    pub attack_radius: Option<f32>,
}

/// Per-tick outward hints
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub facing: Facing,
    pub locomotion: Locomotion,
    /// Alert indicator visibility
    pub show_alert: bool,
    pub debug: DebugOverlay,
}

/// Serializable view of an agent after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSnapshot {
    pub id: u64,
    pub tick: u64,
    pub state: BehaviorState,
    pub position: Vec2,
    pub facing: Facing,
    pub locomotion: Locomotion,
    pub show_alert: bool,
    pub last_known_target: Option<Vec2>,
    pub heard_target: Option<Vec2>,
    pub task: Option<TaskKind>,
    /// Guard only
    pub can_attack: Option<bool>,
}
