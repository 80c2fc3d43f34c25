//! Sentry AI - Perception and Behavior Engine
//!
//! Decides, every tick, what a non-player agent is doing based on partial
//! sensory input about a single target.
//!
//! # Features
//!
//! - Vision ray with a reduced rear range
//! - Event-driven hearing with occlusion
//! - Table-dispatched behavior state machine
//! - Alert and search choreography as tick-advanced step counters
//! - Guard variant with a cooldown-gated attack cycle
//!
//! # Example
//!
//! ```ignore
//! use sentry_ai::prelude::*;
//!
//! let bus = EventBus::new();
//! let mut agent = Agent::builder(AgentConfig::guard(Vec2::ZERO))
//!     .navigator(StraightLineNavigator::new(Vec2::ZERO))
//!     .listen(&bus)
//!     .build()?;
//!
//! agent.tick(&TickContext::new(dt, target, &scene, &effects));
//! ```

pub mod agent;
pub mod config;
pub mod effects;
pub mod error;
pub mod events;
pub mod navigation;
pub mod perception;
pub mod presentation;
pub mod scene;
pub mod schedule;
pub mod state;

pub mod prelude {
    pub use crate::agent::{Agent, AgentBuilder, AgentId, HearingOutcome, TickContext};
    pub use crate::config::{AgentConfig, Role};
    pub use crate::effects::{AttackEffect, EffectLog, EffectSink, NullEffects};
    pub use crate::error::{AgentError, ConfigError, Result};
    pub use crate::events::TargetMoved;
    pub use crate::navigation::{Navigator, StraightLineNavigator};
    pub use crate::presentation::{AgentSnapshot, DebugOverlay, Presentation};
    pub use crate::scene::{layers, ColliderId, ColliderTag, EmptyScene, LayerMask, RayHit, SceneQuery};
    pub use crate::schedule::{Cue, Scheduler, TaskKind};
    pub use crate::state::{BehaviorState, Facing, Locomotion, PatrolRoute};
    pub use sentry_event::EventBus;
    pub use sentry_math::Vec2;
}

pub use prelude::*;
