//! # sentry_sim - Headless Sentry World
//!
//! Hosts sentry agents outside any engine:
//! - `Scene` answers agent ray casts over walls, bodies and the target
//! - `World` owns the event bus and steps agents, optionally in parallel
//! - `Scenario` loads a whole setup from TOML
//! - Attack effects are collected through a channel
//!
//! # Example
//!
//! ```ignore
//! use sentry_sim::prelude::*;
//!
//! let scenario = Scenario::load("scenarios/courtyard.toml")?;
//! let mut sim = Simulation::from_scenario(&scenario)?;
//! for _ in 0..scenario.ticks {
//!     sim.step()?;
//! }
//! ```

pub mod error;
pub mod scenario;
pub mod scene;
pub mod simulation;
pub mod sink;
pub mod target;
pub mod world;

pub mod prelude {
    pub use crate::error::{Result, SimError};
    pub use crate::scenario::{AgentSpec, Scenario, TargetSpec, WallSpec};
    pub use crate::scene::{Collider, Scene, Shape};
    pub use crate::simulation::Simulation;
    pub use crate::sink::{effect_channel, ChannelEffects};
    pub use crate::target::TargetRoute;
    pub use crate::world::{World, AGENT_BODY_RADIUS};
}

pub use prelude::*;
