//! Scenario files
//!
//! A scenario lists walls, the target and its route, and the agents to spawn.
//!
//! ```toml
//! ticks = 600
//! delta_time = 0.05
//!
//! [target]
//! start = { x = -8.0, y = 0.0 }
//! route = { waypoints = [{ x = 8.0, y = 0.0 }], speed = 1.5 }
//!
//! [[walls]]
//! min = { x = 2.0, y = -1.0 }
//! max = { x = 2.5, y = 1.0 }
//!
//! [[agents]]
//! position = { x = 0.0, y = 4.0 }
//! seed = 7
//! [agents.config.role]
//! kind = "guard"
//! post = { x = 0.0, y = 4.0 }
//! ```

use crate::error::{Result, SimError};
use crate::scene::Scene;
use crate::target::TargetRoute;
use crate::world::World;
use sentry_ai::AgentConfig;
use sentry_math::{Aabb2, Vec2};
use serde::{Deserialize, Serialize};
use std::path::Path;

fn default_ticks() -> u64 {
    600
}

fn default_delta_time() -> f32 {
    1.0 / 30.0
}

fn default_threads() -> usize {
    1
}

fn default_target_radius() -> f32 {
    0.3
}

/// The tracked target
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetSpec {
    pub start: Vec2,
    #[serde(default = "default_target_radius")]
    pub radius: f32,
    #[serde(default)]
    pub route: Option<TargetRoute>,
}

/// Static wall given by two corners
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallSpec {
    pub min: Vec2,
    pub max: Vec2,
}

/// One agent to spawn
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSpec {
    pub position: Vec2,
    #[serde(default)]
    pub seed: u64,
    pub config: AgentConfig,
}

/// Complete simulation setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_ticks")]
    pub ticks: u64,
    #[serde(default = "default_delta_time")]
    pub delta_time: f32,
    /// Worker threads per step; 1 ticks on the calling thread
    #[serde(default = "default_threads")]
    pub threads: usize,
    pub target: TargetSpec,
    #[serde(default)]
    pub walls: Vec<WallSpec>,
    #[serde(default)]
    pub agents: Vec<AgentSpec>,
}

impl Scenario {
    /// Parse and validate a scenario
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let scenario: Self = toml::from_str(source)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Load and validate a scenario file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let scenario = Self::from_toml_str(&source)?;
        log::info!(
            "Loaded scenario {} ({} agents, {} walls)",
            path.as_ref().display(),
            scenario.agents.len(),
            scenario.walls.len()
        );
        Ok(scenario)
    }

    /// Check world-level values; agent configs are checked at spawn
    pub fn validate(&self) -> Result<()> {
        if !(self.delta_time.is_finite() && self.delta_time > 0.0) {
            return Err(SimError::InvalidScenario(format!(
                "delta_time must be positive (got {})",
                self.delta_time
            )));
        }
        if !(self.target.radius.is_finite() && self.target.radius > 0.0) {
            return Err(SimError::InvalidScenario(format!(
                "target radius must be positive (got {})",
                self.target.radius
            )));
        }
        if let Some(route) = &self.target.route {
            if !(route.speed.is_finite() && route.speed >= 0.0) {
                return Err(SimError::InvalidScenario(format!(
                    "target speed must not be negative (got {})",
                    route.speed
                )));
            }
        }
        Ok(())
    }

    /// Build the scene and spawn every agent
    pub fn build_world(&self) -> Result<World> {
        let mut scene = Scene::new(self.target.start, self.target.radius);
        for wall in &self.walls {
            scene.add_wall(Aabb2::new(wall.min, wall.max));
        }

        let mut world = World::new(scene, self.target.start);
        for spec in &self.agents {
            world.spawn_agent(spec.config.clone(), spec.position, spec.seed)?;
        }
        Ok(world)
    }
}
