//! Fixed-step runner: move the target, then tick the world

use crate::error::Result;
use crate::scenario::Scenario;
use crate::target::TargetRoute;
use crate::world::World;

/// A world plus the script driving its target
pub struct Simulation {
    world: World,
    route: Option<TargetRoute>,
    delta_time: f32,
    threads: usize,
}

impl Simulation {
    pub fn new(world: World, route: Option<TargetRoute>, delta_time: f32, threads: usize) -> Self {
        Self {
            world,
            route,
            delta_time,
            threads,
        }
    }

    /// Build the world described by `scenario`
    pub fn from_scenario(scenario: &Scenario) -> Result<Self> {
        Ok(Self::new(
            scenario.build_world()?,
            scenario.target.route.clone(),
            scenario.delta_time,
            scenario.threads,
        ))
    }

    /// Advance one tick
    pub fn step(&mut self) -> Result<()> {
        if let Some(route) = &mut self.route {
            let next = route.advance(self.world.target(), self.delta_time);
            self.world.move_target(next);
        }

        if self.threads > 1 {
            self.world.step_parallel(self.delta_time, self.threads)
        } else {
            self.world.step(self.delta_time);
            Ok(())
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    pub fn set_delta_time(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
    }

    pub fn set_threads(&mut self, threads: usize) {
        self.threads = threads;
    }
}
