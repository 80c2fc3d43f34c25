//! Simulation world
//!
//! Owns the event bus, the scene and every agent. Each step takes one target
//! snapshot and ticks all agents against it, either on the calling thread or
//! spread over scoped worker threads.

use crate::error::{Result, SimError};
use crate::scene::Scene;
use crate::sink::{effect_channel, ChannelEffects};
use crossbeam_channel::Receiver;
use sentry_ai::prelude::*;
use sentry_event::EventBus;

/// Radius of agent body colliders
pub const AGENT_BODY_RADIUS: f32 = 0.4;

struct AgentSlot {
    agent: Agent,
    body: ColliderId,
}

/// Headless world hosting agents and one target
pub struct World {
    bus: EventBus,
    scene: Scene,
    target: Vec2,
    agents: Vec<AgentSlot>,
    effects: ChannelEffects,
    effect_rx: Receiver<AttackEffect>,
    next_agent_id: u64,
    ticks: u64,
}

impl World {
    /// World around `scene` with the target starting at `target`
    pub fn new(mut scene: Scene, target: Vec2) -> Self {
        scene.set_target(target);
        let (effects, effect_rx) = effect_channel();

        Self {
            bus: EventBus::new(),
            scene,
            target,
            agents: Vec::new(),
            effects,
            effect_rx,
            next_agent_id: 0,
            ticks: 0,
        }
    }

    /// Build and register an agent standing at `position`
    pub fn spawn_agent(&mut self, config: AgentConfig, position: Vec2, seed: u64) -> Result<AgentId> {
        let id = AgentId(self.next_agent_id);
        let agent = Agent::builder(config)
            .id(id)
            .navigator(StraightLineNavigator::new(position))
            .listen(&self.bus)
            .seed(seed)
            .build()?;

        self.next_agent_id += 1;
        let body = self
            .scene
            .add_circle(position, AGENT_BODY_RADIUS, layers::AGENT, ColliderTag::Agent);
        self.agents.push(AgentSlot { agent, body });
        Ok(id)
    }

    /// Remove an agent; its hearing subscription is released with it
    pub fn despawn_agent(&mut self, id: AgentId) -> Result<()> {
        let index = self
            .agents
            .iter()
            .position(|slot| slot.agent.id() == id)
            .ok_or(SimError::UnknownAgent(id))?;

        let slot = self.agents.remove(index);
        self.scene.remove(slot.body);
        log::info!("Despawned {}", id);
        Ok(())
    }

    /// Move the target; a hearing event goes out only when it actually moved
    pub fn move_target(&mut self, position: Vec2) -> bool {
        if position == self.target {
            return false;
        }
        self.target = position;
        self.scene.set_target(position);
        let listeners = self.bus.publish(TargetMoved { position });
        log::trace!("Target moved to {:?}, {} listeners", position, listeners);
        true
    }

    fn sync_bodies(&mut self) {
        for slot in &self.agents {
            self.scene.move_circle(slot.body, slot.agent.position());
        }
    }

    /// Tick every agent on the calling thread
    pub fn step(&mut self, delta_time: f32) {
        self.sync_bodies();
        let ctx = TickContext::new(delta_time, self.target, &self.scene, &self.effects);
        for slot in &mut self.agents {
            slot.agent.tick(&ctx);
        }
        self.ticks += 1;
    }

    /// Tick agents on up to `threads` scoped worker threads
    ///
    /// Each agent is owned by exactly one worker for the duration of the step.
    pub fn step_parallel(&mut self, delta_time: f32, threads: usize) -> Result<()> {
        self.sync_bodies();
        if self.agents.is_empty() {
            self.ticks += 1;
            return Ok(());
        }

        let chunk_size = self.agents.len().div_ceil(threads.max(1));
        let ctx = TickContext::new(delta_time, self.target, &self.scene, &self.effects);
        let agents = &mut self.agents;

        crossbeam_utils::thread::scope(|scope| {
            for chunk in agents.chunks_mut(chunk_size) {
                scope.spawn(move |_| {
                    for slot in chunk {
                        slot.agent.tick(&ctx);
                    }
                });
            }
        })
        .map_err(|_| SimError::WorkerPanicked(self.ticks))?;

        self.ticks += 1;
        Ok(())
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.iter().map(|slot| &slot.agent).find(|agent| agent.id() == id)
    }

    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.iter().map(|slot| &slot.agent)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Snapshots of every agent, in spawn order
    pub fn snapshots(&self) -> Vec<AgentSnapshot> {
        self.agents().map(Agent::snapshot).collect()
    }

    /// Take every attack spawned since the last drain
    pub fn drain_effects(&self) -> Vec<AttackEffect> {
        self.effect_rx.try_iter().collect()
    }

    /// Bus the world publishes target movement on
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Live hearing subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count::<TargetMoved>()
    }

    pub fn target(&self) -> Vec2 {
        self.target
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
