//! Agent runtime
//!
//! An [`Agent`] owns its runtime state exclusively. The host drives it with
//! [`Agent::tick`] once per simulation step; hearing arrives through the
//! subscription attached at build time and is consumed at the start of the
//! next tick.

mod guard;
mod states;

use crate::config::{AgentConfig, Role};
use crate::effects::EffectSink;
use crate::error::{AgentError, Result};
use crate::events::TargetMoved;
use crate::navigation::Navigator;
use crate::perception::{self, Audibility};
use crate::presentation::{AgentSnapshot, DebugOverlay, Presentation};
use crate::scene::SceneQuery;
use crate::schedule::{random_point_in_disk, Cue, Scheduler, TaskKind};
use crate::state::{BehaviorState, Facing, Locomotion, PatrolRoute};
use guard::GuardPost;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sentry_event::{EventBus, Subscription};
use sentry_math::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique agent identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct AgentId(pub u64);

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "agent#{}", self.0)
    }
}

/// Inputs shared by every agent for one tick
///
/// The target position must be a single snapshot for the whole tick.
#[derive(Clone, Copy)]
pub struct TickContext<'a> {
    pub delta_time: f32,
    pub target_position: Vec2,
    pub scene: &'a dyn SceneQuery,
    pub effects: &'a dyn EffectSink,
}

impl<'a> TickContext<'a> {
    pub fn new(
        delta_time: f32,
        target_position: Vec2,
        scene: &'a dyn SceneQuery,
        effects: &'a dyn EffectSink,
    ) -> Self {
        Self {
            delta_time,
            target_position,
            scene,
            effects,
        }
    }
}

/// Result of a hearing intake
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HearingOutcome {
    /// Noise was beyond the hearing radius
    OutOfRange { distance: f32 },
    /// Noise was blocked by geometry
    Occluded,
    /// Noise was heard; `transitioned` tells whether the state changed
    Heard { transitioned: bool },
}

/// Variant-specific runtime data
#[derive(Debug, Clone)]
enum Post {
    Patrol(PatrolRoute),
    Guard(GuardPost),
}

/// A perceiving, state-driven NPC
pub struct Agent {
    id: AgentId,
    config: AgentConfig,
    navigator: Box<dyn Navigator>,
    hearing: Subscription<TargetMoved>,
    rng: ChaCha8Rng,

    state: BehaviorState,
    position: Vec2,
    previous_position: Vec2,
    facing: Facing,
    last_known_target: Option<Vec2>,
    heard_target: Option<Vec2>,
    scheduler: Scheduler,
    post: Post,

    presentation: Presentation,
    ticks: u64,
}

impl Agent {
    /// Start building an agent
    pub fn builder(config: AgentConfig) -> AgentBuilder {
        AgentBuilder::new(config)
    }

    /// Run one simulation step
    pub fn tick(&mut self, ctx: &TickContext<'_>) {
        self.ticks += 1;
        self.scheduler.advance(ctx.delta_time);
        if let Post::Guard(post) = &mut self.post {
            post.advance_cooldown(ctx.delta_time);
        }

        self.sync_position();

        if let Some(event) = self.hearing.latest() {
            self.hear(event.position, ctx.scene);
        }
        self.look(ctx.target_position, ctx.scene);
        if self.is_guard() {
            self.check_attack_range(ctx.target_position, ctx.scene);
        }

        states::dispatch(self, ctx);
        self.run_due_cues(ctx);
        self.finish_attack_cooldown(ctx);

        self.navigator.step(ctx.delta_time);
        self.refresh_presentation();
    }

    /// Vision query toward `target`
    ///
    /// On a hit the exact target position becomes the last known position and,
    /// unless already chasing or attacking, the agent drops any running task
    /// and starts chasing. Returns whether the target was seen.
    pub fn look(&mut self, target: Vec2, scene: &dyn SceneQuery) -> bool {
        let report = perception::cast_vision(&self.config, self.position, self.facing, target, scene);

        self.presentation.debug.vision_origin = report.origin;
        self.presentation.debug.vision_end = report.ray_end;
        self.presentation.debug.effective_vision_range = report.effective_range;

        if !report.seen {
            return false;
        }

        self.last_known_target = Some(target);
        if !matches!(self.state, BehaviorState::Chase | BehaviorState::Attack) {
            log::debug!("{} spotted target at {:?}", self.id, target);
            self.scheduler.cancel();
            self.transition(BehaviorState::Chase);
        }
        true
    }

    /// Hearing intake for a noise at `source`
    pub fn hear(&mut self, source: Vec2, scene: &dyn SceneQuery) -> HearingOutcome {
        match perception::check_hearing(&self.config, self.position, source, scene) {
            Audibility::OutOfRange { distance } => {
                log::trace!("{} ignored noise {:.2} away", self.id, distance);
                return HearingOutcome::OutOfRange { distance };
            }
            Audibility::Occluded => {
                log::trace!("{} noise at {:?} occluded", self.id, source);
                return HearingOutcome::Occluded;
            }
            Audibility::Audible => {}
        }

        self.heard_target = Some(source);
        let transitioned = self.state == BehaviorState::Lost || self.state.is_home();
        if transitioned {
            self.enter_warning();
        }
        HearingOutcome::Heard { transitioned }
    }

    /// Guard attack-range check; always false for patrol agents
    ///
    /// Forces a transition to Attack when the target is in range and
    /// unobstructed.
    pub fn check_attack_range(&mut self, target: Vec2, scene: &dyn SceneQuery) -> bool {
        if !self.is_guard() {
            return false;
        }
        if !perception::target_in_attack_range(&self.config, self.position, target, scene) {
            return false;
        }

        if self.state != BehaviorState::Attack {
            log::debug!("{} target in attack range", self.id);
            self.scheduler.cancel();
            self.transition(BehaviorState::Attack);
        }
        true
    }

    pub fn id(&self) -> AgentId {
        self.id
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn state(&self) -> BehaviorState {
        self.state
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn last_known_target(&self) -> Option<Vec2> {
        self.last_known_target
    }

    pub fn heard_target(&self) -> Option<Vec2> {
        self.heard_target
    }

    /// Kind of the running scheduled task
    pub fn active_task(&self) -> Option<TaskKind> {
        self.scheduler.active()
    }

    /// Attack readiness; `None` for patrol agents
    pub fn can_attack(&self) -> Option<bool> {
        match &self.post {
            Post::Guard(post) => Some(post.can_attack),
            Post::Patrol(_) => None,
        }
    }

    /// Patrol route; `None` for guards
    pub fn patrol_route(&self) -> Option<&PatrolRoute> {
        match &self.post {
            Post::Patrol(route) => Some(route),
            Post::Guard(_) => None,
        }
    }

    pub fn is_guard(&self) -> bool {
        matches!(self.post, Post::Guard(_))
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Ticks run so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn snapshot(&self) -> AgentSnapshot {
        AgentSnapshot {
            id: self.id.0,
            tick: self.ticks,
            state: self.state,
            position: self.position,
            facing: self.facing,
            locomotion: self.presentation.locomotion,
            show_alert: self.presentation.show_alert,
            last_known_target: self.last_known_target,
            heard_target: self.heard_target,
            task: self.scheduler.active(),
            can_attack: self.can_attack(),
        }
    }

    fn home_state(&self) -> BehaviorState {
        self.config.role.home_state()
    }

    fn transition(&mut self, next: BehaviorState) {
        if next == self.state {
            return;
        }
        log::debug!("{} {} -> {}", self.id, self.state, next);

        let owned_task = match self.state {
            BehaviorState::Warning => Some(TaskKind::Alert),
            BehaviorState::Lost => Some(TaskKind::Search),
            _ => None,
        };
        if owned_task.is_some() && self.scheduler.active() == owned_task {
            self.scheduler.cancel();
        }
        if self.state == BehaviorState::Warning {
            self.presentation.show_alert = false;
        }
        let consumes_noise = matches!(self.state, BehaviorState::Warning | BehaviorState::Explore);
        if consumes_noise && next != BehaviorState::Explore {
            self.heard_target = None;
        }

        self.state = next;
    }

    fn enter_warning(&mut self) {
        self.transition(BehaviorState::Warning);
        self.scheduler.start_alert(self.config.alert_delay);
        self.presentation.show_alert = true;
        self.navigator.stop();
    }

    /// Read the navigator's position and derive facing from horizontal motion
    fn sync_position(&mut self) {
        self.previous_position = self.position;
        self.position = self.navigator.position();
        if let Some(facing) = Facing::from_delta_x(self.position.x - self.previous_position.x) {
            self.facing = facing;
        }
    }

    fn arrived_at(&self, point: Vec2) -> bool {
        self.position.distance(point) <= self.config.arrival_tolerance
    }

    fn run_due_cues(&mut self, ctx: &TickContext<'_>) {
        while let Some(cue) = self.scheduler.poll() {
            match cue {
                Cue::LookAround => self.facing = self.facing.flipped(),
                Cue::AlertFinished => {
                    self.presentation.show_alert = false;
                    self.transition(BehaviorState::Explore);
                }
                Cue::SearchSample => {
                    let center = self.last_known_target.unwrap_or(self.position);
                    let point = random_point_in_disk(&mut self.rng, center, self.config.search_radius);
                    self.navigator.set_destination(point);
                    self.look(ctx.target_position, ctx.scene);
                }
                Cue::SearchTimeout => {
                    log::debug!("{} gave up searching", self.id);
                    let home = self.home_state();
                    self.transition(home);
                }
            }
        }
    }

    fn refresh_presentation(&mut self) {
        self.presentation.facing = self.facing;
        self.presentation.locomotion = if self.navigator.is_moving() {
            Locomotion::Walking
        } else {
            Locomotion::Idle
        };
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("position", &self.position)
            .field("facing", &self.facing)
            .field("task", &self.scheduler.active())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Agent`]
///
/// A navigator and a hearing subscription are required.
pub struct AgentBuilder {
    config: AgentConfig,
    id: AgentId,
    navigator: Option<Box<dyn Navigator>>,
    subscription: Option<Subscription<TargetMoved>>,
    seed: u64,
}

impl AgentBuilder {
    pub fn new(config: AgentConfig) -> Self {
        Self {
            config,
            id: AgentId::default(),
            navigator: None,
            subscription: None,
            seed: 0,
        }
    }

    pub fn id(mut self, id: AgentId) -> Self {
        self.id = id;
        self
    }

    /// Attach the locomotion adapter
    pub fn navigator(mut self, navigator: impl Navigator + 'static) -> Self {
        self.navigator = Some(Box::new(navigator));
        self
    }

    /// Attach an already boxed locomotion adapter
    pub fn boxed_navigator(mut self, navigator: Box<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// Subscribe to target movement on `bus`
    pub fn listen(mut self, bus: &EventBus) -> Self {
        self.subscription = Some(bus.subscribe::<TargetMoved>());
        self
    }

    /// Use an existing subscription for hearing
    pub fn subscription(mut self, subscription: Subscription<TargetMoved>) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// Seed for search sampling
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Validate the config and assemble the agent
    pub fn build(self) -> Result<Agent> {
        self.config.validate()?;
        let navigator = self
            .navigator
            .ok_or(AgentError::MissingCollaborator("navigator"))?;
        let hearing = self
            .subscription
            .ok_or(AgentError::MissingCollaborator("target movement subscription"))?;

        let post = match self.config.role {
            Role::Patrol { anchors } => Post::Patrol(PatrolRoute::new(anchors[0], anchors[1])),
            Role::Guard { post, post_facing } => Post::Guard(GuardPost::new(post, post_facing)),
        };

        let position = navigator.position();
        let facing = self.config.starting_facing();
        let state = self.config.role.home_state();
        let attack_radius = matches!(post, Post::Guard(_)).then_some(self.config.attack_range);

        log::info!("Spawned {} as {} at ({:.2}, {:.2})", self.id, state, position.x, position.y);

        Ok(Agent {
            id: self.id,
            navigator,
            hearing,
            rng: ChaCha8Rng::seed_from_u64(self.seed),
            state,
            position,
            previous_position: position,
            facing,
            last_known_target: None,
            heard_target: None,
            scheduler: Scheduler::new(),
            post,
            presentation: Presentation {
                facing,
                locomotion: Locomotion::Idle,
                show_alert: false,
                debug: DebugOverlay {
                    vision_origin: position,
                    vision_end: position,
                    effective_vision_range: self.config.vision_range,
                    hearing_radius: self.config.hearing_radius,
                    attack_radius,
                },
            },
            ticks: 0,
            config: self.config,
        })
    }
}
