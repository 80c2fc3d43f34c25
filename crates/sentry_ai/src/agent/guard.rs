//! Guard variant: post holding and the cooldown-gated attack cycle

use super::{Agent, Post, TickContext};
use crate::effects::AttackEffect;
use crate::perception;
use crate::schedule::Cooldown;
use crate::state::{BehaviorState, Facing};
use sentry_math::Vec2;

/// Runtime data of a guard
#[derive(Debug, Clone)]
pub(super) struct GuardPost {
    pub(super) post: Vec2,
    pub(super) post_facing: Facing,
    /// False while an attack cycle is in flight
    pub(super) can_attack: bool,
    pub(super) cooldown: Option<Cooldown>,
}

impl GuardPost {
    pub(super) fn new(post: Vec2, post_facing: Facing) -> Self {
        Self {
            post,
            post_facing,
            can_attack: true,
            cooldown: None,
        }
    }

    pub(super) fn advance_cooldown(&mut self, delta_time: f32) {
        if let Some(cooldown) = &mut self.cooldown {
            cooldown.advance(delta_time);
        }
    }
}

impl Agent {
    /// Spawn an attack at the target and start the cooldown
    ///
    /// No-op while a previous attack is still cooling down.
    pub(super) fn begin_attack(&mut self, ctx: &TickContext<'_>) {
        let cooldown = self.config.attack_cooldown;
        let Post::Guard(post) = &mut self.post else {
            return;
        };
        if !post.can_attack {
            return;
        }

        post.can_attack = false;
        post.cooldown = Some(Cooldown::new(cooldown));
        self.navigator.stop();

        log::debug!("{} attacks at {:?}", self.id, ctx.target_position);
        ctx.effects.spawn_attack(AttackEffect {
            agent: self.id,
            position: ctx.target_position,
        });
    }

    /// Re-evaluate once the cooldown has run out, then re-arm
    pub(super) fn finish_attack_cooldown(&mut self, ctx: &TickContext<'_>) {
        let Post::Guard(post) = &mut self.post else {
            return;
        };
        if !post.cooldown.map_or(false, |c| c.is_finished()) {
            return;
        }
        post.cooldown = None;

        let in_range = perception::target_in_attack_range(
            &self.config,
            self.position,
            ctx.target_position,
            ctx.scene,
        );
        if !in_range && self.state == BehaviorState::Attack {
            if self.look(ctx.target_position, ctx.scene) {
                self.transition(BehaviorState::Chase);
            } else {
                self.transition(BehaviorState::Guard);
            }
        }

        if let Post::Guard(post) = &mut self.post {
            post.can_attack = true;
        }
    }

    /// Walk back to the post and face outward once there
    pub(super) fn hold_post(&mut self) {
        let Post::Guard(post) = &self.post else {
            return;
        };
        let (target, facing) = (post.post, post.post_facing);

        if self.arrived_at(target) {
            self.navigator.stop();
            self.facing = facing;
        } else {
            self.navigator.set_speed(self.config.base_speed);
            self.navigator.set_destination(target);
        }
    }
}
