//! Channel-backed effect sink shared by worker threads

use crossbeam_channel::{Receiver, Sender};
use sentry_ai::{AttackEffect, EffectSink};

/// Sending half handed to agents
#[derive(Debug, Clone)]
pub struct ChannelEffects {
    sender: Sender<AttackEffect>,
}

impl EffectSink for ChannelEffects {
    fn spawn_attack(&self, effect: AttackEffect) {
        if self.sender.send(effect).is_err() {
            log::warn!("Dropped attack effect from {}: receiver gone", effect.agent);
        }
    }
}

/// Create a connected sink and receiver
pub fn effect_channel() -> (ChannelEffects, Receiver<AttackEffect>) {
    let (sender, receiver) = crossbeam_channel::unbounded();
    (ChannelEffects { sender }, receiver)
}
