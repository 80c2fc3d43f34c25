//! Outward side effects
//!
//! Attack spawns leave the agent through an [`EffectSink`]. Agents may tick on
//! worker threads, so sinks must be shareable.

use crate::agent::AgentId;
use parking_lot::Mutex;
use sentry_math::Vec2;
use serde::{Deserialize, Serialize};

/// Request to spawn an attack effect at a point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackEffect {
    /// Agent that attacked
    pub agent: AgentId,
    /// Target position at the moment of the attack
    pub position: Vec2,
}

/// Consumer of spawn requests
pub trait EffectSink: Send + Sync {
    fn spawn_attack(&self, effect: AttackEffect);
}

/// Sink that drops everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullEffects;

impl EffectSink for NullEffects {
    fn spawn_attack(&self, _effect: AttackEffect) {}
}

/// Sink that records requests in memory
#[derive(Debug, Default)]
pub struct EffectLog {
    attacks: Mutex<Vec<AttackEffect>>,
}

impl EffectLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every recorded attack
    pub fn take(&self) -> Vec<AttackEffect> {
        std::mem::take(&mut *self.attacks.lock())
    }

    pub fn len(&self) -> usize {
        self.attacks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.attacks.lock().is_empty()
    }
}

impl EffectSink for EffectLog {
    fn spawn_attack(&self, effect: AttackEffect) {
        self.attacks.lock().push(effect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_effect_log_records_from_threads() {
        let log = Arc::new(EffectLog::new());
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let log = Arc::clone(&log);
                std::thread::spawn(move || {
                    log.spawn_attack(AttackEffect {
                        agent: AgentId(i),
                        position: Vec2::new(i as f32, 0.0),
                    });
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(log.len(), 4);
        assert_eq!(log.take().len(), 4);
        assert!(log.is_empty());
    }
}
