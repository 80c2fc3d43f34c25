//! Timed sub-behaviors
//!
//! The alert sequence and the search cycle run as explicit step counters
//! advanced by the tick driver. Nothing here blocks or sleeps: the agent
//! advances the clock, then polls due cues one at a time so a cancel issued
//! while handling one cue discards everything after it.

use rand::Rng;
use sentry_math::{consts::TAU, Vec2};
use serde::{Deserialize, Serialize};

/// Family of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    /// "Heard something" look-around choreography
    Alert,
    /// Random re-sampling around the last sighting
    Search,
}

/// A due step of a scheduled task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    /// Toggle facing
    LookAround,
    /// Hide the indicator and start exploring
    AlertFinished,
    /// Pick a new search point and look again
    SearchSample,
    /// Give up and head home
    SearchTimeout,
}

impl Cue {
    /// Whether the task ends with this cue
    pub fn is_terminal(self) -> bool {
        matches!(self, Cue::AlertFinished | Cue::SearchTimeout)
    }
}

/// Alert choreography: look around at `delay` and `2 * delay`, finish at `3 * delay`
#[derive(Debug, Clone, Copy, PartialEq)]
struct AlertSequence {
    delay: f32,
    elapsed: f32,
    step: u32,
}

impl AlertSequence {
    const STEPS: u32 = 3;

    fn poll(&mut self) -> Option<Cue> {
        if self.step >= Self::STEPS {
            return None;
        }
        let due_at = self.delay * (self.step + 1) as f32;
        if self.elapsed < due_at {
            return None;
        }

        self.step += 1;
        Some(if self.step == Self::STEPS {
            Cue::AlertFinished
        } else {
            Cue::LookAround
        })
    }
}

/// Search cycle: a sample at every multiple of `interval` below `duration`,
/// then a timeout at `duration`
#[derive(Debug, Clone, Copy, PartialEq)]
struct SearchCycle {
    interval: f32,
    duration: f32,
    elapsed: f32,
    samples: u32,
}

impl SearchCycle {
    fn next_sample_at(&self) -> Option<f32> {
        let at = self.interval * self.samples as f32;
        (at < self.duration).then_some(at)
    }

    fn poll(&mut self) -> Option<Cue> {
        match self.next_sample_at() {
            Some(at) if self.elapsed >= at => {
                self.samples += 1;
                Some(Cue::SearchSample)
            }
            _ if self.elapsed >= self.duration => Some(Cue::SearchTimeout),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScheduledTask {
    Alert(AlertSequence),
    Search(SearchCycle),
}

impl ScheduledTask {
    fn kind(&self) -> TaskKind {
        match self {
            ScheduledTask::Alert(_) => TaskKind::Alert,
            ScheduledTask::Search(_) => TaskKind::Search,
        }
    }
}

/// Holds at most one running task per agent
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scheduler {
    task: Option<ScheduledTask>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start the alert sequence, cancelling whatever was running
    ///
    /// Returns the kind of the cancelled task, if any.
    pub fn start_alert(&mut self, delay: f32) -> Option<TaskKind> {
        let cancelled = self.cancel();
        self.task = Some(ScheduledTask::Alert(AlertSequence {
            delay,
            elapsed: 0.0,
            step: 0,
        }));
        cancelled
    }

    /// Start a search cycle, cancelling whatever was running
    ///
    /// The first sample is due immediately.
    pub fn start_search(&mut self, duration: f32, interval: f32) -> Option<TaskKind> {
        let cancelled = self.cancel();
        self.task = Some(ScheduledTask::Search(SearchCycle {
            interval,
            duration,
            elapsed: 0.0,
            samples: 0,
        }));
        cancelled
    }

    /// Drop the running task. Calling this with nothing running is a no-op.
    pub fn cancel(&mut self) -> Option<TaskKind> {
        self.task.take().map(|task| task.kind())
    }

    /// Advance the running task's clock
    pub fn advance(&mut self, delta_time: f32) {
        match &mut self.task {
            Some(ScheduledTask::Alert(alert)) => alert.elapsed += delta_time,
            Some(ScheduledTask::Search(search)) => search.elapsed += delta_time,
            None => {}
        }
    }

    /// Take the earliest due cue, clearing the task after a terminal one
    pub fn poll(&mut self) -> Option<Cue> {
        let cue = match &mut self.task {
            Some(ScheduledTask::Alert(alert)) => alert.poll(),
            Some(ScheduledTask::Search(search)) => search.poll(),
            None => None,
        }?;

        if cue.is_terminal() {
            self.task = None;
        }
        Some(cue)
    }

    /// Kind of the running task
    pub fn active(&self) -> Option<TaskKind> {
        self.task.as_ref().map(ScheduledTask::kind)
    }

    pub fn is_idle(&self) -> bool {
        self.task.is_none()
    }

    /// Seconds since the running task started
    pub fn elapsed(&self) -> Option<f32> {
        match &self.task {
            Some(ScheduledTask::Alert(alert)) => Some(alert.elapsed),
            Some(ScheduledTask::Search(search)) => Some(search.elapsed),
            None => None,
        }
    }
}

/// Countdown used for the attack cooldown
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cooldown {
    remaining: f32,
}

impl Cooldown {
    pub fn new(duration: f32) -> Self {
        Self { remaining: duration }
    }

    pub fn advance(&mut self, delta_time: f32) {
        self.remaining = (self.remaining - delta_time).max(0.0);
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}

/// Uniformly distributed point inside a disk
pub fn random_point_in_disk<R: Rng + ?Sized>(rng: &mut R, center: Vec2, radius: f32) -> Vec2 {
    let r = radius * rng.gen::<f32>().sqrt();
    let theta = TAU * rng.gen::<f32>();
    center + Vec2::from_angle(theta) * r
}
