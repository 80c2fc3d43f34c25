//! Agent configuration
//!
//! Author-time tunables, loaded once. Values are validated, never clamped.
//!
//! # Example Config File
//!
//! ```toml
//! base_speed = 1.5
//! vision_range = 9.0
//! hearing_radius = 5.0
//!
//! [role]
//! kind = "guard"
//! post = { x = 4.0, y = 2.0 }
//! ```

use crate::error::ConfigError;
use crate::scene::{layers, LayerMask};
use crate::state::{BehaviorState, Facing};
use sentry_math::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which behavior variant an agent runs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Role {
    /// Walk back and forth between two anchors
    Patrol { anchors: [Vec2; 2] },
    /// Hold a post; attack the target when it comes within range
    Guard {
        post: Vec2,
        #[serde(default = "default_post_facing")]
        post_facing: Facing,
    },
}

impl Role {
    /// State the agent rests in and returns to
    pub fn home_state(&self) -> BehaviorState {
        match self {
            Role::Patrol { .. } => BehaviorState::Patrol,
            Role::Guard { .. } => BehaviorState::Guard,
        }
    }

    pub fn is_guard(&self) -> bool {
        matches!(self, Role::Guard { .. })
    }

    /// Facing used when the config does not set one
    pub fn default_facing(&self) -> Facing {
        match self {
            Role::Patrol { .. } => Facing::Left,
            Role::Guard { .. } => Facing::Right,
        }
    }
}

/// Immutable per-agent configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Walking speed (units per second)
    #[serde(default = "default_base_speed")]
    pub base_speed: f32,
    /// Speed multiplier while chasing
    #[serde(default = "default_chase_multiplier")]
    pub chase_speed_multiplier: f32,
    /// Distance at which a destination counts as reached
    #[serde(default = "default_arrival_tolerance")]
    pub arrival_tolerance: f32,
    /// Forward vision range
    #[serde(default = "default_vision_range")]
    pub vision_range: f32,
    /// Rear vision range is `vision_range / rear_vision_divisor`
    #[serde(default = "default_rear_divisor")]
    pub rear_vision_divisor: f32,
    /// Maximum distance at which target movement is heard
    #[serde(default = "default_hearing_radius")]
    pub hearing_radius: f32,
    /// Radius of the disk searched around the last sighting
    #[serde(default = "default_search_radius")]
    pub search_radius: f32,
    /// Total search time before giving up
    #[serde(default = "default_search_duration")]
    pub search_duration: f32,
    /// Time between search re-samples
    #[serde(default = "default_search_interval")]
    pub search_interval: f32,
    /// Delay between the steps of the alert sequence
    #[serde(default = "default_alert_delay")]
    pub alert_delay: f32,
    /// Attack range (guard only)
    #[serde(default = "default_attack_range")]
    pub attack_range: f32,
    /// Cooldown after each attack (guard only)
    #[serde(default = "default_attack_cooldown")]
    pub attack_cooldown: f32,
    /// Layers the vision ray passes through
    #[serde(default = "default_excluded_layers")]
    pub vision_exclude: LayerMask,
    /// Layers that never occlude hearing
    #[serde(default = "default_excluded_layers")]
    pub hearing_exclude: LayerMask,
    /// Layers ignored by the attack-range check
    #[serde(default = "default_excluded_layers")]
    pub attack_exclude: LayerMask,
    /// Initial facing (defaults per role)
    #[serde(default)]
    pub initial_facing: Option<Facing>,
    /// Behavior variant and its anchors
    pub role: Role,
}

fn default_base_speed() -> f32 { 1.0 }
fn default_chase_multiplier() -> f32 { 2.0 }
fn default_arrival_tolerance() -> f32 { 0.68 }
fn default_vision_range() -> f32 { 7.0 }
fn default_rear_divisor() -> f32 { 3.0 }
fn default_hearing_radius() -> f32 { 6.0 }
fn default_search_radius() -> f32 { 8.0 }
fn default_search_duration() -> f32 { 10.0 }
fn default_search_interval() -> f32 { 2.0 }
fn default_alert_delay() -> f32 { 1.0 }
fn default_attack_range() -> f32 { 4.0 }
fn default_attack_cooldown() -> f32 { 1.5 }
fn default_excluded_layers() -> LayerMask { LayerMask::layer(layers::AGENT) }
fn default_post_facing() -> Facing { Facing::Right }

impl AgentConfig {
    /// Config with default tunables and the given role
    pub fn new(role: Role) -> Self {
        Self {
            base_speed: default_base_speed(),
            chase_speed_multiplier: default_chase_multiplier(),
            arrival_tolerance: default_arrival_tolerance(),
            vision_range: default_vision_range(),
            rear_vision_divisor: default_rear_divisor(),
            hearing_radius: default_hearing_radius(),
            search_radius: default_search_radius(),
            search_duration: default_search_duration(),
            search_interval: default_search_interval(),
            alert_delay: default_alert_delay(),
            attack_range: default_attack_range(),
            attack_cooldown: default_attack_cooldown(),
            vision_exclude: default_excluded_layers(),
            hearing_exclude: default_excluded_layers(),
            attack_exclude: default_excluded_layers(),
            initial_facing: None,
            role,
        }
    }

    /// Patrol agent walking between two anchors
    pub fn patrol(first: Vec2, second: Vec2) -> Self {
        Self::new(Role::Patrol {
            anchors: [first, second],
        })
    }

    /// Guard agent holding a post
    pub fn guard(post: Vec2) -> Self {
        Self::new(Role::Guard {
            post,
            post_facing: default_post_facing(),
        })
    }

    /// Set walking speed and chase multiplier
    pub fn with_speed(mut self, base: f32, chase_multiplier: f32) -> Self {
        self.base_speed = base;
        self.chase_speed_multiplier = chase_multiplier;
        self
    }

    /// Set arrival tolerance
    pub fn with_arrival_tolerance(mut self, tolerance: f32) -> Self {
        self.arrival_tolerance = tolerance;
        self
    }

    /// Set vision range and rear divisor
    pub fn with_vision(mut self, range: f32, rear_divisor: f32) -> Self {
        self.vision_range = range;
        self.rear_vision_divisor = rear_divisor;
        self
    }

    /// Set hearing radius
    pub fn with_hearing_radius(mut self, radius: f32) -> Self {
        self.hearing_radius = radius;
        self
    }

    /// Set search radius, duration and re-sample interval
    pub fn with_search(mut self, radius: f32, duration: f32, interval: f32) -> Self {
        self.search_radius = radius;
        self.search_duration = duration;
        self.search_interval = interval;
        self
    }

    /// Set the alert sequence step delay
    pub fn with_alert_delay(mut self, delay: f32) -> Self {
        self.alert_delay = delay;
        self
    }

    /// Set attack range and cooldown
    pub fn with_attack(mut self, range: f32, cooldown: f32) -> Self {
        self.attack_range = range;
        self.attack_cooldown = cooldown;
        self
    }

    /// Set initial facing
    pub fn with_initial_facing(mut self, facing: Facing) -> Self {
        self.initial_facing = Some(facing);
        self
    }

    /// Facing the agent starts with
    pub fn starting_facing(&self) -> Facing {
        self.initial_facing.unwrap_or_else(|| self.role.default_facing())
    }

    /// Mask used by the vision ray
    pub fn vision_mask(&self) -> LayerMask {
        LayerMask::ALL.without(self.vision_exclude)
    }

    /// Mask used by the hearing occlusion check
    pub fn hearing_mask(&self) -> LayerMask {
        LayerMask::ALL.without(self.hearing_exclude)
    }

    /// Mask used by the attack-range check
    pub fn attack_mask(&self) -> LayerMask {
        LayerMask::ALL.without(self.attack_exclude)
    }

    /// Check every tunable
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("base_speed", self.base_speed),
            ("arrival_tolerance", self.arrival_tolerance),
            ("vision_range", self.vision_range),
            ("hearing_radius", self.hearing_radius),
            ("search_radius", self.search_radius),
            ("search_duration", self.search_duration),
            ("attack_range", self.attack_range),
            ("attack_cooldown", self.attack_cooldown),
        ];
        let positive = [
            ("chase_speed_multiplier", self.chase_speed_multiplier),
            ("rear_vision_divisor", self.rear_vision_divisor),
            ("search_interval", self.search_interval),
            ("alert_delay", self.alert_delay),
        ];

        for &(field, value) in non_negative.iter().chain(positive.iter()) {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite { field });
            }
        }
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }
        for (field, value) in positive {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }

        match self.role {
            Role::Patrol { anchors } => {
                if !anchors.iter().all(|a| a.is_finite()) {
                    return Err(ConfigError::NotFinite { field: "role.anchors" });
                }
            }
            Role::Guard { post, .. } => {
                if !post.is_finite() {
                    return Err(ConfigError::NotFinite { field: "role.post" });
                }
            }
        }

        Ok(())
    }

    /// Parse and validate a TOML config
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_toml_str(&source)?;
        log::info!("Loaded agent config from {}", path.as_ref().display());
        Ok(config)
    }
}
