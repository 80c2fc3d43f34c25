//! Events agents listen for

use sentry_math::Vec2;
use serde::{Deserialize, Serialize};

/// The target displaced this tick
///
/// Published by the host only while the target is actually moving.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TargetMoved {
    pub position: Vec2,
}
