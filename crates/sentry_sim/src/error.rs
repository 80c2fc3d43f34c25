//! Simulation errors

use sentry_ai::{AgentError, AgentId};
use thiserror::Error;

/// Result type for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;

#[derive(Debug, Error)]
pub enum SimError {
    /// An agent could not be built
    #[error("Failed to spawn agent: {0}")]
    Agent(#[from] AgentError),

    /// No agent with this id
    #[error("Unknown agent: {0}")]
    UnknownAgent(AgentId),

    /// Malformed scenario file
    #[error("Failed to parse scenario: {0}")]
    Parse(#[from] toml::de::Error),

    /// Scenario values that cannot be simulated
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),

    /// Trace output failed
    #[error("Failed to write trace: {0}")]
    Trace(#[from] serde_json::Error),

    /// A worker thread panicked during a parallel step
    #[error("Worker thread panicked during tick {0}")]
    WorkerPanicked(u64),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
