//! Error types for agent configuration and construction

use thiserror::Error;

/// Result type for agent operations
pub type Result<T> = std::result::Result<T, AgentError>;

/// Configuration validation and loading failures
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A radius, speed or duration is negative
    #[error("'{field}' must not be negative (got {value})")]
    Negative { field: &'static str, value: f32 },

    /// A value that must be strictly positive is zero or negative
    #[error("'{field}' must be greater than zero (got {value})")]
    NonPositive { field: &'static str, value: f32 },

    /// NaN or infinity
    #[error("'{field}' must be a finite number")]
    NotFinite { field: &'static str },

    /// Malformed config file
    #[error("Failed to parse agent config: {0}")]
    Parse(#[from] toml::de::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Name of the offending field, for validation errors
    pub fn field(&self) -> Option<&'static str> {
        match self {
            ConfigError::Negative { field, .. }
            | ConfigError::NonPositive { field, .. }
            | ConfigError::NotFinite { field } => Some(field),
            ConfigError::Parse(_) | ConfigError::Io(_) => None,
        }
    }
}

/// Errors raised while building an agent
#[derive(Debug, Error)]
pub enum AgentError {
    /// A required collaborator was never attached
    #[error("Agent is missing required collaborator: {0}")]
    MissingCollaborator(&'static str),

    /// Configuration failed validation
    #[error("Invalid agent configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}
