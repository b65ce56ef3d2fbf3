use thiserror::Error;

use hd_core::AgentId;

#[derive(Debug, Error)]
pub enum BehaviorError {
    /// The defended entity could not be resolved when the behavior entered.
    #[error("target unavailable for agent {0}")]
    TargetUnavailable(AgentId),

    #[error("invalid behavior config: {0}")]
    InvalidConfig(String),

    #[error("unknown archetype {0:?}")]
    UnknownArchetype(String),

    #[error("behavior pool parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
