//! Spatial-subsystem error type.

use thiserror::Error;

use hd_core::AgentId;

/// Errors produced by `hd-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("agent {0} has a non-finite position")]
    NonFinitePosition(AgentId),

    #[error("agent {0} was indexed twice")]
    DuplicateAgent(AgentId),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
