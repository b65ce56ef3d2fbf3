use thiserror::Error;

use hd_behavior::BehaviorError;
use hd_coord::CoordError;
use hd_core::{AgentId, HdError};
use hd_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("runtime configuration error: {0}")]
    Config(String),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error("behavior pool has no enabled entry")]
    EmptyPool,

    #[error(transparent)]
    Core(#[from] HdError),

    #[error("coordination error: {0}")]
    Coord(#[from] CoordError),

    #[error("spatial index error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
