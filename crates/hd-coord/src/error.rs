//! Coordination error type.

use thiserror::Error;

use hd_core::{AgentId, PackId};

#[derive(Debug, Error)]
pub enum CoordError {
    #[error("pack {0} does not exist")]
    PackNotFound(PackId),

    #[error("pack {pack} is full ({size} members)")]
    PackFull { pack: PackId, size: usize },

    #[error("agent {0} is already in a pack")]
    AlreadyMember(AgentId),

    #[error("attack slot capacity must be at least 1, got {0}")]
    InvalidCapacity(usize),
}

pub type CoordResult<T> = Result<T, CoordError>;
