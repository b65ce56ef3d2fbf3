//! Error type for the core value types.
//!
//! Sub-crates keep their own error enums and wrap `HdError` as one variant.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HdError {
    #[error("configuration error: {0}")]
    Config(String),
}

pub type HdResult<T> = Result<T, HdError>;
