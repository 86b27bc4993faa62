//! Error types for graph operations.

use thiserror::Error;

use crate::component::ContentHash;

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("unknown component id `{0}`")]
    UnknownComponent(ContentHash),

    #[error("graph has not been built; call `build()` first")]
    NotBuilt,

    #[error("failed to serialize graph: {0}")]
    Serialization(#[from] serde_json::Error),
}
