use sir_agent::ListenerKind;
use sir_core::{AgentId, GroupId};
use sir_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A live pedestrian has no recorded group.  The registry is corrupt;
    /// the run must stop.
    #[error("invariant violated: agent {0} has no group")]
    UnassignedAgent(AgentId),

    #[error("agent {0} is not registered with the group model")]
    UnknownAgent(AgentId),

    #[error("agent {0} already belongs to a group")]
    AlreadyAssigned(AgentId),

    #[error("{0} is not a group this model manages")]
    InvalidGroup(GroupId),

    #[error("group model used before initialize()")]
    NotInitialized,

    #[error("a {0:?} listener is already registered with the topography")]
    ListenerConflict(ListenerKind),

    #[error("group model configuration error: {0}")]
    Config(String),

    #[error("attribute parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spatial index error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type ModelResult<T> = Result<T, ModelError>;
