use gp_core::NodeId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("unknown city profile {0:?}")]
    UnknownCity(String),

    #[error("node {node} not found in a graph of {node_count} nodes")]
    UnknownNode { node: NodeId, node_count: usize },
}

pub type EnvResult<T> = Result<T, EnvError>;
