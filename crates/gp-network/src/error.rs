//! Network-subsystem error type.

use thiserror::Error;

use gp_core::NodeId;

/// Errors produced by `gp-network`.
///
/// An unreachable goal is not an error; the router answers it with
/// [`RouteResult::fallback`](gp_core::RouteResult::fallback).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {node} not found in a graph of {node_count} nodes")]
    UnknownNode { node: NodeId, node_count: usize },
}

pub type NetworkResult<T> = Result<T, NetworkError>;
