use gp_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error("invalid agent parameter: {0}")]
    InvalidParams(String),
}

pub type AgentResult<T> = Result<T, AgentError>;
