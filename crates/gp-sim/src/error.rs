use gp_agent::AgentError;
use gp_core::CoreError;
use gp_env::EnvError;
use gp_network::NetworkError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] CoreError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Environment(#[from] EnvError),

    #[error(transparent)]
    Agent(#[from] AgentError),
}

pub type SimResult<T> = Result<T, SimError>;
