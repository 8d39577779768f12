//! `gp-agent` — tabular Q-learning for delivery routing.
//!
//! The agent learns over a coarse state space (node × traffic bucket ×
//! weather bucket × incident flag) and then walks the learned table
//! greedily, refusing any move the vehicle cannot afford.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                      |
//! |-------------|---------------------------------------------------------------|
//! | [`params`]  | `AgentParams` — α, γ, ε, step limits, forecast horizon        |
//! | [`env`]     | `AgentEnvironment` — read-only view the agent learns from     |
//! | [`state`]   | `QState`, `quantize`                                          |
//! | [`table`]   | `QTable` — sparse state → action → value store                |
//! | [`reward`]  | Priority-weighted reward with hard-infeasibility penalties    |
//! | [`rollout`] | One training episode and its replayable transitions           |
//! | [`agent`]   | `QLearningAgent` — `train`, `train_batch`, `find_route`       |
//! | [`error`]   | `AgentError`, `AgentResult<T>`                                |
//!
//! All fuel and time figures come from [`gp_core::cost`], the same model the
//! Dijkstra baseline uses, so the two are compared on equal terms.
//!
//! # Feature flags
//!
//! | Flag       | Effect                                                        |
//! |------------|---------------------------------------------------------------|
//! | `parallel` | Rolls out each training batch on Rayon's thread pool.         |
//! | `serde`    | Serialize `AgentParams` and `QState`.                         |

pub mod agent;
pub mod env;
pub mod error;
pub mod params;
pub mod reward;
pub mod rollout;
pub mod state;
pub mod table;


pub use agent::QLearningAgent;
pub use env::AgentEnvironment;
pub use error::{AgentError, AgentResult};
pub use params::AgentParams;
pub use reward::{StepObservation, reward};
pub use state::{QState, quantize};
pub use table::QTable;
