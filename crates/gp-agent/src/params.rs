//! Learning hyperparameters.

use crate::{AgentError, AgentResult};

/// Fixed hyperparameters of the tabular learner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AgentParams {
    /// α
    pub learning_rate: f64,
    /// γ
    pub discount: f64,
    /// ε — chance of a uniformly random move during training.
    pub epsilon: f64,
    pub max_training_steps: usize,
    pub max_inference_steps: usize,
    /// Minutes ahead used for the predicted-traffic term of the reward.
    pub prediction_horizon: u32,
    /// Added to the reward of the transition that reaches the goal.
    pub goal_reward: f64,
    /// Virtual clock origin (minutes from midnight) for every walk.
    pub start_minute: f64,
}

impl Default for AgentParams {
    fn default() -> Self {
        Self {
            learning_rate:       0.1,
            discount:            0.9,
            epsilon:             0.1,
            max_training_steps:  50,
            max_inference_steps: 100,
            prediction_horizon:  15,
            goal_reward:         5_000.0,
            start_minute:        480.0,
        }
    }
}

impl AgentParams {
    pub fn with_start_minute(mut self, minute: f64) -> Self {
        self.start_minute = minute;
        self
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn validate(&self) -> AgentResult<()> {
        let unit = |name: &str, v: f64| {
            if (0.0..=1.0).contains(&v) {
                Ok(())
            } else {
                Err(AgentError::InvalidParams(format!("{name} must be in [0, 1], got {v}")))
            }
        };
        unit("learning_rate", self.learning_rate)?;
        unit("discount", self.discount)?;
        unit("epsilon", self.epsilon)?;
        if self.max_training_steps == 0 || self.max_inference_steps == 0 {
            return Err(AgentError::InvalidParams("step limits must be non-zero".into()));
        }
        Ok(())
    }
}
