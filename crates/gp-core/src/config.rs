//! Top-level simulation configuration.

use crate::{CoreError, CoreResult};

/// Configuration for one controller instance.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the controller builder.  `Default` carries the reference constants.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Nodes per grid side; the city has `grid_size²` nodes.
    pub grid_size: u32,

    /// Base road length between adjacent grid nodes.
    pub spacing: f64,

    /// Chance that a grid cell also gets its down-right diagonal road.
    pub diagonal_probability: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Real-time interval between environment ticks.
    pub update_interval_ms: u64,

    /// Number of simulated fleet vehicles.
    pub fleet_size: u16,

    /// Episodes per training batch; progress is reported between batches.
    pub training_batch_size: usize,

    /// Virtual clock origin (minutes from midnight) for training and
    /// inference walks.  Default: 480 (08:00).
    pub start_minute: f64,

    /// Attempts made against the weather collaborator before falling back
    /// to a simulated update.
    pub weather_sync_retries: u32,

    /// Name of the initial city profile.
    pub city: String,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            grid_size:            8,
            spacing:              100.0,
            diagonal_probability: 0.4,
            seed:                 42,
            update_interval_ms:   3_000,
            fleet_size:           5,
            training_batch_size:  25,
            start_minute:         480.0,
            weather_sync_retries: 3,
            city:                 "Generic".to_string(),
        }
    }
}

impl SimConfig {
    /// Reject configurations the generator or scheduler cannot honour.
    pub fn validate(&self) -> CoreResult<()> {
        if self.grid_size < 2 {
            return Err(CoreError::Config(format!("grid_size must be >= 2, got {}", self.grid_size)));
        }
        if !(self.spacing > 0.0) {
            return Err(CoreError::Config(format!("spacing must be positive, got {}", self.spacing)));
        }
        if !(0.0..=1.0).contains(&self.diagonal_probability) {
            return Err(CoreError::Config(format!(
                "diagonal_probability must be in [0, 1], got {}",
                self.diagonal_probability
            )));
        }
        if self.update_interval_ms == 0 {
            return Err(CoreError::Config("update_interval_ms must be non-zero".into()));
        }
        if self.training_batch_size == 0 {
            return Err(CoreError::Config("training_batch_size must be non-zero".into()));
        }
        Ok(())
    }

    /// Total node count of the generated grid.
    #[inline]
    pub fn node_count(&self) -> usize {
        (self.grid_size as usize) * (self.grid_size as usize)
    }
}
