//! Run-history records and the persistence collaborator.

use std::convert::Infallible;
use std::fmt;

use gp_core::{DeliveryConstraint, NodeId, Priority, RouteResult, VehicleConstraints, VehicleType};
use gp_env::EnvironmentSnapshot;

/// Which engine produced a route.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Algorithm {
    Rl,
    Dijkstra,
}

impl Algorithm {
    pub fn as_str(self) -> &'static str {
        match self {
            Algorithm::Rl => "rl",
            Algorithm::Dijkstra => "dijkstra",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One persisted comparison result.  A comparison run emits two: one per
/// algorithm, sharing the same environment snapshot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunRecord {
    pub algorithm: Algorithm,
    pub start: NodeId,
    pub goal: NodeId,
    pub priority: Priority,
    pub vehicle_type: VehicleType,
    pub total_fuel: f64,
    pub total_time: f64,
    pub total_distance: f64,
    pub co2_emissions: f64,
    pub path: Vec<NodeId>,
    pub fallback: bool,
    pub environment: EnvironmentSnapshot,
}

impl RunRecord {
    pub fn new(
        algorithm: Algorithm,
        start: NodeId,
        goal: NodeId,
        constraints: &DeliveryConstraint,
        vehicle: &VehicleConstraints,
        route: &RouteResult,
        environment: EnvironmentSnapshot,
    ) -> Self {
        Self {
            algorithm,
            start,
            goal,
            priority: constraints.priority,
            vehicle_type: vehicle.vehicle_type,
            total_fuel: route.total_fuel,
            total_time: route.total_time,
            total_distance: route.total_distance,
            co2_emissions: route.co2_emissions,
            path: route.path.clone(),
            fallback: route.fallback,
            environment,
        }
    }

    /// Path as `"0,1,9"`.
    pub fn path_string(&self) -> String {
        self.path.iter().map(|n| n.0.to_string()).collect::<Vec<_>>().join(",")
    }
}

// ── RunLog ────────────────────────────────────────────────────────────────────

/// Sink for comparison results.
///
/// The controller never lets a `RunLog` error escape a comparison: failures
/// are logged with `tracing::warn!` and the routes are still returned.
pub trait RunLog {
    type Error: std::error::Error;

    fn record(&mut self, record: &RunRecord) -> Result<(), Self::Error>;

    /// Flush buffered output.  Idempotent.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Discards every record.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopRunLog;

impl RunLog for NoopRunLog {
    type Error = Infallible;

    fn record(&mut self, _record: &RunRecord) -> Result<(), Infallible> {
        Ok(())
    }
}

// ── ComparisonMetrics ─────────────────────────────────────────────────────────

/// Head-to-head tally of comparison runs.  The agent wins a comparison when
/// its route burns strictly less fuel than the baseline's.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonMetrics {
    pub comparisons: u64,
    pub rl_wins: u64,
}

impl ComparisonMetrics {
    pub fn observe(&mut self, rl_fuel: f64, dijkstra_fuel: f64) {
        self.comparisons += 1;
        if rl_fuel < dijkstra_fuel {
            self.rl_wins += 1;
        }
    }

    /// Fraction of comparisons won by the agent; `0.0` before any run.
    pub fn win_rate(&self) -> f64 {
        if self.comparisons == 0 {
            0.0
        } else {
            self.rl_wins as f64 / self.comparisons as f64
        }
    }

    /// Tally a record history.  Each `rl` record is paired with the next
    /// `dijkstra` record for the same start and goal; unpaired records are
    /// ignored.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a RunRecord>) -> Self {
        let mut metrics = Self::default();
        let mut pending: Option<&RunRecord> = None;
        for record in records {
            match record.algorithm {
                Algorithm::Rl => pending = Some(record),
                Algorithm::Dijkstra => {
                    if let Some(rl) = pending.take()
                        && rl.start == record.start
                        && rl.goal == record.goal
                    {
                        metrics.observe(rl.total_fuel, record.total_fuel);
                    }
                }
            }
        }
        metrics
    }
}
