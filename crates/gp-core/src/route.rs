//! Route results shared by the router and the learning agent.
//!
//! A [`RouteResult`] is an immutable value: once built it is handed to the
//! caller (UI, persistence) and never mutated.  Both routing engines build
//! results through [`RouteBuilder`], which applies the shared cost model so
//! the two engines report fuel and time on exactly the same scale.

use std::fmt;

use crate::cost;
use crate::{Edge, NodeId, VehicleType};

/// Nominal distance reported when no path exists between start and goal.
pub const FALLBACK_DISTANCE: f64 = 5_000.0;

// ── StepReason ────────────────────────────────────────────────────────────────

/// Human-readable explanation attached to each agent step.  Purely
/// explanatory; never feeds back into a decision.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StepReason {
    HeavyTraffic,
    WeatherImpact,
    LowRange,
    CriticalPriority,
    Optimal,
}

impl StepReason {
    pub fn as_str(self) -> &'static str {
        match self {
            StepReason::HeavyTraffic     => "Heavy traffic but shortest fuel path.",
            StepReason::WeatherImpact    => "Weather impact significant, but safe.",
            StepReason::LowRange         => "Low range, prioritizing energy efficiency.",
            StepReason::CriticalPriority => "Critical priority: fastest route chosen regardless of cost.",
            StepReason::Optimal          => "Optimal path found.",
        }
    }
}

impl fmt::Display for StepReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── RouteStep / RouteResult ───────────────────────────────────────────────────

/// One traversed edge of a route, keyed by the node it arrives at.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteStep {
    pub node: NodeId,
    pub fuel: f64,
    pub time: f64,
    pub traffic: f64,
    pub weather: f64,
    pub reason: Option<StepReason>,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteResult {
    /// Ordered nodes from start to the last node reached.
    pub path: Vec<NodeId>,
    pub total_fuel: f64,
    /// Minutes.
    pub total_time: f64,
    pub total_distance: f64,
    pub co2_emissions: f64,
    pub steps: Vec<RouteStep>,
    /// `true` when the router found no path and reported the nominal
    /// [`FALLBACK_DISTANCE`] estimate instead.
    pub fallback: bool,
}

impl RouteResult {
    /// The degraded-but-defined answer for an unreachable goal: a direct
    /// `[start, goal]` hop of [`FALLBACK_DISTANCE`] under neutral conditions.
    pub fn fallback(start: NodeId, goal: NodeId, vehicle: VehicleType) -> Self {
        let nominal = Edge::new(start, goal, FALLBACK_DISTANCE, 0.0);
        let total_fuel = cost::segment_fuel(&nominal, 1.0, 1.0, vehicle);
        RouteResult {
            path: vec![start, goal],
            total_fuel,
            total_time: cost::segment_time(&nominal, 1.0, 1.0),
            total_distance: FALLBACK_DISTANCE,
            co2_emissions: cost::co2(total_fuel, vehicle),
            steps: Vec::new(),
            fallback: true,
        }
    }

    pub fn start(&self) -> Option<NodeId> {
        self.path.first().copied()
    }

    pub fn end(&self) -> Option<NodeId> {
        self.path.last().copied()
    }

    /// `true` if the path runs from `start` to `goal`.
    pub fn connects(&self, start: NodeId, goal: NodeId) -> bool {
        self.start() == Some(start) && self.end() == Some(goal)
    }

    /// Number of traversed edges.
    pub fn hop_count(&self) -> usize {
        self.steps.len()
    }
}

// ── RouteBuilder ──────────────────────────────────────────────────────────────

/// Accumulates per-edge costs into a [`RouteResult`].
///
/// ```
/// use gp_core::{Edge, NodeId, RouteBuilder, VehicleType};
///
/// let mut b = RouteBuilder::new(NodeId(0), VehicleType::Petrol);
/// b.push(&Edge::new(NodeId(0), NodeId(1), 100.0, 0.0), 1.0, 1.0, None);
/// let route = b.finish();
/// assert_eq!(route.path, vec![NodeId(0), NodeId(1)]);
/// assert!((route.total_fuel - 0.025).abs() < 1e-12);
/// ```
pub struct RouteBuilder {
    vehicle: VehicleType,
    path: Vec<NodeId>,
    steps: Vec<RouteStep>,
    total_fuel: f64,
    total_time: f64,
    total_distance: f64,
}

impl RouteBuilder {
    pub fn new(start: NodeId, vehicle: VehicleType) -> Self {
        Self {
            vehicle,
            path: vec![start],
            steps: Vec::new(),
            total_fuel: 0.0,
            total_time: 0.0,
            total_distance: 0.0,
        }
    }

    /// Append the traversal of `edge` under the given conditions and return
    /// the recorded step.
    pub fn push(
        &mut self,
        edge: &Edge,
        traffic: f64,
        weather: f64,
        reason: Option<StepReason>,
    ) -> &RouteStep {
        let fuel = cost::segment_fuel(edge, traffic, weather, self.vehicle);
        let time = cost::segment_time(edge, traffic, weather);

        self.total_fuel += fuel;
        self.total_time += time;
        self.total_distance += edge.distance;
        self.path.push(edge.to);
        self.steps.push(RouteStep { node: edge.to, fuel, time, traffic, weather, reason });
        &self.steps[self.steps.len() - 1]
    }

    pub fn total_fuel(&self) -> f64 {
        self.total_fuel
    }

    pub fn total_time(&self) -> f64 {
        self.total_time
    }

    pub fn finish(self) -> RouteResult {
        RouteResult {
            co2_emissions: cost::co2(self.total_fuel, self.vehicle),
            path: self.path,
            total_fuel: self.total_fuel,
            total_time: self.total_time,
            total_distance: self.total_distance,
            steps: self.steps,
            fallback: false,
        }
    }
}
