//! Discretised learner state.

use gp_core::NodeId;
use gp_network::CityGraph;

use crate::AgentEnvironment;

/// Number of buckets per continuous signal.
pub const LEVELS: u8 = 5;

/// `floor(value · 5)` clamped to `0..=4`.
#[inline]
pub fn quantize(value: f64) -> u8 {
    let bucket = (value * LEVELS as f64).floor();
    if bucket.is_nan() || bucket < 0.0 {
        0
    } else {
        (bucket as u8).min(LEVELS - 1)
    }
}

/// Q-table key: node plus coarse traffic, weather and incident signals.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QState {
    pub node: NodeId,
    pub traffic_level: u8,
    pub weather_level: u8,
    pub incident: bool,
}

impl QState {
    /// Build a state from raw signals in `[0, 1]`.
    pub fn new(node: NodeId, traffic: f64, weather: f64, incident: bool) -> Self {
        Self {
            node,
            traffic_level: quantize(traffic),
            weather_level: quantize(weather),
            incident,
        }
    }

    /// Observe the live state at `node`.
    ///
    /// Traffic signal: mean current factor over the node's outgoing roads,
    /// halved to map the `[0, 2]` factor range onto `[0, 1]`.  Weather
    /// signal: the global rain level.
    pub fn observe(graph: &CityGraph, env: &dyn AgentEnvironment, node: NodeId) -> Self {
        let edges = graph.edges_from(node);
        let traffic = if edges.is_empty() {
            0.0
        } else {
            edges.iter().map(|e| env.traffic_factor(node, e.to)).sum::<f64>() / edges.len() as f64
        };
        Self::new(node, traffic / 2.0, env.rain_level(), env.has_incident(node))
    }
}
