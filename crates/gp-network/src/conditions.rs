//! Live edge conditions consumed by routers.
//!
//! The router only needs three readings per relaxation: the traffic factor
//! of the road, the weather impact at the destination node, and whether the
//! destination is flooded.  Putting them behind a trait keeps this crate
//! independent of the environment model and lets tests route under fixed,
//! hand-picked conditions.

use gp_core::NodeId;

pub trait EdgeConditions {
    /// Congestion multiplier for the road `from → to` (incidents included).
    fn traffic_factor(&self, from: NodeId, to: NodeId) -> f64;

    /// Weather multiplier at `node` (flooding included).
    fn weather_impact(&self, node: NodeId) -> f64;

    fn is_flooded(&self, node: NodeId) -> bool;
}

/// The same traffic and weather everywhere, plus an optional set of flooded
/// nodes.
#[derive(Clone, Debug)]
pub struct UniformConditions {
    pub traffic: f64,
    pub weather: f64,
    pub flooded: Vec<NodeId>,
}

impl UniformConditions {
    pub fn new(traffic: f64, weather: f64) -> Self {
        Self { traffic, weather, flooded: Vec::new() }
    }

    /// Neutral conditions: traffic 1.0, weather 1.0, nothing flooded.
    pub fn neutral() -> Self {
        Self::new(1.0, 1.0)
    }

    pub fn with_flooded(mut self, node: NodeId) -> Self {
        self.flooded.push(node);
        self
    }
}

impl EdgeConditions for UniformConditions {
    fn traffic_factor(&self, _from: NodeId, _to: NodeId) -> f64 {
        self.traffic
    }

    fn weather_impact(&self, _node: NodeId) -> f64 {
        self.weather
    }

    fn is_flooded(&self, node: NodeId) -> bool {
        self.flooded.contains(&node)
    }
}
