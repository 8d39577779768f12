//! What the agent needs to read from its surroundings.

use gp_core::NodeId;
use gp_env::DynamicEnvironment;
use gp_network::EdgeConditions;

/// Read-only view of the environment used for states and rewards.
///
/// `Sync` so episodes can be rolled out on several threads against the same
/// environment.
pub trait AgentEnvironment: EdgeConditions + Sync {
    fn predicted_traffic(&self, from: NodeId, to: NodeId, offset_minutes: u32) -> f64;

    fn has_incident(&self, node: NodeId) -> bool;

    /// Global rain level in `[0, 1]`.
    fn rain_level(&self) -> f64;
}

impl AgentEnvironment for DynamicEnvironment {
    fn predicted_traffic(&self, from: NodeId, to: NodeId, offset_minutes: u32) -> f64 {
        DynamicEnvironment::predicted_traffic(self, from, to, offset_minutes)
    }

    fn has_incident(&self, node: NodeId) -> bool {
        self.incident_at(node).is_some()
    }

    fn rain_level(&self) -> f64 {
        DynamicEnvironment::rain_level(self)
    }
}
