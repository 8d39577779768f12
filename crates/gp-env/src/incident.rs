//! Road incidents: short-lived hazards pinned to a node.

use std::collections::VecDeque;
use std::fmt;

use gp_core::NodeId;

/// At most this many incidents are active at once.
pub const MAX_ACTIVE_INCIDENTS: usize = 3;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IncidentType {
    Accident,
    RoadClosure,
    Construction,
    Festival,
    None,
}

impl IncidentType {
    /// Kinds the environment spawns on its own; closures only come from
    /// explicit injection.
    pub const RANDOM: [IncidentType; 3] =
        [IncidentType::Accident, IncidentType::Construction, IncidentType::Festival];

    /// Multiplier applied to the traffic factor of roads touching the node.
    pub fn traffic_multiplier(self) -> f64 {
        match self {
            IncidentType::Accident     => 2.0,
            IncidentType::RoadClosure  => 100.0,
            IncidentType::Construction => 1.5,
            IncidentType::Festival     => 1.8,
            IncidentType::None         => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IncidentType::Accident     => "accident",
            IncidentType::RoadClosure  => "road_closure",
            IncidentType::Construction => "construction",
            IncidentType::Festival     => "festival",
            IncidentType::None         => "none",
        }
    }
}

impl fmt::Display for IncidentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Incident {
    pub node: NodeId,
    pub kind: IncidentType,
    /// In `[0, 1]`.
    pub severity: f64,
    pub description: String,
}

impl Incident {
    pub fn new(node: NodeId, kind: IncidentType, severity: f64) -> Self {
        Self {
            node,
            kind,
            severity: severity.clamp(0.0, 1.0),
            description: format!("{kind} reported at {node}"),
        }
    }
}

/// Active incidents, oldest first.
#[derive(Clone, Debug, Default)]
pub struct IncidentLog {
    active: VecDeque<Incident>,
}

impl IncidentLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// The oldest incident at `node`, if any.
    pub fn at(&self, node: NodeId) -> Option<&Incident> {
        self.active.iter().find(|i| i.node == node)
    }

    /// The oldest incident touching either endpoint of a road.
    pub fn on_road(&self, a: NodeId, b: NodeId) -> Option<&Incident> {
        self.active.iter().find(|i| i.node == a || i.node == b)
    }

    pub fn is_full(&self) -> bool {
        self.active.len() >= MAX_ACTIVE_INCIDENTS
    }

    /// Record `incident` unless the cap is reached or its node is already
    /// occupied.  Returns whether it was added.
    pub fn push(&mut self, incident: Incident) -> bool {
        if self.is_full() || self.at(incident.node).is_some() {
            return false;
        }
        self.active.push_back(incident);
        true
    }

    pub fn resolve_oldest(&mut self) -> Option<Incident> {
        self.active.pop_front()
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Incident> + '_ {
        self.active.iter()
    }
}
