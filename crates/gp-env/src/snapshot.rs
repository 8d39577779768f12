//! Point-in-time copy of the environment, attached to persisted runs.

use std::collections::BTreeMap;

use gp_core::NodeId;

use crate::{Incident, WeatherType};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WeatherSnapshot {
    pub rain: f64,
    pub kind: WeatherType,
    /// Ascending.
    pub flood_zones: Vec<NodeId>,
    pub visibility: f64,
}

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnvironmentSnapshot {
    /// Minute of day.
    pub minute: u32,
    /// Congestion per road, keyed `"<min>-<max>"` by raw node index.
    pub traffic: BTreeMap<String, f64>,
    pub weather: WeatherSnapshot,
    pub incidents: Vec<Incident>,
    pub city: String,
}

impl EnvironmentSnapshot {
    /// Key used in [`traffic`](Self::traffic) for the road `a`–`b`.
    pub fn road_key(a: NodeId, b: NodeId) -> String {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        format!("{}-{}", lo.0, hi.0)
    }

    pub fn traffic_between(&self, a: NodeId, b: NodeId) -> Option<f64> {
        self.traffic.get(&Self::road_key(a, b)).copied()
    }
}
