//! Simulated delivery fleet.
//!
//! Each vehicle moves independently over the city graph.  An en-route
//! vehicle tries to advance one road per tick towards its destination; the
//! chance of getting through falls as the road's traffic factor rises.
//! Stuck vehicles accumulate stress, moving ones shed it.

use std::fmt;

use gp_core::cost::{TIME_RATE, segment_fuel};
use gp_core::{NodeId, SimRng, VehicleConstraints, VehicleId, VehicleType};
use gp_network::{CityGraph, EdgeConditions};

pub const MAX_STRESS: f64 = 10.0;
const STUCK_STRESS: f64 = 1.0;
const MOVING_RELIEF: f64 = 0.5;

/// Below this fraction of max range a vehicle abandons its trip to charge.
pub const LOW_RANGE_FRACTION: f64 = 0.2;
const CHARGE_PER_TICK: f64 = 0.1;

const DISPATCH_PROBABILITY: f64 = 0.3;
const BREAKDOWN_PROBABILITY: f64 = 0.005;
const REPAIR_PROBABILITY: f64 = 0.1;

/// Chance that a vehicle clears a road with the given traffic factor this tick.
#[inline]
pub fn move_probability(traffic: f64) -> f64 {
    (1.0 / (1.0 + traffic)).clamp(0.05, 0.95)
}

// ── VehicleStatus ─────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum VehicleStatus {
    #[default]
    Idle,
    EnRoute,
    Charging,
    Breakdown,
}

impl VehicleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Idle      => "idle",
            VehicleStatus::EnRoute   => "en-route",
            VehicleStatus::Charging  => "charging",
            VehicleStatus::Breakdown => "breakdown",
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── FleetVehicle ──────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FleetVehicle {
    pub id: VehicleId,
    pub constraints: VehicleConstraints,
    pub location: NodeId,
    pub status: VehicleStatus,
    pub destination: Option<NodeId>,
    /// Nodes visited on the current trip, starting at the departure node.
    pub route: Vec<NodeId>,
    /// Estimated minutes to destination.
    pub eta: Option<f64>,
    /// In `[0, MAX_STRESS]`.
    pub stress_index: f64,
}

impl FleetVehicle {
    pub fn new(id: VehicleId, constraints: VehicleConstraints, location: NodeId) -> Self {
        Self {
            id,
            constraints,
            location,
            status: VehicleStatus::Idle,
            destination: None,
            route: Vec::new(),
            eta: None,
            stress_index: 0.0,
        }
    }

    /// Send the vehicle towards `destination`.  No-op when already there.
    pub fn dispatch(&mut self, destination: NodeId) {
        if destination == self.location {
            return;
        }
        self.status = VehicleStatus::EnRoute;
        self.destination = Some(destination);
        self.route = vec![self.location];
        self.eta = None;
    }

    fn end_trip(&mut self, status: VehicleStatus) {
        self.status = status;
        self.destination = None;
        self.eta = None;
    }

    fn is_low_on_range(&self) -> bool {
        self.constraints.current_range < LOW_RANGE_FRACTION * self.constraints.max_range
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct Fleet {
    vehicles: Vec<FleetVehicle>,
}

impl Fleet {
    /// `size` idle vehicles at random nodes, alternating EV and petrol.
    pub fn spawn(graph: &CityGraph, size: u16, rng: &mut SimRng) -> Self {
        if graph.is_empty() {
            return Self::default();
        }
        let node_count = graph.node_count() as u32;
        let vehicles = (0..size)
            .map(|i| {
                let (vehicle_type, max_range) = if i % 2 == 0 {
                    (VehicleType::Ev, 200.0)
                } else {
                    (VehicleType::Petrol, 400.0)
                };
                let current = max_range * (0.5 + rng.unit() * 0.5);
                let location = NodeId(rng.gen_range(0..node_count));
                FleetVehicle::new(
                    VehicleId(i),
                    VehicleConstraints::new(vehicle_type, max_range, current),
                    location,
                )
            })
            .collect();
        Self { vehicles }
    }

    pub fn from_vehicles(vehicles: Vec<FleetVehicle>) -> Self {
        Self { vehicles }
    }

    pub fn vehicles(&self) -> &[FleetVehicle] {
        &self.vehicles
    }

    pub fn get(&self, id: VehicleId) -> Option<&FleetVehicle> {
        self.vehicles.get(id.index())
    }

    pub fn get_mut(&mut self, id: VehicleId) -> Option<&mut FleetVehicle> {
        self.vehicles.get_mut(id.index())
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    /// Advance every vehicle by one tick.
    pub fn update(&mut self, graph: &CityGraph, conditions: &dyn EdgeConditions, rng: &mut SimRng) {
        for v in &mut self.vehicles {
            match v.status {
                VehicleStatus::Breakdown => {
                    if rng.gen_bool(REPAIR_PROBABILITY) {
                        v.status = VehicleStatus::Idle;
                    }
                }
                VehicleStatus::Charging => {
                    let c = &mut v.constraints;
                    c.current_range = (c.current_range + CHARGE_PER_TICK * c.max_range).min(c.max_range);
                    if c.current_range >= c.max_range {
                        v.status = VehicleStatus::Idle;
                    }
                }
                VehicleStatus::Idle => {
                    let n = graph.node_count() as u32;
                    if v.is_low_on_range() {
                        v.status = VehicleStatus::Charging;
                    } else if n > 1 && rng.gen_bool(DISPATCH_PROBABILITY) {
                        // Uniform over every node except the current one.
                        let mut dest = rng.gen_range(0..n - 1);
                        if dest >= v.location.0 {
                            dest += 1;
                        }
                        v.dispatch(NodeId(dest));
                    }
                }
                VehicleStatus::EnRoute => advance(v, graph, conditions, rng),
            }
        }
    }
}

/// The neighbour of `from` closest in the plane to `destination`.
pub fn next_hop(graph: &CityGraph, from: NodeId, destination: NodeId) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for &n in graph.neighbors(from) {
        let d = graph.euclidean(n, destination).unwrap_or(f64::INFINITY);
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((n, d));
        }
    }
    best.map(|(n, _)| n)
}

fn advance(v: &mut FleetVehicle, graph: &CityGraph, conditions: &dyn EdgeConditions, rng: &mut SimRng) {
    let Some(dest) = v.destination else {
        v.end_trip(VehicleStatus::Idle);
        return;
    };
    let Some(next) = next_hop(graph, v.location, dest) else {
        v.end_trip(VehicleStatus::Idle);
        return;
    };

    let traffic = conditions.traffic_factor(v.location, next);
    if rng.gen_bool(move_probability(traffic)) {
        if let Some(edge) = graph.get_edge(v.location, next) {
            let fuel = segment_fuel(
                edge,
                traffic,
                conditions.weather_impact(next),
                v.constraints.vehicle_type,
            );
            v.constraints.current_range = (v.constraints.current_range - fuel).max(0.0);
        }
        v.location = next;
        v.route.push(next);
        v.stress_index = (v.stress_index - MOVING_RELIEF).max(0.0);
    } else {
        v.stress_index = (v.stress_index + STUCK_STRESS).min(MAX_STRESS);
    }

    if v.location == dest {
        v.end_trip(VehicleStatus::Idle);
        return;
    }
    v.eta = graph.euclidean(v.location, dest).map(|d| d * TIME_RATE * traffic);

    if v.is_low_on_range() {
        v.end_trip(VehicleStatus::Charging);
    } else if rng.gen_bool(BREAKDOWN_PROBABILITY) {
        v.end_trip(VehicleStatus::Breakdown);
    }
}
