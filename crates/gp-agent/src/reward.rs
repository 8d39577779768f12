//! Reward shaping.
//!
//! Hard infeasibility short-circuits to a large negative constant.  Feasible
//! moves are scored by a priority-specific blend of fuel, time and a
//! delivery-window penalty, all computed with the shared cost model at an
//! effective traffic factor of `0.6 · current + 0.4 · predicted`.

use gp_core::cost::{segment_fuel, segment_time};
use gp_core::{DeliveryConstraint, Edge, Priority, VehicleConstraints};

pub const FLOOD_REWARD: f64 = -10_000.0;
pub const INCIDENT_REWARD: f64 = -5_000.0;
/// Payload over capacity, or not enough range left for the move.
pub const INFEASIBLE_REWARD: f64 = -10_000.0;

const LATE_PENALTY_RATE: f64 = 100.0;
const EARLY_PENALTY_RATE: f64 = 50.0;

/// Environment readings for one candidate move, taken once per transition.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepObservation {
    pub traffic: f64,
    pub predicted_traffic: f64,
    /// Weather impact at the destination node.
    pub weather: f64,
    pub flooded: bool,
    pub incident: bool,
}

#[inline]
pub fn effective_traffic(current: f64, predicted: f64) -> f64 {
    current * 0.6 + predicted * 0.4
}

/// Penalty for arriving at minute `arrival` relative to the delivery window.
pub fn window_penalty(arrival: f64, constraints: &DeliveryConstraint) -> f64 {
    if arrival > constraints.window_end {
        (arrival - constraints.window_end) * LATE_PENALTY_RATE
    } else if arrival < constraints.window_start {
        (constraints.window_start - arrival) * EARLY_PENALTY_RATE
    } else {
        0.0
    }
}

/// Reward for traversing `edge` with `current_range` left at minute
/// `current_time`.
pub fn reward(
    edge: &Edge,
    obs: &StepObservation,
    constraints: &DeliveryConstraint,
    vehicle: &VehicleConstraints,
    current_range: f64,
    current_time: f64,
) -> f64 {
    if obs.flooded {
        return FLOOD_REWARD;
    }
    if obs.incident {
        return INCIDENT_REWARD;
    }
    if constraints.weight > vehicle.capacity {
        return INFEASIBLE_REWARD;
    }

    let traffic = effective_traffic(obs.traffic, obs.predicted_traffic);
    let fuel = segment_fuel(edge, traffic, obs.weather, vehicle.vehicle_type);
    let time = segment_time(edge, traffic, obs.weather);

    if current_range - fuel < 0.0 {
        return INFEASIBLE_REWARD;
    }

    let window = window_penalty(current_time + time, constraints);

    match constraints.priority {
        Priority::Critical => -(150.0 * time + 20.0 * window),
        Priority::High     => -(80.0 * time + 5.0 * fuel + 10.0 * window),
        Priority::Standard => -(25.0 * fuel + 15.0 * time + 2.0 * window),
        Priority::Low      => -(50.0 * fuel + 2.0 * time + window),
    }
}
