//! The shared fuel / time / CO₂ cost model.
//!
//! Router search costs, router result reconstruction, agent training rewards,
//! agent inference feasibility checks and fleet range accounting all call
//! these functions.  There is exactly one copy of each constant.
//!
//! ```text
//! fuel = (distance · FUEL_RATE + max(0, elevation) · ELEVATION_RATE) · mult(vehicle) · traffic · weather
//! time =  distance · TIME_RATE · traffic · weather
//! co2  =  fuel · co2_factor(vehicle)
//! ```

use crate::{Edge, VehicleType};

/// Fuel (or energy) units per distance unit on flat road.
pub const FUEL_RATE: f64 = 0.00025;

/// Extra fuel units per unit of climb.  Descents cost nothing extra.
pub const ELEVATION_RATE: f64 = 0.0001;

/// Minutes per distance unit at free flow (≈ 30 km/h at grid scale).
pub const TIME_RATE: f64 = 0.002;

/// Consumption multiplier relative to a petrol vehicle.
#[inline]
pub fn consumption_multiplier(vehicle: VehicleType) -> f64 {
    match vehicle {
        VehicleType::Ev => 0.2,
        VehicleType::Hybrid => 0.6,
        VehicleType::Petrol => 1.0,
    }
}

/// kg CO₂ emitted per fuel unit (grid electricity for EVs).
#[inline]
pub fn co2_factor(vehicle: VehicleType) -> f64 {
    match vehicle {
        VehicleType::Ev => 0.4,
        VehicleType::Hybrid => 1.2,
        VehicleType::Petrol => 2.31,
    }
}

/// Fuel consumed traversing `edge`.
#[inline]
pub fn segment_fuel(edge: &Edge, traffic: f64, weather: f64, vehicle: VehicleType) -> f64 {
    (edge.distance * FUEL_RATE + edge.elevation.max(0.0) * ELEVATION_RATE)
        * consumption_multiplier(vehicle)
        * traffic
        * weather
}

/// Minutes spent traversing `edge`.
#[inline]
pub fn segment_time(edge: &Edge, traffic: f64, weather: f64) -> f64 {
    edge.distance * TIME_RATE * traffic * weather
}

/// CO₂ emitted for `total_fuel` burnt by `vehicle`.
#[inline]
pub fn co2(total_fuel: f64, vehicle: VehicleType) -> f64 {
    total_fuel * co2_factor(vehicle)
}
