//! Vehicle and delivery constraints.

use std::fmt;
use std::str::FromStr;

use crate::CoreError;

// ── VehicleType ───────────────────────────────────────────────────────────────

/// Drive-train of a delivery vehicle.  Selects the consumption multiplier and
/// CO₂ factor of the cost model.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VehicleType {
    #[default]
    Ev,
    Petrol,
    Hybrid,
}

impl VehicleType {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Ev     => "ev",
            VehicleType::Petrol => "petrol",
            VehicleType::Hybrid => "hybrid",
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VehicleType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ev"     => Ok(VehicleType::Ev),
            "petrol" => Ok(VehicleType::Petrol),
            "hybrid" => Ok(VehicleType::Hybrid),
            other    => Err(CoreError::UnknownVehicleType(other.to_string())),
        }
    }
}

// ── VehicleConstraints ────────────────────────────────────────────────────────

/// Physical limits of the vehicle performing a delivery.
///
/// `max_range` and `current_range` are in the same fuel units produced by
/// [`cost::segment_fuel`](crate::cost::segment_fuel).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleConstraints {
    pub vehicle_type: VehicleType,
    pub max_range: f64,
    pub current_range: f64,
    /// Payload capacity in kg.
    pub capacity: f64,
    /// Maximum drive time in minutes.
    pub max_drive_time: f64,
}

impl VehicleConstraints {
    pub fn new(vehicle_type: VehicleType, max_range: f64, current_range: f64) -> Self {
        Self {
            vehicle_type,
            max_range,
            current_range,
            capacity: 500.0,
            max_drive_time: 480.0,
        }
    }

    pub fn with_capacity(mut self, capacity: f64) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn with_max_drive_time(mut self, minutes: f64) -> Self {
        self.max_drive_time = minutes;
        self
    }
}

impl Default for VehicleConstraints {
    fn default() -> Self {
        Self::new(VehicleType::Ev, 200.0, 150.0)
    }
}

// ── Priority ──────────────────────────────────────────────────────────────────

/// Delivery priority.  Selects the router's edge-cost blend and the agent's
/// reward weighting.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Priority {
    Critical,
    High,
    #[default]
    Standard,
    Low,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Critical => "critical",
            Priority::High     => "high",
            Priority::Standard => "standard",
            Priority::Low      => "low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "critical" => Ok(Priority::Critical),
            "high"     => Ok(Priority::High),
            "standard" => Ok(Priority::Standard),
            "low"      => Ok(Priority::Low),
            other      => Err(CoreError::UnknownPriority(other.to_string())),
        }
    }
}

// ── DeliveryConstraint ────────────────────────────────────────────────────────

/// What the delivery demands: priority, a `[window_start, window_end)` arrival
/// window in minutes from midnight, and the payload weight in kg.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DeliveryConstraint {
    pub priority: Priority,
    pub window_start: f64,
    pub window_end: f64,
    pub weight: f64,
}

impl DeliveryConstraint {
    pub fn new(priority: Priority, window_start: f64, window_end: f64, weight: f64) -> Self {
        Self { priority, window_start, window_end, weight }
    }
}

impl Default for DeliveryConstraint {
    /// Standard priority, 08:00–12:00 window, 10 kg.
    fn default() -> Self {
        Self::new(Priority::Standard, 480.0, 720.0, 10.0)
    }
}
