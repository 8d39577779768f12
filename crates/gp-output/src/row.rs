//! Flat, storage-ready form of a [`RunRecord`].

use gp_sim::RunRecord;
use serde::Serialize;

use crate::OutputResult;

/// Column names shared by the CSV header and the SQLite table.
pub const COLUMNS: [&str; 15] = [
    "algorithm",
    "start_node",
    "end_node",
    "priority",
    "vehicle_type",
    "total_fuel",
    "total_time",
    "total_distance",
    "co2_emissions",
    "fallback",
    "route_path",
    "minute",
    "city",
    "traffic_conditions",
    "weather_conditions",
];

/// One run with the path as `"0,1,9"` and the environment as JSON text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunRow {
    pub algorithm:          &'static str,
    pub start_node:         u32,
    pub end_node:           u32,
    pub priority:           &'static str,
    pub vehicle_type:       &'static str,
    pub total_fuel:         f64,
    pub total_time:         f64,
    pub total_distance:     f64,
    pub co2_emissions:      f64,
    pub fallback:           bool,
    pub route_path:         String,
    pub minute:             u32,
    pub city:               String,
    /// JSON object `{"<lo>-<hi>": factor}`.
    pub traffic_conditions: String,
    /// JSON object with rain, type, visibility and flood zones.
    pub weather_conditions: String,
}

impl RunRow {
    pub fn from_record(record: &RunRecord) -> OutputResult<Self> {
        let env = &record.environment;
        Ok(Self {
            algorithm:          record.algorithm.as_str(),
            start_node:         record.start.0,
            end_node:           record.goal.0,
            priority:           record.priority.as_str(),
            vehicle_type:       record.vehicle_type.as_str(),
            total_fuel:         record.total_fuel,
            total_time:         record.total_time,
            total_distance:     record.total_distance,
            co2_emissions:      record.co2_emissions,
            fallback:           record.fallback,
            route_path:         record.path_string(),
            minute:             env.minute,
            city:               env.city.clone(),
            traffic_conditions: serde_json::to_string(&env.traffic)?,
            weather_conditions: serde_json::to_string(&env.weather)?,
        })
    }
}
