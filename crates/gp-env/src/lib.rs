//! `gp-env` — the dynamic environment: everything about the city that
//! changes while the graph stays fixed.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                        |
//! |-----------------|-----------------------------------------------------------------|
//! | [`traffic`]     | `TrafficMap` — congestion factor per undirected road            |
//! | [`weather`]     | `WeatherType`, `WeatherState`, external reading → weather mapping |
//! | [`incident`]    | `Incident`, `IncidentType`, `IncidentLog` (capped, oldest-first) |
//! | [`forecast`]    | Bimodal rush-hour trend and predicted traffic                   |
//! | [`profile`]     | `CityProfile` presets (Generic, Mumbai, Delhi, Bangalore)       |
//! | [`fleet`]       | `Fleet`, `FleetVehicle`, `VehicleStatus`                        |
//! | [`scheduler`]   | `UpdateScheduler` — manually clocked periodic ticks             |
//! | [`snapshot`]    | `EnvironmentSnapshot` for run records                           |
//! | [`environment`] | `DynamicEnvironment` — owns all of the above                    |
//! | [`error`]       | `EnvError`, `EnvResult<T>`                                      |
//!
//! `DynamicEnvironment` implements [`gp_network::EdgeConditions`], so it can
//! be handed straight to a [`gp_network::Router`].
//!
//! # Feature flags
//!
//! | Flag    | Effect                                            |
//! |---------|---------------------------------------------------|
//! | `serde` | Serialize snapshots, incidents and fleet state.   |

pub mod environment;
pub mod error;
pub mod fleet;
pub mod forecast;
pub mod incident;
pub mod profile;
pub mod scheduler;
pub mod snapshot;
pub mod traffic;
pub mod weather;

#[cfg(test)]
mod tests;

pub use environment::{ChaosReport, Conditions, DynamicEnvironment, FLOOD_RAIN_THRESHOLD};
pub use error::{EnvError, EnvResult};
pub use fleet::{Fleet, FleetVehicle, VehicleStatus};
pub use incident::{Incident, IncidentLog, IncidentType, MAX_ACTIVE_INCIDENTS};
pub use profile::{CITY_PROFILES, CityProfile};
pub use scheduler::UpdateScheduler;
pub use snapshot::{EnvironmentSnapshot, WeatherSnapshot};
pub use traffic::{RoadKey, TrafficMap};
pub use weather::{ClassifiedWeather, FLOOD_IMPACT, WeatherReading, WeatherState, WeatherType, classify};
