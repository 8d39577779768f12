//! `gp-core` — foundational types for the greenpath routing engine.
//!
//! Every other `gp-*` crate depends on this one.  It has no `gp-*`
//! dependencies and minimal external ones (only `rand` and `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`ids`]       | `NodeId`, `VehicleId`                                      |
//! | [`edge`]      | `Edge` — directed road segment with elevation delta        |
//! | [`cost`]      | Shared fuel / time / CO₂ cost model                        |
//! | [`vehicle`]   | `VehicleType`, `VehicleConstraints`, `Priority`, `DeliveryConstraint` |
//! | [`route`]     | `RouteResult`, `RouteStep`, `StepReason`, `RouteBuilder`   |
//! | [`time`]      | `DayClock` — 1440-minute wraparound time of day            |
//! | [`rng`]       | `SimRng` — seeded deterministic RNG                        |
//! | [`config`]    | `SimConfig`                                                |
//! | [`error`]     | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod cost;
pub mod edge;
pub mod error;
pub mod ids;
pub mod rng;
pub mod route;
pub mod time;
pub mod vehicle;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use edge::Edge;
pub use error::{CoreError, CoreResult};
pub use ids::{NodeId, VehicleId};
pub use rng::SimRng;
pub use route::{RouteBuilder, RouteResult, RouteStep, StepReason};
pub use time::{DayClock, MINUTES_PER_DAY};
pub use vehicle::{DeliveryConstraint, Priority, VehicleConstraints, VehicleType};
