//! `gp-sim` — the controller that ties the greenpath engine together.
//!
//! [`SimulationController`] is an explicitly constructed context object.  It
//! owns the city graph, the dynamic environment, the Q-learning agent and
//! the Dijkstra baseline, and it is the only thing that mutates them.
//!
//! | Module         | Contents                                                   |
//! |----------------|------------------------------------------------------------|
//! | [`builder`]    | `ControllerBuilder` — config, graph, collaborators         |
//! | [`controller`] | `SimulationController`, `Comparison`, `TrainingStatus`     |
//! | [`events`]     | `SimEvent`, `EventBus`, `Subscription`                     |
//! | [`record`]     | `RunRecord`, `RunLog`, `NoopRunLog`, `ComparisonMetrics`   |
//! | [`weather`]    | `WeatherSource` and two stock sources                      |
//! | [`voice`]      | `VoiceIntent` keyword parsing                              |
//! | [`error`]      | `SimError`, `SimResult<T>`                                 |
//!
//! # Auto-updates
//!
//! Environment ticks are driven by an [`UpdateScheduler`][gp_env::UpdateScheduler]
//! that reads no wall clock.  The application calls
//! [`SimulationController::advance_clock`] with the real time elapsed (from
//! its event loop or a timer thread) and every tick that falls due runs
//! before the call returns.
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Rolls out training batches on Rayon's thread pool.     |
//! | `serde`    | Serialize run records, metrics and voice intents.      |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use gp_core::{DeliveryConstraint, NodeId, SimConfig, VehicleConstraints, VehicleType};
//! use gp_sim::ControllerBuilder;
//!
//! let mut controller = ControllerBuilder::new(SimConfig::default()).build()?;
//! let vehicle = VehicleConstraints::new(VehicleType::Ev, 200.0, 150.0);
//! let job = DeliveryConstraint::default();
//! controller.train_agent(NodeId(0), NodeId(63), &job, &vehicle, 500)?;
//! let cmp = controller.run_comparison(NodeId(0), NodeId(63), &job, &vehicle)?;
//! ```

pub mod builder;
pub mod controller;
pub mod error;
pub mod events;
pub mod record;
pub mod voice;
pub mod weather;


pub use builder::ControllerBuilder;
pub use controller::{Comparison, SimulationController, SyncOutcome, TrainingStatus};
pub use error::{SimError, SimResult};
pub use events::{EventBus, SimEvent, Subscription};
pub use record::{Algorithm, ComparisonMetrics, NoopRunLog, RunLog, RunRecord};
pub use voice::VoiceIntent;
pub use weather::{NoWeatherSource, StaticWeather, WeatherError, WeatherSource};
