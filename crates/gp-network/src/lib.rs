//! `gp-network` — city graph, grid generation and baseline routing.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                     |
//! |----------------|--------------------------------------------------------------|
//! | [`network`]    | `CityGraph` (adjacency + edge lists + R-tree), `CityGraphBuilder` |
//! | [`generate`]   | `generate_grid` — N×N grid with probabilistic diagonals      |
//! | [`conditions`] | `EdgeConditions` trait, `UniformConditions`                  |
//! | [`router`]     | `Router` trait, `ConstrainedRouter` (priority-weighted Dijkstra) |
//! | [`error`]      | `NetworkError`, `NetworkResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod conditions;
pub mod error;
pub mod generate;
pub mod network;
pub mod router;

#[cfg(test)]
mod tests;

pub use conditions::{EdgeConditions, UniformConditions};
pub use error::{NetworkError, NetworkResult};
pub use generate::{GridSpec, generate_grid};
pub use network::{CityGraph, CityGraphBuilder, Node};
pub use router::{ConstrainedRouter, FLOOD_PENALTY, Router, edge_search_cost};
