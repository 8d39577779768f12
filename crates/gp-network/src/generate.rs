//! Synthetic grid city generator.
//!
//! Nodes are laid out row-major on an N×N lattice `spacing` apart.  Every
//! node connects to its right and down neighbour; each cell additionally
//! gets a down-right diagonal with probability `diagonal_probability`.
//! Road lengths carry up to 20 units of random jitter and a random
//! elevation delta (±5 on straights, ±7.5 on diagonals).

use gp_core::{NodeId, SimConfig, SimRng};

use crate::{CityGraph, CityGraphBuilder};

/// Random length jitter added to every road.
const LENGTH_JITTER: f64 = 20.0;
const STRAIGHT_ELEVATION_SPAN: f64 = 10.0;
const DIAGONAL_ELEVATION_SPAN: f64 = 15.0;

/// Shape of a generated grid city.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridSpec {
    pub grid_size: u32,
    pub spacing: f64,
    pub diagonal_probability: f64,
}

impl GridSpec {
    pub fn new(grid_size: u32, spacing: f64) -> Self {
        Self { grid_size, spacing, diagonal_probability: 0.4 }
    }

    pub fn with_diagonals(mut self, probability: f64) -> Self {
        self.diagonal_probability = probability;
        self
    }
}

impl From<&SimConfig> for GridSpec {
    fn from(c: &SimConfig) -> Self {
        Self {
            grid_size: c.grid_size,
            spacing: c.spacing,
            diagonal_probability: c.diagonal_probability,
        }
    }
}

/// Build an N×N grid city.
pub fn generate_grid(spec: GridSpec, rng: &mut SimRng) -> CityGraph {
    let n = spec.grid_size;
    let id = |row: u32, col: u32| NodeId(row * n + col);

    let mut b = CityGraphBuilder::with_capacity((n * n) as usize);
    for row in 0..n {
        for col in 0..n {
            b.add_node(col as f64 * spec.spacing, row as f64 * spec.spacing);
        }
    }

    for row in 0..n {
        for col in 0..n {
            let here = id(row, col);

            if col + 1 < n {
                let distance = spec.spacing + rng.unit() * LENGTH_JITTER;
                let elevation = (rng.unit() - 0.5) * STRAIGHT_ELEVATION_SPAN;
                b.add_road(here, id(row, col + 1), distance, elevation);
            }

            if row + 1 < n {
                let distance = spec.spacing + rng.unit() * LENGTH_JITTER;
                let elevation = (rng.unit() - 0.5) * STRAIGHT_ELEVATION_SPAN;
                b.add_road(here, id(row + 1, col), distance, elevation);
            }

            if col + 1 < n && row + 1 < n && rng.gen_bool(spec.diagonal_probability) {
                let distance = spec.spacing * std::f64::consts::SQRT_2 + rng.unit() * LENGTH_JITTER;
                let elevation = (rng.unit() - 0.5) * DIAGONAL_ELEVATION_SPAN;
                b.add_road(here, id(row + 1, col + 1), distance, elevation);
            }
        }
    }

    let graph = b.build();
    tracing::debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "generated {n}x{n} grid city"
    );
    graph
}
