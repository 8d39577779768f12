//! Per-road congestion factors.
//!
//! Factors are stored once per undirected road, so `factor(a, b)` and
//! `factor(b, a)` always agree.  Only pairs that are actual roads of the
//! graph get an entry; any other pair reads as [`MISSING_FACTOR`].

use rustc_hash::FxHashMap;

use gp_core::{NodeId, SimRng};
use gp_network::CityGraph;

pub const MIN_FACTOR: f64 = 0.1;
pub const MAX_FACTOR: f64 = 2.0;

/// Factor reported for a node pair with no stored entry.
pub const MISSING_FACTOR: f64 = 0.5;

/// Unordered node pair `(min, max)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct RoadKey(pub NodeId, pub NodeId);

impl RoadKey {
    #[inline]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b { RoadKey(a, b) } else { RoadKey(b, a) }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TrafficMap {
    factors: FxHashMap<RoadKey, f64>,
}

impl TrafficMap {
    /// One entry per road of `graph`, initialised uniformly in `[0.3, 0.7)`.
    pub fn for_graph(graph: &CityGraph, rng: &mut SimRng) -> Self {
        let mut factors = FxHashMap::default();
        for edge in graph.all_edges() {
            factors
                .entry(RoadKey::new(edge.from, edge.to))
                .or_insert_with(|| 0.3 + rng.unit() * 0.4);
        }
        Self { factors }
    }

    /// Stored congestion for the road `a`–`b`, without incident effects.
    #[inline]
    pub fn factor(&self, a: NodeId, b: NodeId) -> f64 {
        self.factors.get(&RoadKey::new(a, b)).copied().unwrap_or(MISSING_FACTOR)
    }

    /// Add uniform noise in `[-amplitude, +amplitude]` to every road, clamped
    /// to `[MIN_FACTOR, MAX_FACTOR]`.
    ///
    /// Roads are visited in key order so a seeded run is reproducible
    /// regardless of hash-map iteration order.
    pub fn perturb(&mut self, amplitude: f64, rng: &mut SimRng) {
        let mut keys: Vec<RoadKey> = self.factors.keys().copied().collect();
        keys.sort_unstable();
        for key in keys {
            if let Some(f) = self.factors.get_mut(&key) {
                *f = (*f + rng.noise(amplitude)).clamp(MIN_FACTOR, MAX_FACTOR);
            }
        }
    }

    /// Reset every road to `value` (clamped).
    pub fn set_all(&mut self, value: f64) {
        let value = value.clamp(MIN_FACTOR, MAX_FACTOR);
        self.factors.values_mut().for_each(|f| *f = value);
    }

    /// Override a single road.  Inserts the entry if it did not exist.
    pub fn set(&mut self, a: NodeId, b: NodeId, value: f64) {
        self.factors.insert(RoadKey::new(a, b), value.clamp(MIN_FACTOR, MAX_FACTOR));
    }

    pub fn len(&self) -> usize {
        self.factors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// All `(road, factor)` pairs sorted by road.
    pub fn sorted(&self) -> Vec<(RoadKey, f64)> {
        let mut out: Vec<_> = self.factors.iter().map(|(k, v)| (*k, *v)).collect();
        out.sort_unstable_by_key(|(k, _)| *k);
        out
    }
}
