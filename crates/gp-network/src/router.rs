//! Routing trait and the priority-weighted Dijkstra baseline.
//!
//! # Search objective
//!
//! The search does not minimise plain distance.  Each relaxation prices the
//! edge with a blend chosen by the delivery priority (fuel and time from the
//! shared cost model):
//!
//! | Priority        | Edge cost                                   |
//! |-----------------|---------------------------------------------|
//! | critical, high  | `time + flood`                              |
//! | standard        | `5·fuel + 2·time + flood`                   |
//! | low             | `2·fuel + flood`                            |
//!
//! `flood` is [`FLOOD_PENALTY`] when the destination node is flooded, else 0.
//! Flooded nodes are discouraged, not forbidden.
//!
//! # Reported costs
//!
//! The returned [`RouteResult`] is recomputed from the shared cost model
//! along the chosen path; the blended search cost is never reported.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use gp_core::cost::{segment_fuel, segment_time};
use gp_core::{
    DeliveryConstraint, Edge, NodeId, Priority, RouteBuilder, RouteResult, VehicleConstraints,
    VehicleType,
};

use crate::{CityGraph, EdgeConditions, NetworkResult};

/// Additive search cost for entering a flooded node.
pub const FLOOD_PENALTY: f64 = 500.0;

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable one-shot routing engine.
///
/// Implementations must be `Send + Sync` so a controller can be shared
/// across threads.
pub trait Router: Send + Sync {
    /// Route from `start` to `goal` under the current `conditions`.
    ///
    /// Errors only for node ids outside the graph.  An unreachable goal
    /// yields [`RouteResult::fallback`].
    fn find_route(
        &self,
        graph: &CityGraph,
        conditions: &dyn EdgeConditions,
        start: NodeId,
        goal: NodeId,
        constraints: &DeliveryConstraint,
        vehicle: &VehicleConstraints,
    ) -> NetworkResult<RouteResult>;
}

// ── Search cost ───────────────────────────────────────────────────────────────

/// The priority-dependent blend the router minimises for one edge.
pub fn edge_search_cost(
    edge: &Edge,
    traffic: f64,
    weather: f64,
    flooded: bool,
    priority: Priority,
    vehicle: VehicleType,
) -> f64 {
    let flood = if flooded { FLOOD_PENALTY } else { 0.0 };
    let time = segment_time(edge, traffic, weather);
    let fuel = segment_fuel(edge, traffic, weather, vehicle);

    match priority {
        Priority::Critical | Priority::High => time + flood,
        Priority::Low => 2.0 * fuel + flood,
        Priority::Standard => 5.0 * fuel + 2.0 * time + flood,
    }
}

// ── Heap key ──────────────────────────────────────────────────────────────────

/// Total-ordered `f64` so search costs can live in a `BinaryHeap`.
#[derive(Copy, Clone, PartialEq, Debug)]
struct Cost(f64);

impl Eq for Cost {}

impl PartialOrd for Cost {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Cost {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

// ── ConstrainedRouter ─────────────────────────────────────────────────────────

/// Dijkstra over the city graph with the priority-weighted edge cost.
///
/// Uses a binary min-heap with lazy deletion: improved distances are pushed
/// as new entries, and popped entries whose cost exceeds the node's current
/// best are skipped.  Stops as soon as the goal is popped.
#[derive(Copy, Clone, Debug, Default)]
pub struct ConstrainedRouter;

impl Router for ConstrainedRouter {
    fn find_route(
        &self,
        graph: &CityGraph,
        conditions: &dyn EdgeConditions,
        start: NodeId,
        goal: NodeId,
        constraints: &DeliveryConstraint,
        vehicle: &VehicleConstraints,
    ) -> NetworkResult<RouteResult> {
        graph.check_node(start)?;
        graph.check_node(goal)?;

        if start == goal {
            return Ok(RouteBuilder::new(start, vehicle.vehicle_type).finish());
        }

        let n = graph.node_count();
        // dist[v] = best known search cost to reach v.
        let mut dist = vec![f64::INFINITY; n];
        // prev[v] = node that reached v on the best known path.
        let mut prev: Vec<Option<NodeId>> = vec![None; n];

        dist[start.index()] = 0.0;

        // Reverse turns the max-heap into a min-heap.  Secondary key NodeId
        // makes tie-breaking deterministic.
        let mut heap: BinaryHeap<Reverse<(Cost, NodeId)>> = BinaryHeap::new();
        heap.push(Reverse((Cost(0.0), start)));

        while let Some(Reverse((Cost(cost), node))) = heap.pop() {
            // Skip stale heap entries.
            if cost > dist[node.index()] {
                continue;
            }
            if node == goal {
                break;
            }

            for edge in graph.edges_from(node) {
                let next = edge.to;
                let traffic = conditions.traffic_factor(node, next);
                let weather = conditions.weather_impact(next);
                let flooded = conditions.is_flooded(next);

                let new_cost = cost
                    + edge_search_cost(
                        edge,
                        traffic,
                        weather,
                        flooded,
                        constraints.priority,
                        vehicle.vehicle_type,
                    );

                if new_cost < dist[next.index()] {
                    dist[next.index()] = new_cost;
                    prev[next.index()] = Some(node);
                    heap.push(Reverse((Cost(new_cost), next)));
                }
            }
        }

        let Some(path) = walk_back(&prev, start, goal) else {
            tracing::debug!(%start, %goal, "no path; returning fallback estimate");
            return Ok(RouteResult::fallback(start, goal, vehicle.vehicle_type));
        };

        Ok(reconstruct(graph, conditions, &path, vehicle.vehicle_type))
    }
}

/// Follow predecessor links from `goal` back to `start`.
///
/// Returns `None` if the chain does not reach `start`.
fn walk_back(prev: &[Option<NodeId>], start: NodeId, goal: NodeId) -> Option<Vec<NodeId>> {
    let mut path = vec![goal];
    let mut cur = goal;
    while cur != start {
        cur = prev[cur.index()]?;
        path.push(cur);
    }
    path.reverse();
    Some(path)
}

/// Price the chosen path with the shared cost model.
fn reconstruct(
    graph: &CityGraph,
    conditions: &dyn EdgeConditions,
    path: &[NodeId],
    vehicle: VehicleType,
) -> RouteResult {
    let mut route = RouteBuilder::new(path[0], vehicle);
    for hop in path.windows(2) {
        let (from, to) = (hop[0], hop[1]);
        // Every hop came from a relaxed edge, so the lookup cannot miss.
        if let Some(edge) = graph.get_edge(from, to) {
            route.push(
                edge,
                conditions.traffic_factor(from, to),
                conditions.weather_impact(to),
                None,
            );
        }
    }
    route.finish()
}
