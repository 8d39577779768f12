//! Unit tests for gp-network.
//!
//! All tests use hand-crafted or seeded synthetic graphs.

#[cfg(test)]
mod helpers {
    use gp_core::NodeId;

    use crate::{CityGraph, CityGraphBuilder};

    /// Two routes from 0 to 3:
    ///
    /// ```text
    ///   0 ──(100, +50)── 1 ──(100, +50)── 3      short but steep
    ///   0 ──(110,   0)── 2 ──(110,   0)── 3      longer but flat
    /// ```
    pub fn hill_or_flat() -> CityGraph {
        let mut b = CityGraphBuilder::new();
        let n0 = b.add_node(0.0, 0.0);
        let n1 = b.add_node(100.0, 0.0);
        let n2 = b.add_node(0.0, 100.0);
        let n3 = b.add_node(100.0, 100.0);
        b.add_road(n0, n1, 100.0, 50.0);
        b.add_road(n1, n3, 100.0, 50.0);
        b.add_road(n0, n2, 110.0, 0.0);
        b.add_road(n2, n3, 110.0, 0.0);
        b.build()
    }

    /// Line 0 ↔ 1 ↔ 2 plus an isolated node 3.
    pub fn line_with_island() -> CityGraph {
        let mut b = CityGraphBuilder::new();
        let n0 = b.add_node(0.0, 0.0);
        let n1 = b.add_node(100.0, 0.0);
        let n2 = b.add_node(200.0, 0.0);
        b.add_node(500.0, 500.0);
        b.add_road(n0, n1, 100.0, 0.0);
        b.add_road(n1, n2, 100.0, 0.0);
        b.build()
    }

    pub fn ids<const N: usize>(raw: [u32; N]) -> Vec<NodeId> {
        raw.iter().map(|&i| NodeId(i)).collect()
    }
}

// ── Builder & graph structure ─────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use gp_core::NodeId;

    use crate::CityGraphBuilder;

    #[test]
    fn empty_build() {
        let g = CityGraphBuilder::new().build();
        assert_eq!(g.node_count(), 0);
        assert_eq!(g.edge_count(), 0);
        assert!(g.is_empty());
        assert!(g.nearest_node(0.0, 0.0).is_none());
    }

    #[test]
    fn road_is_symmetric() {
        let mut b = CityGraphBuilder::new();
        let a = b.add_node(0.0, 0.0);
        let c = b.add_node(100.0, 0.0);
        b.add_road(a, c, 103.0, 4.0);
        let g = b.build();

        let fwd = g.get_edge(a, c).unwrap();
        let rev = g.get_edge(c, a).unwrap();
        assert_eq!(fwd.distance, rev.distance);
        assert_eq!(fwd.elevation, -rev.elevation);
        assert_eq!(g.neighbors(a), &[c]);
    }

    #[test]
    fn directed_only_edge() {
        let mut b = CityGraphBuilder::new();
        let a = b.add_node(0.0, 0.0);
        let c = b.add_node(0.0, 1.0);
        b.add_directed_edge(a, c, 100.0, 0.0);
        let g = b.build();
        assert_eq!(g.edge_count(), 1);
        assert!(g.get_edge(a, c).is_some());
        assert!(g.get_edge(c, a).is_none());
    }

    #[test]
    fn unknown_node_is_rejected() {
        let g = super::helpers::line_with_island();
        assert!(g.check_node(NodeId(3)).is_ok());
        assert!(g.check_node(NodeId(4)).is_err());
        assert!(g.neighbors(NodeId(99)).is_empty());
        assert!(g.node(NodeId(99)).is_none());
    }

    #[test]
    fn default_names() {
        let g = super::helpers::line_with_island();
        assert_eq!(g.node(NodeId(2)).unwrap().name, "N2");
    }
}

// ── Grid generator ────────────────────────────────────────────────────────────

#[cfg(test)]
mod generate {
    use gp_core::{NodeId, SimRng};

    use crate::{GridSpec, generate_grid};

    #[test]
    fn eight_by_eight_has_64_nodes() {
        let g = generate_grid(GridSpec::new(8, 100.0), &mut SimRng::new(42));
        assert_eq!(g.node_count(), 64);
        let last = g.node(NodeId(63)).unwrap();
        assert_eq!((last.x, last.y), (700.0, 700.0));
    }

    #[test]
    fn every_edge_has_its_reverse() {
        let g = generate_grid(GridSpec::new(8, 100.0), &mut SimRng::new(3));
        for e in g.all_edges() {
            let rev = g
                .get_edge(e.to, e.from)
                .unwrap_or_else(|| panic!("missing reverse of {} -> {}", e.from, e.to));
            assert_eq!(rev.distance, e.distance);
            assert_eq!(rev.elevation, -e.elevation);
        }
    }

    #[test]
    fn straight_roads_only_without_diagonals() {
        let g = generate_grid(GridSpec::new(5, 100.0).with_diagonals(0.0), &mut SimRng::new(1));
        // 2 · n · (n-1) roads, two directed edges each.
        assert_eq!(g.edge_count(), 2 * 2 * 5 * 4);
    }

    #[test]
    fn every_cell_gets_a_diagonal_at_probability_one() {
        let g = generate_grid(GridSpec::new(5, 100.0).with_diagonals(1.0), &mut SimRng::new(1));
        assert_eq!(g.edge_count(), 2 * 2 * 5 * 4 + 2 * 4 * 4);
        let diag = g.get_edge(NodeId(0), NodeId(6)).unwrap();
        assert!(diag.distance >= 100.0 * std::f64::consts::SQRT_2);
        assert!(diag.distance < 100.0 * std::f64::consts::SQRT_2 + 20.0);
    }

    #[test]
    fn lengths_and_elevations_within_bounds() {
        let g = generate_grid(GridSpec::new(6, 100.0).with_diagonals(0.0), &mut SimRng::new(11));
        for e in g.all_edges() {
            assert!((100.0..120.0).contains(&e.distance), "{}", e.distance);
            assert!(e.elevation.abs() <= 5.0, "{}", e.elevation);
        }
    }

    #[test]
    fn degree_is_bounded() {
        let g = generate_grid(GridSpec::new(8, 100.0).with_diagonals(1.0), &mut SimRng::new(5));
        for id in g.node_ids() {
            assert!(g.neighbors(id).len() <= 6);
        }
    }

    #[test]
    fn same_seed_same_graph() {
        let a = generate_grid(GridSpec::new(4, 100.0), &mut SimRng::new(8));
        let b = generate_grid(GridSpec::new(4, 100.0), &mut SimRng::new(8));
        let ea: Vec<_> = a.all_edges().copied().collect();
        let eb: Vec<_> = b.all_edges().copied().collect();
        assert_eq!(ea, eb);
    }
}

// ── Spatial snap ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod snap {
    use gp_core::{NodeId, SimRng};

    use crate::{GridSpec, generate_grid};

    #[test]
    fn snaps_to_nearest_intersection() {
        let g = generate_grid(GridSpec::new(8, 100.0), &mut SimRng::new(1));
        assert_eq!(g.nearest_node(12.0, -30.0), Some(NodeId(0)));
        assert_eq!(g.nearest_node(290.0, 110.0), Some(NodeId(11)));
        assert_eq!(g.nearest_node(10_000.0, 10_000.0), Some(NodeId(63)));
    }

    #[test]
    fn k_nearest_sorted() {
        let g = generate_grid(GridSpec::new(4, 100.0), &mut SimRng::new(1));
        let near = g.k_nearest_nodes(0.0, 0.0, 3);
        assert_eq!(near[0], NodeId(0));
        assert_eq!(near.len(), 3);
    }
}

// ── Router ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod router {
    use gp_core::cost::{segment_fuel, segment_time};
    use gp_core::{
        DeliveryConstraint, NodeId, Priority, SimRng, VehicleConstraints, VehicleType,
    };

    use super::helpers::{hill_or_flat, ids, line_with_island};
    use crate::{
        CityGraph, ConstrainedRouter, EdgeConditions, FLOOD_PENALTY, GridSpec, Router,
        UniformConditions, edge_search_cost, generate_grid,
    };

    fn delivery(priority: Priority) -> DeliveryConstraint {
        DeliveryConstraint::new(priority, 480.0, 720.0, 10.0)
    }

    fn petrol() -> VehicleConstraints {
        VehicleConstraints::new(VehicleType::Petrol, 200.0, 150.0)
    }

    fn search_cost(
        g: &CityGraph,
        c: &dyn EdgeConditions,
        path: &[NodeId],
        priority: Priority,
        vehicle: VehicleType,
    ) -> f64 {
        path.windows(2)
            .map(|h| {
                let e = g.get_edge(h[0], h[1]).unwrap();
                edge_search_cost(
                    e,
                    c.traffic_factor(h[0], h[1]),
                    c.weather_impact(h[1]),
                    c.is_flooded(h[1]),
                    priority,
                    vehicle,
                )
            })
            .sum()
    }

    /// Exhaustive minimum over all simple paths (graphs ≤ 10 nodes only).
    fn brute_force_min(
        g: &CityGraph,
        c: &dyn EdgeConditions,
        start: NodeId,
        goal: NodeId,
        priority: Priority,
        vehicle: VehicleType,
    ) -> f64 {
        fn dfs(
            g: &CityGraph,
            c: &dyn EdgeConditions,
            node: NodeId,
            goal: NodeId,
            priority: Priority,
            vehicle: VehicleType,
            visited: &mut Vec<NodeId>,
            acc: f64,
            best: &mut f64,
        ) {
            if node == goal {
                *best = best.min(acc);
                return;
            }
            for e in g.edges_from(node) {
                if visited.contains(&e.to) {
                    continue;
                }
                let step = edge_search_cost(
                    e,
                    c.traffic_factor(node, e.to),
                    c.weather_impact(e.to),
                    c.is_flooded(e.to),
                    priority,
                    vehicle,
                );
                visited.push(e.to);
                dfs(g, c, e.to, goal, priority, vehicle, visited, acc + step, best);
                visited.pop();
            }
        }

        let mut best = f64::INFINITY;
        dfs(g, c, start, goal, priority, vehicle, &mut vec![start], 0.0, &mut best);
        best
    }

    #[test]
    fn matches_brute_force_on_small_grids() {
        let cond = UniformConditions::neutral();
        for seed in 0..20 {
            let g = generate_grid(GridSpec::new(3, 100.0), &mut SimRng::new(seed));
            for goal in 1..9 {
                let (start, goal) = (NodeId(0), NodeId(goal));
                let route = ConstrainedRouter
                    .find_route(&g, &cond, start, goal, &delivery(Priority::Standard), &petrol())
                    .unwrap();
                assert!(route.connects(start, goal));
                let got = search_cost(&g, &cond, &route.path, Priority::Standard, VehicleType::Petrol);
                let want = brute_force_min(&g, &cond, start, goal, Priority::Standard, VehicleType::Petrol);
                assert!((got - want).abs() < 1e-9, "seed {seed} goal {goal}: {got} vs {want}");
            }
        }
    }

    #[test]
    fn critical_prefers_time_low_prefers_fuel() {
        let g = hill_or_flat();
        let cond = UniformConditions::neutral();

        let fast = ConstrainedRouter
            .find_route(&g, &cond, NodeId(0), NodeId(3), &delivery(Priority::Critical), &petrol())
            .unwrap();
        assert_eq!(fast.path, ids([0, 1, 3]));

        let eco = ConstrainedRouter
            .find_route(&g, &cond, NodeId(0), NodeId(3), &delivery(Priority::Low), &petrol())
            .unwrap();
        assert_eq!(eco.path, ids([0, 2, 3]));
    }

    #[test]
    fn reported_costs_come_from_the_cost_model() {
        let g = hill_or_flat();
        let cond = UniformConditions::new(0.8, 1.5);
        let r = ConstrainedRouter
            .find_route(&g, &cond, NodeId(0), NodeId(3), &delivery(Priority::Standard), &petrol())
            .unwrap();

        let mut fuel = 0.0;
        let mut time = 0.0;
        for (hop, step) in r.path.windows(2).zip(&r.steps) {
            let e = g.get_edge(hop[0], hop[1]).unwrap();
            assert_eq!(step.fuel, segment_fuel(e, 0.8, 1.5, VehicleType::Petrol));
            assert_eq!(step.time, segment_time(e, 0.8, 1.5));
            assert_eq!(step.node, hop[1]);
            assert!(step.reason.is_none());
            fuel += step.fuel;
            time += step.time;
        }
        assert!((r.total_fuel - fuel).abs() < 1e-12);
        assert!((r.total_time - time).abs() < 1e-12);
        assert!((r.co2_emissions - fuel * 2.31).abs() < 1e-12);
    }

    #[test]
    fn disconnected_goal_returns_fallback() {
        let g = line_with_island();
        let r = ConstrainedRouter
            .find_route(
                &g,
                &UniformConditions::neutral(),
                NodeId(0),
                NodeId(3),
                &delivery(Priority::Standard),
                &petrol(),
            )
            .unwrap();
        assert!(r.fallback);
        assert_eq!(r.path, ids([0, 3]));
        assert_eq!(r.total_distance, 5_000.0);
    }

    #[test]
    fn flooded_only_path_is_taken_with_single_penalty() {
        let g = line_with_island();
        let cond = UniformConditions::neutral().with_flooded(NodeId(1));
        let r = ConstrainedRouter
            .find_route(&g, &cond, NodeId(0), NodeId(2), &delivery(Priority::Standard), &petrol())
            .unwrap();
        assert_eq!(r.path, ids([0, 1, 2]));

        let dry = UniformConditions::neutral();
        let wet_cost = search_cost(&g, &cond, &r.path, Priority::Standard, VehicleType::Petrol);
        let dry_cost = search_cost(&g, &dry, &r.path, Priority::Standard, VehicleType::Petrol);
        assert!((wet_cost - dry_cost - FLOOD_PENALTY).abs() < 1e-9);
    }

    #[test]
    fn flooded_shortcut_is_avoided_when_detour_exists() {
        let g = hill_or_flat();
        let cond = UniformConditions::neutral().with_flooded(NodeId(1));
        let r = ConstrainedRouter
            .find_route(&g, &cond, NodeId(0), NodeId(3), &delivery(Priority::Critical), &petrol())
            .unwrap();
        assert_eq!(r.path, ids([0, 2, 3]));
    }

    #[test]
    fn same_start_and_goal_is_trivial() {
        let g = line_with_island();
        let r = ConstrainedRouter
            .find_route(
                &g,
                &UniformConditions::neutral(),
                NodeId(1),
                NodeId(1),
                &delivery(Priority::High),
                &petrol(),
            )
            .unwrap();
        assert_eq!(r.path, ids([1]));
        assert_eq!(r.total_fuel, 0.0);
        assert!(!r.fallback);
    }

    #[test]
    fn unknown_node_is_an_error() {
        let g = line_with_island();
        let result = ConstrainedRouter.find_route(
            &g,
            &UniformConditions::neutral(),
            NodeId(0),
            NodeId(40),
            &delivery(Priority::Standard),
            &petrol(),
        );
        assert!(result.is_err());
    }
}
