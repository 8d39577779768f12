//! `QLearningAgent` — training and constraint-aware route execution.

use rustc_hash::FxHashSet;

use gp_core::cost::segment_fuel;
use gp_core::{
    DeliveryConstraint, NodeId, Priority, RouteBuilder, RouteResult, SimRng, StepReason,
    VehicleConstraints,
};
use gp_network::CityGraph;

use crate::rollout::EpisodeContext;
use crate::{AgentEnvironment, AgentParams, AgentResult, QState, QTable};

/// Traffic or weather factors above this are called out in step reasons.
const NOTABLE_FACTOR: f64 = 1.2;

/// Below this fraction of max range the agent reports range conservation.
const LOW_RANGE_FRACTION: f64 = 0.2;

pub struct QLearningAgent {
    params: AgentParams,
    table: QTable,
    rng: SimRng,
}

impl QLearningAgent {
    pub fn new(params: AgentParams, rng: SimRng) -> Self {
        Self { params, table: QTable::new(), rng }
    }

    pub fn params(&self) -> &AgentParams {
        &self.params
    }

    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Forget everything learned so far.
    pub fn reset(&mut self) {
        self.table.clear();
    }

    /// Train from scratch for `episodes` episodes and return each episode's
    /// total reward.
    #[allow(clippy::too_many_arguments)]
    pub fn train(
        &mut self,
        graph: &CityGraph,
        env: &dyn AgentEnvironment,
        start: NodeId,
        goal: NodeId,
        constraints: &DeliveryConstraint,
        vehicle: &VehicleConstraints,
        episodes: usize,
    ) -> AgentResult<Vec<f64>> {
        graph.check_node(start)?;
        graph.check_node(goal)?;
        self.reset();
        self.train_batch(graph, env, start, goal, constraints, vehicle, episodes)
    }

    /// Run `episodes` more episodes on top of the current table.
    ///
    /// Without the `parallel` feature every update is applied as soon as its
    /// transition happens.  With it, the batch's episodes are rolled out
    /// concurrently against the table as it stood at the start of the batch
    /// and their updates are then applied in episode order.
    #[allow(clippy::too_many_arguments)]
    pub fn train_batch(
        &mut self,
        graph: &CityGraph,
        env: &dyn AgentEnvironment,
        start: NodeId,
        goal: NodeId,
        constraints: &DeliveryConstraint,
        vehicle: &VehicleConstraints,
        episodes: usize,
    ) -> AgentResult<Vec<f64>> {
        graph.check_node(start)?;
        graph.check_node(goal)?;

        let ctx = EpisodeContext {
            graph,
            env,
            start,
            goal,
            constraints,
            vehicle,
            params: &self.params,
        };

        #[cfg(not(feature = "parallel"))]
        let rewards: Vec<f64> = {
            use crate::rollout::LiveTable;

            let mut live = LiveTable { table: &mut self.table, graph, params: &self.params };
            (0..episodes).map(|_| ctx.run(&mut live, &mut self.rng)).collect()
        };

        #[cfg(feature = "parallel")]
        let rewards: Vec<f64> = {
            use rayon::prelude::*;

            use crate::rollout::FrozenTable;

            // Seeds are drawn sequentially so results do not depend on
            // thread scheduling.
            let rngs: Vec<SimRng> = (0..episodes as u64).map(|i| self.rng.child(i)).collect();
            let snapshot = &self.table;
            let outcomes: Vec<(f64, Vec<_>)> = rngs
                .into_par_iter()
                .map(|mut rng| {
                    let mut frozen = FrozenTable { table: snapshot, pending: Vec::new() };
                    let total = ctx.run(&mut frozen, &mut rng);
                    (total, frozen.pending)
                })
                .collect();

            let mut rewards = Vec::with_capacity(outcomes.len());
            for (total, transitions) in outcomes {
                for t in &transitions {
                    t.apply(&mut self.table, graph, &self.params);
                }
                rewards.push(total);
            }
            rewards
        };

        tracing::debug!(
            episodes,
            states = self.table.state_count(),
            last_reward = rewards.last().copied().unwrap_or(0.0),
            "training batch finished"
        );
        Ok(rewards)
    }

    /// Greedy walk over the learned table.
    ///
    /// At each node the candidates are the unvisited neighbours, or every
    /// other neighbour when all have been visited.  Candidates whose fuel
    /// requirement exceeds the remaining range are skipped; of the rest the
    /// first with the highest Q-value wins.  The walk stops at the goal,
    /// after `max_inference_steps`, when no feasible candidate is left, or
    /// when range runs out, so cumulative fuel never exceeds the vehicle's
    /// starting range.
    pub fn find_route(
        &self,
        graph: &CityGraph,
        env: &dyn AgentEnvironment,
        start: NodeId,
        goal: NodeId,
        constraints: &DeliveryConstraint,
        vehicle: &VehicleConstraints,
    ) -> AgentResult<RouteResult> {
        graph.check_node(start)?;
        graph.check_node(goal)?;

        let mut route = RouteBuilder::new(start, vehicle.vehicle_type);
        let mut visited = FxHashSet::default();
        visited.insert(start);
        let mut node = start;
        let mut range = vehicle.current_range;

        for _ in 0..self.params.max_inference_steps {
            if node == goal {
                break;
            }
            let neighbors = graph.neighbors(node);
            let mut candidates: Vec<NodeId> =
                neighbors.iter().copied().filter(|n| !visited.contains(n)).collect();
            if candidates.is_empty() {
                candidates = neighbors.iter().copied().filter(|&n| n != node).collect();
            }

            let state = QState::observe(graph, env, node);
            let mut best = None;
            let mut best_q = f64::NEG_INFINITY;
            for next in candidates {
                let Some(edge) = graph.get_edge(node, next) else {
                    continue;
                };
                let traffic = env.traffic_factor(node, next);
                let weather = env.weather_impact(next);
                let fuel = segment_fuel(edge, traffic, weather, vehicle.vehicle_type);
                if fuel > range {
                    continue;
                }
                let q = self.table.get(&state, next);
                if best.is_none() || q > best_q {
                    best = Some((edge, traffic, weather, fuel));
                    best_q = q;
                }
            }

            let Some((edge, traffic, weather, fuel)) = best else {
                tracing::debug!(%node, range, "no feasible move; stopping walk");
                break;
            };

            range -= fuel;
            let reason = step_reason(traffic, weather, range, vehicle, constraints);
            route.push(edge, traffic, weather, Some(reason));

            node = edge.to;
            visited.insert(node);
            if range <= 0.0 {
                break;
            }
        }

        Ok(route.finish())
    }
}

fn step_reason(
    traffic: f64,
    weather: f64,
    range: f64,
    vehicle: &VehicleConstraints,
    constraints: &DeliveryConstraint,
) -> StepReason {
    if traffic > NOTABLE_FACTOR {
        StepReason::HeavyTraffic
    } else if weather > NOTABLE_FACTOR {
        StepReason::WeatherImpact
    } else if range < vehicle.max_range * LOW_RANGE_FRACTION {
        StepReason::LowRange
    } else if constraints.priority == Priority::Critical {
        StepReason::CriticalPriority
    } else {
        StepReason::Optimal
    }
}
