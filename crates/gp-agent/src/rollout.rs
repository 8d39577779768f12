//! One training episode.
//!
//! An episode only reads the Q-table through [`EpisodeTable`], so the same
//! walk drives both the sequential learner (updates applied immediately)
//! and the parallel one (updates recorded against a frozen snapshot and
//! replayed afterwards in episode order).

use rustc_hash::FxHashSet;

use gp_core::cost::{segment_fuel, segment_time};
use gp_core::{DeliveryConstraint, NodeId, SimRng, VehicleConstraints};
use gp_network::CityGraph;

use crate::reward::{StepObservation, reward};
use crate::{AgentEnvironment, AgentParams, QState, QTable};

/// A completed step, enough to replay its update later.
#[derive(Clone, Debug, PartialEq)]
pub struct Transition {
    pub state: QState,
    pub action: NodeId,
    pub reward: f64,
    /// `None` when the step reached the goal.
    pub next_state: Option<QState>,
}

impl Transition {
    /// Apply this step's Q-learning update to `table`.
    pub fn apply(&self, table: &mut QTable, graph: &CityGraph, params: &AgentParams) {
        let max_next = match &self.next_state {
            Some(next) => table.max_value(next, graph.neighbors(next.node)),
            None => 0.0,
        };
        table.update(
            self.state,
            self.action,
            self.reward,
            max_next,
            params.learning_rate,
            params.discount,
        );
    }
}

pub trait EpisodeTable {
    fn table(&self) -> &QTable;

    fn record(&mut self, transition: Transition);
}

/// Applies every update as soon as it happens.
pub struct LiveTable<'a> {
    pub table: &'a mut QTable,
    pub graph: &'a CityGraph,
    pub params: &'a AgentParams,
}

impl EpisodeTable for LiveTable<'_> {
    fn table(&self) -> &QTable {
        self.table
    }

    fn record(&mut self, transition: Transition) {
        transition.apply(self.table, self.graph, self.params);
    }
}

/// Reads a fixed table and queues updates.
pub struct FrozenTable<'a> {
    pub table: &'a QTable,
    pub pending: Vec<Transition>,
}

impl EpisodeTable for FrozenTable<'_> {
    fn table(&self) -> &QTable {
        self.table
    }

    fn record(&mut self, transition: Transition) {
        self.pending.push(transition);
    }
}

/// Fixed inputs shared by every episode of a training call.
pub struct EpisodeContext<'a> {
    pub graph: &'a CityGraph,
    pub env: &'a dyn AgentEnvironment,
    pub start: NodeId,
    pub goal: NodeId,
    pub constraints: &'a DeliveryConstraint,
    pub vehicle: &'a VehicleConstraints,
    pub params: &'a AgentParams,
}

impl EpisodeContext<'_> {
    fn observe(&self, from: NodeId, to: NodeId) -> StepObservation {
        StepObservation {
            traffic: self.env.traffic_factor(from, to),
            predicted_traffic: self.env.predicted_traffic(from, to, self.params.prediction_horizon),
            weather: self.env.weather_impact(to),
            flooded: self.env.is_flooded(to),
            incident: self.env.has_incident(to),
        }
    }

    /// ε-greedy over `actions`; greedy ties go to the first listed.
    fn select(&self, table: &QTable, state: &QState, actions: &[NodeId], rng: &mut SimRng) -> Option<NodeId> {
        if rng.gen_bool(self.params.epsilon) {
            rng.choose(actions).copied()
        } else {
            table.best_action(state, actions)
        }
    }

    /// Walk one episode from `start`; returns its total reward.
    pub fn run<T: EpisodeTable>(&self, table: &mut T, rng: &mut SimRng) -> f64 {
        let mut node = self.start;
        let mut visited = FxHashSet::default();
        let mut range = self.vehicle.current_range;
        let mut time = self.params.start_minute;
        let mut total = 0.0;

        for _ in 0..self.params.max_training_steps {
            if node == self.goal {
                break;
            }
            visited.insert(node);

            let available: Vec<NodeId> = self
                .graph
                .neighbors(node)
                .iter()
                .copied()
                .filter(|n| !visited.contains(n))
                .collect();

            let state = QState::observe(self.graph, self.env, node);
            let Some(next) = self.select(table.table(), &state, &available, rng) else {
                break;
            };
            let Some(edge) = self.graph.get_edge(node, next) else {
                break;
            };

            let obs = self.observe(node, next);
            let mut r = reward(edge, &obs, self.constraints, self.vehicle, range, time);
            let reached = next == self.goal;
            if reached {
                r += self.params.goal_reward;
            }
            total += r;

            range -= segment_fuel(edge, obs.traffic, obs.weather, self.vehicle.vehicle_type);
            time += segment_time(edge, obs.traffic, obs.weather);

            let next_state = (!reached).then(|| QState::observe(self.graph, self.env, next));
            table.record(Transition { state, action: next, reward: r, next_state });

            node = next;
            if range <= 0.0 {
                break;
            }
        }
        total
    }
}
