//! `SimulationController` — the single owner of graph, environment and agent.

use std::time::Duration;

use gp_agent::QLearningAgent;
use gp_core::{DeliveryConstraint, NodeId, RouteResult, SimConfig, VehicleConstraints};
use gp_env::{
    ChaosReport, ClassifiedWeather, CityProfile, DynamicEnvironment, FleetVehicle,
    UpdateScheduler, classify,
};
use gp_network::{CityGraph, ConstrainedRouter, Router};

use crate::{
    Algorithm, ComparisonMetrics, EventBus, RunLog, RunRecord, SimEvent, SimResult,
    Subscription, VoiceIntent, WeatherSource,
};

/// Both engines' answers to the same delivery request.
#[derive(Clone, Debug, PartialEq)]
pub struct Comparison {
    pub rl: RouteResult,
    pub dijkstra: RouteResult,
}

impl Comparison {
    /// `true` when the agent's route burns strictly less fuel.
    pub fn rl_wins(&self) -> bool {
        self.rl.total_fuel < self.dijkstra.total_fuel
    }
}

/// Progress of the most recent [`SimulationController::train_agent`] call.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrainingStatus {
    pub is_training: bool,
    /// 0–100.
    pub progress: f64,
    /// Per-episode total reward, in episode order.
    pub history: Vec<f64>,
}

/// How a real-world sync ended.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SyncOutcome {
    /// The weather source answered on attempt `attempt` (1-based).
    Live { weather: ClassifiedWeather, attempt: u32 },
    /// Every attempt failed; a simulated update ran instead.
    Simulated,
}

/// The application's context object.
///
/// Owns the city graph, the dynamic environment, the learning agent, the
/// baseline router and the auto-update scheduler; nothing else mutates them.
/// Create via [`ControllerBuilder`][crate::ControllerBuilder] and end with
/// [`shutdown`](Self::shutdown).
pub struct SimulationController<L: RunLog, W: WeatherSource> {
    pub(crate) config: SimConfig,
    pub(crate) graph: CityGraph,
    pub(crate) env: DynamicEnvironment,
    pub(crate) agent: QLearningAgent,
    pub(crate) router: ConstrainedRouter,
    pub(crate) scheduler: UpdateScheduler,
    pub(crate) events: EventBus,
    pub(crate) run_log: L,
    pub(crate) weather: W,
    pub(crate) training: TrainingStatus,
    pub(crate) metrics: ComparisonMetrics,
}

impl<L: RunLog, W: WeatherSource> SimulationController<L, W> {
    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn graph(&self) -> &CityGraph {
        &self.graph
    }

    pub fn environment(&self) -> &DynamicEnvironment {
        &self.env
    }

    /// Direct access for scenario setup (flood zones, incidents, …).
    pub fn environment_mut(&mut self) -> &mut DynamicEnvironment {
        &mut self.env
    }

    pub fn agent(&self) -> &QLearningAgent {
        &self.agent
    }

    pub fn training(&self) -> &TrainingStatus {
        &self.training
    }

    pub fn metrics(&self) -> ComparisonMetrics {
        self.metrics
    }

    /// Number of (state, action) values the agent has learned.
    pub fn q_table_size(&self) -> usize {
        self.agent.table().entry_count()
    }

    pub fn run_log(&self) -> &L {
        &self.run_log
    }

    pub fn get_fleet(&self) -> &[FleetVehicle] {
        self.env.fleet().vehicles()
    }

    pub fn subscribe(&mut self) -> Subscription {
        self.events.subscribe()
    }

    // ── Training & routing ────────────────────────────────────────────────

    /// Train the agent from scratch for `episodes` episodes.
    ///
    /// Runs in batches of `config.training_batch_size`; after each batch
    /// the progress and reward history are updated and a
    /// [`SimEvent::TrainingProgress`] is published.  Returns the full
    /// reward history.
    pub fn train_agent(
        &mut self,
        start: NodeId,
        goal: NodeId,
        constraints: &DeliveryConstraint,
        vehicle: &VehicleConstraints,
        episodes: usize,
    ) -> SimResult<Vec<f64>> {
        self.graph.check_node(start)?;
        self.graph.check_node(goal)?;

        self.training = TrainingStatus { is_training: true, progress: 0.0, history: Vec::new() };
        self.events.publish(SimEvent::TrainingStarted { episodes });
        self.agent.reset();

        let result = self.run_batches(start, goal, constraints, vehicle, episodes);
        self.training.is_training = false;
        result?;

        tracing::info!(
            episodes,
            states = self.agent.table().state_count(),
            "training finished"
        );
        self.events.publish(SimEvent::TrainingFinished { episodes });
        Ok(self.training.history.clone())
    }

    fn run_batches(
        &mut self,
        start: NodeId,
        goal: NodeId,
        constraints: &DeliveryConstraint,
        vehicle: &VehicleConstraints,
        episodes: usize,
    ) -> SimResult<()> {
        let batch_size = self.config.training_batch_size.max(1);
        let batches = episodes.div_ceil(batch_size);

        for batch in 0..batches {
            let n = batch_size.min(episodes - batch * batch_size);
            let rewards = self
                .agent
                .train_batch(&self.graph, &self.env, start, goal, constraints, vehicle, n)?;
            self.training.history.extend_from_slice(&rewards);
            self.training.progress = (batch + 1) as f64 / batches as f64 * 100.0;
            self.events.publish(SimEvent::TrainingProgress {
                progress: self.training.progress,
                episodes_done: self.training.history.len(),
                last_reward: rewards.last().copied().unwrap_or(0.0),
            });
        }
        if batches == 0 {
            self.training.progress = 100.0;
        }
        Ok(())
    }

    /// Route the same request with the agent and the baseline, record one
    /// run per algorithm and return both routes.
    ///
    /// A failing run log is reported with `warn!` and otherwise ignored.
    pub fn run_comparison(
        &mut self,
        start: NodeId,
        goal: NodeId,
        constraints: &DeliveryConstraint,
        vehicle: &VehicleConstraints,
    ) -> SimResult<Comparison> {
        let rl = self.agent.find_route(&self.graph, &self.env, start, goal, constraints, vehicle)?;
        let dijkstra = self.router.find_route(&self.graph, &self.env, start, goal, constraints, vehicle)?;

        let snapshot = self.env.snapshot();
        for (algorithm, route) in [(Algorithm::Rl, &rl), (Algorithm::Dijkstra, &dijkstra)] {
            let record = RunRecord::new(
                algorithm,
                start,
                goal,
                constraints,
                vehicle,
                route,
                snapshot.clone(),
            );
            if let Err(e) = self.run_log.record(&record) {
                tracing::warn!(%algorithm, error = %e, "failed to record run; continuing");
            }
        }

        self.metrics.observe(rl.total_fuel, dijkstra.total_fuel);
        tracing::info!(
            %start,
            %goal,
            priority = %constraints.priority,
            rl_fuel = rl.total_fuel,
            dijkstra_fuel = dijkstra.total_fuel,
            rl_reached = rl.connects(start, goal),
            "comparison finished"
        );

        let comparison = Comparison { rl, dijkstra };
        self.events.publish(SimEvent::ComparisonFinished {
            rl: Box::new(comparison.rl.clone()),
            dijkstra: Box::new(comparison.dijkstra.clone()),
        });
        Ok(comparison)
    }

    // ── Environment controls ──────────────────────────────────────────────

    /// One environment tick: conditions, then fleet.
    pub fn update_environment(&mut self) {
        self.env.update_conditions();
        self.env.update_fleet(&self.graph);
        self.events.publish(SimEvent::EnvironmentUpdated { minute: self.env.clock().minute() });
    }

    pub fn set_traffic_intensity(&mut self, level: f64) {
        self.env.set_traffic_intensity(level);
        self.events.publish(SimEvent::TrafficChanged { level });
    }

    pub fn set_rain_level(&mut self, level: f64) {
        self.env.set_rain_level(level);
        self.publish_weather(false);
    }

    pub fn set_city(&mut self, name: &str) -> SimResult<&'static CityProfile> {
        let profile = self.env.set_city(name)?;
        tracing::info!(city = profile.name, "city profile changed");
        self.events.publish(SimEvent::CityChanged { name: profile.name });
        Ok(profile)
    }

    pub fn trigger_chaos(&mut self) -> ChaosReport {
        let report = self.env.trigger_chaos();
        tracing::info!(flooded = report.affected.len(), rain = report.rain, "chaos triggered");
        self.events.publish(SimEvent::Chaos(report.clone()));
        report
    }

    /// Pull live weather for a coordinate, retrying up to
    /// `config.weather_sync_retries` times before falling back to a
    /// simulated update.
    pub fn sync_with_real_world(&mut self, latitude: f64, longitude: f64) -> SyncOutcome {
        for attempt in 1..=self.config.weather_sync_retries {
            match self.weather.current(latitude, longitude) {
                Ok(reading) => {
                    let weather = classify(&reading);
                    self.env.apply_weather(&weather);
                    tracing::info!(attempt, kind = %weather.kind, rain = weather.rain, "weather synced");
                    self.publish_weather(true);
                    return SyncOutcome::Live { weather, attempt };
                }
                Err(e) => tracing::warn!(attempt, error = %e, "weather sync attempt failed"),
            }
        }
        tracing::warn!("weather sync unavailable; using simulated update");
        self.update_environment();
        SyncOutcome::Simulated
    }

    /// Interpret an operator command.  Weather keywords refresh the
    /// environment immediately; the other intents are returned for the
    /// caller to act on.
    pub fn handle_voice_command(&mut self, command: &str) -> VoiceIntent {
        let intent = VoiceIntent::parse(command);
        tracing::debug!(command, %intent, "voice command");
        if intent == VoiceIntent::Reroute {
            self.update_environment();
        }
        self.events.publish(SimEvent::Voice(intent));
        intent
    }

    fn publish_weather(&mut self, live: bool) {
        self.events.publish(SimEvent::WeatherChanged {
            rain: self.env.rain_level(),
            kind: self.env.weather_type(),
            live,
        });
    }

    // ── Auto-update lifecycle ─────────────────────────────────────────────

    pub fn start_environment_updates(&mut self) {
        if !self.scheduler.is_running() {
            self.scheduler.start();
            tracing::info!(interval_ms = self.scheduler.interval_ms(), "environment updates started");
            self.events.publish(SimEvent::AutoUpdate { running: true });
        }
    }

    /// Idempotent; no tick fires after this returns.
    pub fn stop_environment_updates(&mut self) {
        if self.scheduler.is_running() {
            self.scheduler.stop();
            tracing::info!("environment updates stopped");
            self.events.publish(SimEvent::AutoUpdate { running: false });
        }
    }

    pub fn is_updating(&self) -> bool {
        self.scheduler.is_running()
    }

    /// Feed elapsed time to the auto-update scheduler and run every tick
    /// that falls due.  Returns the number of ticks run.
    pub fn advance_clock(&mut self, elapsed: Duration) -> u64 {
        let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
        let ticks = self.scheduler.advance(ms);
        for _ in 0..ticks {
            self.update_environment();
        }
        ticks
    }

    /// Stop updates, flush the run log and hand it back.
    pub fn shutdown(mut self) -> L {
        self.stop_environment_updates();
        if let Err(e) = self.run_log.finish() {
            tracing::warn!(error = %e, "failed to flush run log");
        }
        self.events.publish(SimEvent::Shutdown);
        tracing::info!(comparisons = self.metrics.comparisons, "controller shut down");
        self.run_log
    }
}
