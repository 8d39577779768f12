//! Fluent builder for constructing a [`SimulationController`].

use gp_agent::{AgentParams, QLearningAgent};
use gp_core::{SimConfig, SimRng};
use gp_env::{DynamicEnvironment, UpdateScheduler};
use gp_network::{CityGraph, ConstrainedRouter, GridSpec, generate_grid};

use crate::controller::TrainingStatus;
use crate::{
    ComparisonMetrics, EventBus, NoWeatherSource, NoopRunLog, RunLog, SimResult,
    SimulationController, WeatherSource,
};

/// Fluent builder for [`SimulationController<L, W>`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                          |
/// |---------------------|--------------------------------------------------|
/// | `.graph(g)`         | Grid generated from the config and its seed      |
/// | `.agent_params(p)`  | `AgentParams::default()` at `config.start_minute` |
/// | `.run_log(l)`       | [`NoopRunLog`]                                   |
/// | `.weather(w)`       | [`NoWeatherSource`]                              |
///
/// # Example
///
/// ```rust,ignore
/// let mut controller = ControllerBuilder::new(SimConfig::default())
///     .run_log(CsvRunLog::new(dir)?)
///     .build()?;
/// controller.train_agent(NodeId(0), NodeId(63), &constraint, &vehicle, 500)?;
/// ```
pub struct ControllerBuilder<L: RunLog = NoopRunLog, W: WeatherSource = NoWeatherSource> {
    config: SimConfig,
    graph: Option<CityGraph>,
    params: Option<AgentParams>,
    run_log: L,
    weather: W,
}

impl ControllerBuilder {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            graph: None,
            params: None,
            run_log: NoopRunLog,
            weather: NoWeatherSource,
        }
    }
}

impl<L: RunLog, W: WeatherSource> ControllerBuilder<L, W> {
    /// Route over a prebuilt city instead of generating one.
    pub fn graph(mut self, graph: CityGraph) -> Self {
        self.graph = Some(graph);
        self
    }

    pub fn agent_params(mut self, params: AgentParams) -> Self {
        self.params = Some(params);
        self
    }

    pub fn run_log<L2: RunLog>(self, run_log: L2) -> ControllerBuilder<L2, W> {
        ControllerBuilder {
            config: self.config,
            graph: self.graph,
            params: self.params,
            run_log,
            weather: self.weather,
        }
    }

    pub fn weather<W2: WeatherSource>(self, weather: W2) -> ControllerBuilder<L, W2> {
        ControllerBuilder {
            config: self.config,
            graph: self.graph,
            params: self.params,
            run_log: self.run_log,
            weather,
        }
    }

    /// Validate inputs, derive the per-component RNGs from the config seed
    /// and return a ready controller with auto-updates stopped.
    pub fn build(self) -> SimResult<SimulationController<L, W>> {
        self.config.validate()?;

        let mut rng = SimRng::new(self.config.seed);
        let graph = match self.graph {
            Some(g) => g,
            None => generate_grid(GridSpec::from(&self.config), &mut rng.child(0)),
        };
        let env = DynamicEnvironment::new(&graph, &self.config, rng.child(1))?;

        let params = self
            .params
            .unwrap_or_else(|| AgentParams::default().with_start_minute(self.config.start_minute));
        params.validate()?;
        let agent = QLearningAgent::new(params, rng.child(2));

        tracing::info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            city = env.profile().name,
            seed = self.config.seed,
            "controller ready"
        );

        Ok(SimulationController {
            scheduler: UpdateScheduler::new(self.config.update_interval_ms),
            config: self.config,
            graph,
            env,
            agent,
            router: ConstrainedRouter,
            events: EventBus::new(),
            run_log: self.run_log,
            weather: self.weather,
            training: TrainingStatus::default(),
            metrics: ComparisonMetrics::default(),
        })
    }
}
