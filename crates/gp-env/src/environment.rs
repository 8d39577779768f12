//! `DynamicEnvironment` — the single source of truth for time-varying
//! travel conditions.

use gp_core::{DayClock, NodeId, SimConfig, SimRng};
use gp_network::{CityGraph, EdgeConditions};

use crate::forecast::predicted_traffic;
use crate::snapshot::WeatherSnapshot;
use crate::{
    CityProfile, ClassifiedWeather, EnvError, EnvResult, EnvironmentSnapshot, Fleet, Incident,
    IncidentLog, IncidentType, TrafficMap, WeatherState, WeatherType,
};

// Base per-tick rates, scaled by the active city profile.
const TRAFFIC_NOISE: f64 = 0.15;
const RAIN_NOISE: f64 = 0.05;
const WEATHER_CHANGE_PROBABILITY: f64 = 0.05;
const FLOOD_REGEN_PROBABILITY: f64 = 0.02;
const INCIDENT_SPAWN_PROBABILITY: f64 = 0.05;
const INCIDENT_RESOLVE_PROBABILITY: f64 = 0.1;

/// Rain above this level floods parts of the city.
pub const FLOOD_RAIN_THRESHOLD: f64 = 0.8;

// ── Conditions ────────────────────────────────────────────────────────────────

/// Borrowed read-only view of the live hazard state.
#[derive(Copy, Clone)]
pub struct Conditions<'a> {
    pub traffic: &'a TrafficMap,
    pub weather: &'a WeatherState,
    pub incidents: &'a IncidentLog,
}

impl EdgeConditions for Conditions<'_> {
    fn traffic_factor(&self, from: NodeId, to: NodeId) -> f64 {
        let base = self.traffic.factor(from, to);
        match self.incidents.on_road(from, to) {
            Some(incident) => base * incident.kind.traffic_multiplier(),
            None => base,
        }
    }

    fn weather_impact(&self, node: NodeId) -> f64 {
        self.weather.impact(node)
    }

    fn is_flooded(&self, node: NodeId) -> bool {
        self.weather.is_flooded(node)
    }
}

/// Outcome of [`DynamicEnvironment::trigger_chaos`].
#[derive(Clone, Debug, PartialEq)]
pub struct ChaosReport {
    /// Nodes flooded by the event, in the order they were hit.
    pub affected: Vec<NodeId>,
    pub rain: f64,
}

// ── DynamicEnvironment ────────────────────────────────────────────────────────

pub struct DynamicEnvironment {
    node_count: usize,
    traffic: TrafficMap,
    weather: WeatherState,
    incidents: IncidentLog,
    clock: DayClock,
    profile: &'static CityProfile,
    fleet: Fleet,
    rng: SimRng,
    fleet_rng: SimRng,
}

impl DynamicEnvironment {
    /// Initial conditions for `graph`: traffic in `[0.3, 0.7)` on every road,
    /// light random rain, 0–2 flood zones and `config.fleet_size` idle
    /// vehicles.  The clock starts at `config.start_minute`.
    pub fn new(graph: &CityGraph, config: &SimConfig, mut rng: SimRng) -> EnvResult<Self> {
        let profile = CityProfile::lookup(&config.city)?;
        let mut fleet_rng = rng.child(1);

        let traffic = TrafficMap::for_graph(graph, &mut rng);

        let mut weather = WeatherState { rain: rng.unit() * 0.5, ..WeatherState::default() };
        weather.kind = WeatherType::sample(weather.rain, &mut rng);
        weather.refresh_visibility(&mut rng);
        weather.regenerate_floods(graph.node_count(), &mut rng);

        let fleet = Fleet::spawn(graph, config.fleet_size, &mut fleet_rng);

        tracing::debug!(
            roads = traffic.len(),
            rain = weather.rain,
            weather = %weather.kind,
            city = profile.name,
            "environment initialised"
        );

        Ok(Self {
            node_count: graph.node_count(),
            traffic,
            weather,
            incidents: IncidentLog::new(),
            clock: DayClock::at(config.start_minute.max(0.0) as u32),
            profile,
            fleet,
            rng,
            fleet_rng,
        })
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn conditions(&self) -> Conditions<'_> {
        Conditions { traffic: &self.traffic, weather: &self.weather, incidents: &self.incidents }
    }

    /// Stored congestion times the multiplier of any incident on either end.
    pub fn traffic_factor(&self, from: NodeId, to: NodeId) -> f64 {
        self.conditions().traffic_factor(from, to)
    }

    /// Forecast for the road `offset_minutes` from now.
    pub fn predicted_traffic(&self, from: NodeId, to: NodeId, offset_minutes: u32) -> f64 {
        predicted_traffic(self.traffic_factor(from, to), self.clock.minute(), offset_minutes)
    }

    pub fn weather_impact(&self, node: NodeId) -> f64 {
        self.weather.impact(node)
    }

    pub fn is_flooded(&self, node: NodeId) -> bool {
        self.weather.is_flooded(node)
    }

    pub fn incident_at(&self, node: NodeId) -> Option<&Incident> {
        self.incidents.at(node)
    }

    pub fn rain_level(&self) -> f64 {
        self.weather.rain
    }

    pub fn weather_type(&self) -> WeatherType {
        self.weather.kind
    }

    pub fn visibility(&self) -> f64 {
        self.weather.visibility
    }

    pub fn weather(&self) -> &WeatherState {
        &self.weather
    }

    pub fn incident_count(&self) -> usize {
        self.incidents.len()
    }

    pub fn incidents(&self) -> impl Iterator<Item = &Incident> + '_ {
        self.incidents.iter()
    }

    pub fn clock(&self) -> DayClock {
        self.clock
    }

    pub fn profile(&self) -> &'static CityProfile {
        self.profile
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn fleet(&self) -> &Fleet {
        &self.fleet
    }

    pub fn fleet_mut(&mut self) -> &mut Fleet {
        &mut self.fleet
    }

    // ── Tick ──────────────────────────────────────────────────────────────

    /// One discrete simulation step.
    pub fn update_conditions(&mut self) {
        self.clock.advance();

        let traffic_scale = self.profile.traffic_scale();
        let weather_scale = self.profile.weather_scale();
        let rng = &mut self.rng;

        self.traffic.perturb(TRAFFIC_NOISE * traffic_scale, rng);

        let w = &mut self.weather;
        w.rain = (w.rain + rng.noise(RAIN_NOISE * weather_scale)).clamp(0.0, 1.0);
        if rng.gen_bool(WEATHER_CHANGE_PROBABILITY * weather_scale) {
            w.kind = WeatherType::sample(w.rain, rng);
        }
        w.refresh_visibility(rng);
        if rng.gen_bool(FLOOD_REGEN_PROBABILITY * weather_scale) {
            w.regenerate_floods(self.node_count, rng);
        }

        if rng.gen_bool(INCIDENT_SPAWN_PROBABILITY) && !self.incidents.is_full() && self.node_count > 0 {
            let node = NodeId(rng.gen_range(0..self.node_count as u32));
            let kind = rng.choose(&IncidentType::RANDOM).copied().unwrap_or(IncidentType::Accident);
            let severity = rng.unit();
            if self.incidents.push(Incident::new(node, kind, severity)) {
                tracing::debug!(%node, %kind, "incident reported");
            }
        }
        if rng.gen_bool(INCIDENT_RESOLVE_PROBABILITY) {
            if let Some(resolved) = self.incidents.resolve_oldest() {
                tracing::debug!(node = %resolved.node, kind = %resolved.kind, "incident resolved");
            }
        }

        tracing::debug!(
            time = %self.clock,
            rain = self.weather.rain,
            weather = %self.weather.kind,
            floods = self.weather.flood_zones.len(),
            incidents = self.incidents.len(),
            "environment tick"
        );
    }

    /// Move every fleet vehicle one tick under the current conditions.
    pub fn update_fleet(&mut self, graph: &CityGraph) {
        let conditions = Conditions {
            traffic: &self.traffic,
            weather: &self.weather,
            incidents: &self.incidents,
        };
        self.fleet.update(graph, &conditions, &mut self.fleet_rng);
    }

    // ── Overrides ─────────────────────────────────────────────────────────

    /// Reset every road to a baseline of `2 · level` (at least 0.1), with
    /// `level` clamped to `[0, 1]`.
    pub fn set_traffic_intensity(&mut self, level: f64) {
        let level = level.clamp(0.0, 1.0);
        self.traffic.set_all((2.0 * level).max(0.1));
        tracing::debug!(level, "traffic intensity set");
    }

    /// Reset every road to exactly `factor` (clamped to the valid range).
    pub fn set_uniform_traffic(&mut self, factor: f64) {
        self.traffic.set_all(factor);
    }

    /// Override the rain level (clamped to `[0, 1]`).  The weather type
    /// follows deterministically; heavy rain re-rolls the flood zones.
    pub fn set_rain_level(&mut self, level: f64) {
        let rain = level.clamp(0.0, 1.0);
        self.weather.rain = rain;
        self.weather.kind = WeatherType::for_rain(rain);
        self.weather.refresh_visibility(&mut self.rng);
        if rain > FLOOD_RAIN_THRESHOLD {
            self.weather.regenerate_floods(self.node_count, &mut self.rng);
        }
        tracing::debug!(rain, weather = %self.weather.kind, "rain level set");
    }

    /// Adopt weather mapped from an external reading.
    pub fn apply_weather(&mut self, classified: &ClassifiedWeather) {
        self.weather.rain = classified.rain;
        self.weather.kind = classified.kind;
        self.weather.visibility = classified.visibility;
    }

    /// Switch the active city profile.
    pub fn set_city(&mut self, name: &str) -> EnvResult<&'static CityProfile> {
        self.profile = CityProfile::lookup(name)?;
        Ok(self.profile)
    }

    pub fn set_flood_zones(&mut self, nodes: impl IntoIterator<Item = NodeId>) -> EnvResult<()> {
        let nodes: Vec<NodeId> = nodes.into_iter().collect();
        for &node in &nodes {
            self.check_node(node)?;
        }
        self.weather.flood_zones = nodes.into_iter().collect();
        Ok(())
    }

    pub fn clear_flood_zones(&mut self) {
        self.weather.flood_zones.clear();
    }

    /// Inject an incident.  Returns `Ok(false)` if the cap is reached or the
    /// node already has one.
    pub fn add_incident(&mut self, node: NodeId, kind: IncidentType, severity: f64) -> EnvResult<bool> {
        self.check_node(node)?;
        Ok(self.incidents.push(Incident::new(node, kind, severity)))
    }

    pub fn clear_incidents(&mut self) {
        self.incidents.clear();
    }

    /// A major weather event: flood 2–5 random nodes and add 0.4 to the rain
    /// level.
    pub fn trigger_chaos(&mut self) -> ChaosReport {
        let mut affected = Vec::new();
        if self.node_count > 0 {
            let hits: usize = self.rng.gen_range(2..=5);
            for _ in 0..hits {
                let node = NodeId(self.rng.gen_range(0..self.node_count as u32));
                self.weather.flood_zones.insert(node);
                affected.push(node);
            }
        }
        self.weather.rain = (self.weather.rain + 0.4).min(1.0);
        self.weather.kind = WeatherType::for_rain(self.weather.rain);
        self.weather.refresh_visibility(&mut self.rng);

        ChaosReport { affected, rain: self.weather.rain }
    }

    pub fn snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            minute: self.clock.minute(),
            traffic: self
                .traffic
                .sorted()
                .into_iter()
                .map(|(key, factor)| (EnvironmentSnapshot::road_key(key.0, key.1), factor))
                .collect(),
            weather: WeatherSnapshot {
                rain: self.weather.rain,
                kind: self.weather.kind,
                flood_zones: self.weather.flood_zones.iter().copied().collect(),
                visibility: self.weather.visibility,
            },
            incidents: self.incidents.iter().cloned().collect(),
            city: self.profile.name.to_string(),
        }
    }

    fn check_node(&self, node: NodeId) -> EnvResult<()> {
        if node.index() < self.node_count {
            Ok(())
        } else {
            Err(EnvError::UnknownNode { node, node_count: self.node_count })
        }
    }
}

impl EdgeConditions for DynamicEnvironment {
    fn traffic_factor(&self, from: NodeId, to: NodeId) -> f64 {
        DynamicEnvironment::traffic_factor(self, from, to)
    }

    fn weather_impact(&self, node: NodeId) -> f64 {
        DynamicEnvironment::weather_impact(self, node)
    }

    fn is_flooded(&self, node: NodeId) -> bool {
        DynamicEnvironment::is_flooded(self, node)
    }
}
