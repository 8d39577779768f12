//! compare — agent versus Dijkstra on a synthetic delivery city.
//!
//! Builds a controller from an optional JSON config (first CLI argument),
//! trains the Q-learning agent, runs a comparison under calm conditions,
//! lets the environment evolve, triggers a storm and compares again.  Every
//! run is appended to `<output_dir>/runs.csv`.
//!
//! ```text
//! cargo run -p compare -- demos/compare/scenario.json
//! RUST_LOG=debug cargo run -p compare
//! ```

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use gp_core::{DeliveryConstraint, NodeId, Priority, RouteResult, SimConfig, VehicleConstraints, VehicleType};
use gp_output::CsvRunLog;
use gp_sim::{Comparison, ControllerBuilder, SimEvent, SyncOutcome};

// ── Config ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DemoConfig {
    sim:           SimConfig,
    start:         u32,
    goal:          Option<u32>,
    priority:      String,
    vehicle:       String,
    max_range:     f64,
    current_range: f64,
    episodes:      usize,
    /// Simulated seconds of auto-updates between the two comparisons.
    warmup_secs:   u64,
    output_dir:    PathBuf,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            sim:           SimConfig::default(),
            start:         0,
            goal:          None,
            priority:      "standard".into(),
            vehicle:       "ev".into(),
            max_range:     200.0,
            current_range: 150.0,
            episodes:      500,
            warmup_secs:   30,
            output_dir:    PathBuf::from("output/compare"),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DemoConfig> {
    let Some(path) = path else {
        return Ok(DemoConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_route(label: &str, route: &RouteResult) {
    println!(
        "  {label:<9} fuel {:>8.4}  time {:>7.2} min  dist {:>7.0}  co2 {:>7.4} kg  hops {:>3}{}",
        route.total_fuel,
        route.total_time,
        route.total_distance,
        route.co2_emissions,
        route.hop_count(),
        if route.fallback { "  (fallback)" } else { "" },
    );
}

fn print_comparison(title: &str, cmp: &Comparison) {
    println!("{title}");
    print_route("rl", &cmp.rl);
    print_route("dijkstra", &cmp.dijkstra);
    println!("  winner: {}", if cmp.rl_wins() { "rl" } else { "dijkstra" });
    println!();
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let arg = std::env::args().nth(1).map(PathBuf::from);
    let demo = load_config(arg.as_deref())?;
    tracing::debug!(?demo, "demo config");

    let priority: Priority = demo.priority.parse()?;
    let vehicle_type: VehicleType = demo.vehicle.parse()?;
    let vehicle = VehicleConstraints::new(vehicle_type, demo.max_range, demo.current_range);
    let job = DeliveryConstraint::new(priority, 480.0, 720.0, 10.0);

    std::fs::create_dir_all(&demo.output_dir)?;
    let run_log = CsvRunLog::new(&demo.output_dir)?;

    let mut controller = ControllerBuilder::new(demo.sim.clone()).run_log(run_log).build()?;
    let events = controller.subscribe();

    let start = NodeId(demo.start);
    let goal = NodeId(demo.goal.unwrap_or(controller.graph().node_count() as u32 - 1));

    println!("=== compare — greenpath routing ===");
    println!(
        "City: {} ({} nodes, {} edges)  |  Seed: {}",
        controller.environment().profile().name,
        controller.graph().node_count(),
        controller.graph().edge_count(),
        demo.sim.seed,
    );
    println!("Delivery {start} → {goal}  |  priority {priority}  |  vehicle {vehicle_type}");
    println!();

    // 1. Train.
    let t0 = Instant::now();
    let history = controller.train_agent(start, goal, &job, &vehicle, demo.episodes)?;
    let batches = events
        .drain()
        .iter()
        .filter(|e| matches!(e, SimEvent::TrainingProgress { .. }))
        .count();
    let tail = &history[history.len().saturating_sub(50)..];
    let tail_mean = if tail.is_empty() { 0.0 } else { tail.iter().sum::<f64>() / tail.len() as f64 };
    println!(
        "Trained {} episodes in {batches} batches ({:.3} s); mean reward of last {}: {tail_mean:.1}",
        history.len(),
        t0.elapsed().as_secs_f64(),
        tail.len(),
    );
    println!("Q-table entries: {}", controller.q_table_size());
    println!();

    // 2. Calm comparison.
    let calm = controller.run_comparison(start, goal, &job, &vehicle)?;
    print_comparison("Comparison (current conditions)", &calm);

    // 3. Let the city evolve.
    controller.start_environment_updates();
    let ticks = controller.advance_clock(Duration::from_secs(demo.warmup_secs));
    controller.stop_environment_updates();
    if let SyncOutcome::Simulated = controller.sync_with_real_world(19.07, 72.88) {
        println!("Weather sync unavailable; simulated one extra tick");
    }
    println!(
        "Environment advanced {ticks} ticks to {} ({}, rain {:.2})",
        controller.environment().clock(),
        controller.environment().weather_type(),
        controller.environment().rain_level(),
    );

    // 4. Storm.
    let chaos = controller.trigger_chaos();
    println!("Chaos: flooded {:?}, rain {:.2}", chaos.affected, chaos.rain);
    println!();
    let stormy = controller.run_comparison(start, goal, &job, &vehicle)?;
    print_comparison("Comparison (after storm)", &stormy);

    // 5. Fleet.
    println!("{:<8} {:<8} {:<10} {:<6} {:<6}", "Vehicle", "Type", "Status", "Node", "Stress");
    println!("{}", "-".repeat(42));
    for v in controller.get_fleet() {
        println!(
            "{:<8} {:<8} {:<10} {:<6} {:<6.1}",
            v.id.to_string(),
            v.constraints.vehicle_type.as_str(),
            v.status.as_str(),
            v.location.to_string(),
            v.stress_index,
        );
    }
    println!();

    let metrics = controller.metrics();
    println!(
        "RL won {}/{} comparisons ({:.0}%)",
        metrics.rl_wins,
        metrics.comparisons,
        metrics.win_rate() * 100.0
    );

    let log = controller.shutdown();
    println!("Run history: {} rows in {}", log.rows(), demo.output_dir.join("runs.csv").display());
    Ok(())
}
