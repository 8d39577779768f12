//! Unit tests for gp-env.

use gp_core::{NodeId, SimConfig, SimRng};
use gp_network::{CityGraph, CityGraphBuilder, GridSpec, generate_grid};

use crate::DynamicEnvironment;

// ── Helpers ───────────────────────────────────────────────────────────────────

fn city(n: u32) -> CityGraph {
    generate_grid(GridSpec::new(n, 100.0), &mut SimRng::new(1))
}

fn env(graph: &CityGraph) -> DynamicEnvironment {
    DynamicEnvironment::new(graph, &SimConfig::default(), SimRng::new(7)).unwrap()
}

/// 0 ↔ 1 ↔ 2 ↔ 3 along the x axis, 100 units apart.
fn line4() -> CityGraph {
    let mut b = CityGraphBuilder::new();
    let ids: Vec<NodeId> = (0..4).map(|i| b.add_node(i as f64 * 100.0, 0.0)).collect();
    for w in ids.windows(2) {
        b.add_road(w[0], w[1], 100.0, 0.0);
    }
    b.build()
}

// ── TrafficMap ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod traffic {
    use super::*;
    use crate::traffic::{MAX_FACTOR, MIN_FACTOR, MISSING_FACTOR};
    use crate::TrafficMap;

    #[test]
    fn one_entry_per_road() {
        let g = city(5);
        let t = TrafficMap::for_graph(&g, &mut SimRng::new(3));
        assert_eq!(t.len(), g.edge_count() / 2);
        for e in g.all_edges() {
            let f = t.factor(e.from, e.to);
            assert!((0.3..0.7).contains(&f), "{f}");
            assert_eq!(f, t.factor(e.to, e.from));
        }
    }

    #[test]
    fn non_road_reads_default() {
        let g = city(4);
        let t = TrafficMap::for_graph(&g, &mut SimRng::new(3));
        assert_eq!(t.factor(NodeId(0), NodeId(15)), MISSING_FACTOR);
    }

    #[test]
    fn perturb_stays_in_bounds() {
        let g = city(4);
        let mut rng = SimRng::new(9);
        let mut t = TrafficMap::for_graph(&g, &mut rng);
        for _ in 0..1_000 {
            t.perturb(0.15, &mut rng);
        }
        for (_, f) in t.sorted() {
            assert!((MIN_FACTOR..=MAX_FACTOR).contains(&f), "{f}");
        }
    }

    #[test]
    fn set_all_clamps() {
        let g = city(3);
        let mut t = TrafficMap::for_graph(&g, &mut SimRng::new(1));
        t.set_all(7.0);
        assert!(t.sorted().iter().all(|&(_, f)| f == MAX_FACTOR));
        t.set_all(0.0);
        assert!(t.sorted().iter().all(|&(_, f)| f == MIN_FACTOR));
    }
}

// ── Incidents ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod incident {
    use super::*;
    use crate::{Incident, IncidentLog, IncidentType, MAX_ACTIVE_INCIDENTS};

    #[test]
    fn capped_and_one_per_node() {
        let mut log = IncidentLog::new();
        assert!(log.push(Incident::new(NodeId(1), IncidentType::Accident, 0.5)));
        assert!(!log.push(Incident::new(NodeId(1), IncidentType::Festival, 0.5)));
        assert!(log.push(Incident::new(NodeId(2), IncidentType::Festival, 0.5)));
        assert!(log.push(Incident::new(NodeId(3), IncidentType::Construction, 0.5)));
        assert!(!log.push(Incident::new(NodeId(4), IncidentType::Accident, 0.5)));
        assert_eq!(log.len(), MAX_ACTIVE_INCIDENTS);
    }

    #[test]
    fn resolves_oldest_first() {
        let mut log = IncidentLog::new();
        log.push(Incident::new(NodeId(5), IncidentType::Accident, 0.1));
        log.push(Incident::new(NodeId(6), IncidentType::Festival, 0.1));
        assert_eq!(log.resolve_oldest().unwrap().node, NodeId(5));
        assert_eq!(log.resolve_oldest().unwrap().node, NodeId(6));
        assert!(log.resolve_oldest().is_none());
    }

    #[test]
    fn road_lookup_checks_both_ends() {
        let mut log = IncidentLog::new();
        log.push(Incident::new(NodeId(5), IncidentType::Accident, 0.1));
        assert!(log.on_road(NodeId(4), NodeId(5)).is_some());
        assert!(log.on_road(NodeId(5), NodeId(6)).is_some());
        assert!(log.on_road(NodeId(6), NodeId(7)).is_none());
    }

    #[test]
    fn multipliers() {
        assert_eq!(IncidentType::Accident.traffic_multiplier(), 2.0);
        assert_eq!(IncidentType::RoadClosure.traffic_multiplier(), 100.0);
        assert_eq!(IncidentType::Construction.traffic_multiplier(), 1.5);
        assert_eq!(IncidentType::Festival.traffic_multiplier(), 1.8);
        assert_eq!(IncidentType::None.traffic_multiplier(), 1.0);
    }

    #[test]
    fn description_and_severity() {
        let i = Incident::new(NodeId(12), IncidentType::RoadClosure, 3.0);
        assert_eq!(i.description, "road_closure reported at N12");
        assert_eq!(i.severity, 1.0);
    }
}

// ── Weather ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod weather {
    use super::*;
    use crate::{FLOOD_IMPACT, WeatherReading, WeatherState, WeatherType, classify};

    fn reading(code: u16, rain_mm: f64) -> WeatherReading {
        WeatherReading { rain_mm, weather_code: code, wind_speed: 3.0 }
    }

    #[test]
    fn impact_table() {
        assert_eq!(WeatherType::Clear.impact(), 1.0);
        assert_eq!(WeatherType::Rainy.impact(), 1.5);
        assert_eq!(WeatherType::Stormy.impact(), 2.5);
        assert_eq!(WeatherType::Foggy.impact(), 1.8);
        assert_eq!(WeatherType::Snowy.impact(), 3.0);
    }

    #[test]
    fn flood_overrides_weather_type() {
        let mut w = WeatherState { kind: WeatherType::Snowy, ..WeatherState::default() };
        w.flood_zones.insert(NodeId(4));
        assert_eq!(w.impact(NodeId(4)), FLOOD_IMPACT);
        assert_eq!(w.impact(NodeId(5)), 3.0);
    }

    #[test]
    fn rain_thresholds() {
        assert_eq!(WeatherType::for_rain(0.9), WeatherType::Stormy);
        assert_eq!(WeatherType::for_rain(0.8), WeatherType::Rainy);
        assert_eq!(WeatherType::for_rain(0.31), WeatherType::Rainy);
        assert_eq!(WeatherType::for_rain(0.3), WeatherType::Clear);
    }

    #[test]
    fn sampled_type_never_contradicts_heavy_rain() {
        let mut rng = SimRng::new(4);
        for _ in 0..200 {
            assert_eq!(WeatherType::sample(0.95, &mut rng), WeatherType::Stormy);
            assert_eq!(WeatherType::sample(0.5, &mut rng), WeatherType::Rainy);
            let light = WeatherType::sample(0.05, &mut rng);
            assert!(matches!(light, WeatherType::Clear | WeatherType::Foggy));
        }
    }

    #[test]
    fn classify_codes() {
        assert_eq!(classify(&reading(95, 0.0)).kind, WeatherType::Stormy);
        assert_eq!(classify(&reading(99, 12.0)).kind, WeatherType::Stormy);
        assert_eq!(classify(&reading(71, 0.0)).kind, WeatherType::Snowy);
        assert_eq!(classify(&reading(61, 2.0)).kind, WeatherType::Rainy);
        assert_eq!(classify(&reading(45, 0.0)).kind, WeatherType::Foggy);
        assert_eq!(classify(&reading(45, 0.6)).kind, WeatherType::Rainy);
        assert_eq!(classify(&reading(3, 0.5)).kind, WeatherType::Clear);
    }

    #[test]
    fn classify_rain_and_visibility() {
        let c = classify(&reading(61, 2.0));
        assert!((c.rain - 0.2).abs() < 1e-12);
        assert_eq!(c.visibility, 1.0);
        assert_eq!(classify(&reading(63, 25.0)).rain, 1.0);
        assert_eq!(classify(&reading(48, 0.0)).visibility, 0.4);
        assert_eq!(classify(&reading(96, 0.0)).visibility, 0.5);
        assert_eq!(classify(&reading(75, 0.0)).visibility, 0.6);
    }

    #[test]
    fn classify_is_pure() {
        let r = reading(80, 3.3);
        assert_eq!(classify(&r), classify(&r));
    }

    #[test]
    fn regenerated_floods_are_few_and_valid() {
        let mut rng = SimRng::new(2);
        let mut w = WeatherState::default();
        for _ in 0..100 {
            w.regenerate_floods(64, &mut rng);
            assert!(w.flood_zones.len() <= 2);
            assert!(w.flood_zones.iter().all(|n| n.index() < 64));
        }
    }
}

// ── Forecast ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod forecast {
    use crate::forecast::{historical_trend, predicted_traffic};

    #[test]
    fn trend_peaks_at_rush_hours() {
        assert!((historical_trend(480) - 0.5).abs() < 1e-9);
        assert!((historical_trend(1_080) - 0.5).abs() < 1e-9);
        assert!(historical_trend(0) < 1e-9);
        assert!(historical_trend(780) < 1e-9);
        assert!(historical_trend(500) < historical_trend(480));
        assert!(historical_trend(500) > historical_trend(560));
    }

    #[test]
    fn blend_weights() {
        assert!((predicted_traffic(1.0, 480, 0) - 0.85).abs() < 1e-9);
        assert!((predicted_traffic(1.0, 0, 0) - 0.7).abs() < 1e-9);
    }

    #[test]
    fn offset_wraps_midnight() {
        assert_eq!(predicted_traffic(0.4, 1_430, 50), predicted_traffic(0.4, 40, 0));
        assert_eq!(predicted_traffic(0.4, 465, 15), predicted_traffic(0.4, 480, 0));
    }
}

// ── City profiles ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod profile {
    use crate::{CITY_PROFILES, CityProfile, EnvError};

    #[test]
    fn lookup_ignores_case() {
        assert_eq!(CityProfile::lookup("mumbai").unwrap().name, "Mumbai");
        assert_eq!(CityProfile::lookup(" BANGALORE ").unwrap().name, "Bangalore");
    }

    #[test]
    fn unknown_city_is_an_error() {
        assert!(matches!(CityProfile::lookup("Atlantis"), Err(EnvError::UnknownCity(_))));
    }

    #[test]
    fn values_in_range() {
        for p in &CITY_PROFILES {
            assert!((0.0..=1.0).contains(&p.traffic_volatility), "{}", p.name);
            assert!((0.0..=1.0).contains(&p.weather_risk), "{}", p.name);
            assert!(p.average_speed > 0.0);
        }
    }

    #[test]
    fn generic_keeps_base_rates() {
        let g = CityProfile::generic();
        assert_eq!(g.traffic_scale(), 1.0);
        assert_eq!(g.weather_scale(), 1.0);
    }
}

// ── UpdateScheduler ───────────────────────────────────────────────────────────

#[cfg(test)]
mod scheduler {
    use crate::UpdateScheduler;

    #[test]
    fn stop_before_start_and_twice() {
        let mut s = UpdateScheduler::new(3_000);
        s.stop();
        s.stop();
        assert!(!s.is_running());
        assert_eq!(s.advance(60_000), 0);
    }

    #[test]
    fn fires_once_per_interval() {
        let mut s = UpdateScheduler::new(3_000);
        s.start();
        assert_eq!(s.advance(2_999), 0);
        assert_eq!(s.advance(1), 1);
        assert_eq!(s.advance(9_000), 3);
        assert_eq!(s.advance(1_000), 0);
    }

    #[test]
    fn restart_does_not_reset_phase() {
        let mut s = UpdateScheduler::new(1_000);
        s.start();
        s.advance(600);
        s.start();
        assert_eq!(s.advance(400), 1);
    }

    #[test]
    fn nothing_fires_after_stop() {
        let mut s = UpdateScheduler::new(1_000);
        s.start();
        assert_eq!(s.advance(2_500), 2);
        s.stop();
        s.stop();
        assert_eq!(s.advance(10_000), 0);
        assert_eq!(s.advance(10_000), 0);
    }

    #[test]
    fn start_after_stop_counts_from_now() {
        let mut s = UpdateScheduler::new(1_000);
        s.advance(5_500);
        s.start();
        assert_eq!(s.advance(999), 0);
        assert_eq!(s.advance(1), 1);
    }
}

// ── DynamicEnvironment ────────────────────────────────────────────────────────

#[cfg(test)]
mod environment {
    use gp_core::{DeliveryConstraint, Priority, VehicleConstraints, VehicleType};
    use gp_network::{ConstrainedRouter, Router};

    use super::*;
    use crate::traffic::{MAX_FACTOR, MIN_FACTOR};
    use crate::{EnvError, IncidentType, MAX_ACTIVE_INCIDENTS, WeatherType};

    #[test]
    fn initial_state() {
        let g = city(8);
        let e = env(&g);
        assert_eq!(e.node_count(), 64);
        assert_eq!(e.clock().minute(), 480);
        assert!(e.rain_level() < 0.5);
        assert!(e.weather().flood_zones.len() <= 2);
        assert_eq!(e.incident_count(), 0);
        assert_eq!(e.fleet().len(), 5);
        assert_eq!(e.profile().name, "Generic");
    }

    #[test]
    fn unknown_city_in_config() {
        let g = city(3);
        let config = SimConfig { city: "Gotham".into(), ..SimConfig::default() };
        let result = DynamicEnvironment::new(&g, &config, SimRng::new(1));
        assert!(matches!(result, Err(EnvError::UnknownCity(_))));
    }

    #[test]
    fn incident_multiplies_both_directions() {
        let g = city(8);
        let mut e = env(&g);
        e.set_uniform_traffic(0.5);
        assert!(e.add_incident(NodeId(1), IncidentType::Accident, 0.5).unwrap());
        assert_eq!(e.traffic_factor(NodeId(0), NodeId(1)), 1.0);
        assert_eq!(e.traffic_factor(NodeId(1), NodeId(0)), 1.0);
        assert_eq!(e.traffic_factor(NodeId(1), NodeId(2)), 1.0);
        assert_eq!(e.traffic_factor(NodeId(8), NodeId(9)), 0.5);
        assert!(e.incident_at(NodeId(1)).is_some());
    }

    #[test]
    fn road_closure_is_effectively_impassable() {
        let g = city(8);
        let mut e = env(&g);
        e.set_uniform_traffic(0.5);
        e.add_incident(NodeId(9), IncidentType::RoadClosure, 1.0).unwrap();
        assert_eq!(e.traffic_factor(NodeId(9), NodeId(10)), 50.0);
    }

    #[test]
    fn incident_on_unknown_node() {
        let g = city(3);
        let mut e = env(&g);
        assert!(e.add_incident(NodeId(9), IncidentType::Accident, 0.5).is_err());
        assert!(e.set_flood_zones([NodeId(2), NodeId(40)]).is_err());
    }

    #[test]
    fn flood_zones_dominate_weather() {
        let g = city(4);
        let mut e = env(&g);
        e.set_rain_level(0.5);
        e.set_flood_zones([NodeId(5)]).unwrap();
        assert!(e.is_flooded(NodeId(5)));
        assert_eq!(e.weather_impact(NodeId(5)), 5.0);
        assert_eq!(e.weather_impact(NodeId(6)), 1.5);
        e.clear_flood_zones();
        assert!(!e.is_flooded(NodeId(5)));
    }

    #[test]
    fn traffic_intensity_override() {
        let g = city(4);
        let mut e = env(&g);
        e.set_traffic_intensity(0.25);
        for edge in g.all_edges() {
            assert_eq!(e.traffic_factor(edge.from, edge.to), 0.5);
        }
        e.set_traffic_intensity(0.0);
        assert_eq!(e.traffic_factor(NodeId(0), NodeId(1)), 0.1);
        e.set_traffic_intensity(3.0);
        assert_eq!(e.traffic_factor(NodeId(0), NodeId(1)), 2.0);
    }

    #[test]
    fn rain_override() {
        let g = city(4);
        let mut e = env(&g);
        e.set_rain_level(1.7);
        assert_eq!(e.rain_level(), 1.0);
        assert_eq!(e.weather_type(), WeatherType::Stormy);
        assert_eq!(e.visibility(), 0.5);
        assert!(e.weather().flood_zones.len() <= 2);

        e.set_rain_level(0.5);
        assert_eq!(e.weather_type(), WeatherType::Rainy);
        e.set_rain_level(-1.0);
        assert_eq!(e.rain_level(), 0.0);
        assert_eq!(e.weather_type(), WeatherType::Clear);
        assert_eq!(e.visibility(), 1.0);
    }

    #[test]
    fn ticks_keep_state_in_bounds() {
        let g = city(6);
        let mut e = env(&g);
        for _ in 0..500 {
            e.update_conditions();
            assert!((0.0..=1.0).contains(&e.rain_level()));
            assert!(e.incident_count() <= MAX_ACTIVE_INCIDENTS);
        }
        for edge in g.all_edges() {
            let snapshot = e.snapshot();
            let f = snapshot.traffic_between(edge.from, edge.to).unwrap();
            assert!((MIN_FACTOR..=MAX_FACTOR).contains(&f));
        }
        assert_eq!(e.clock().minute(), 980);
    }

    #[test]
    fn clock_wraps_at_midnight() {
        let g = city(3);
        let config = SimConfig { start_minute: 1_439.0, ..SimConfig::default() };
        let mut e = DynamicEnvironment::new(&g, &config, SimRng::new(1)).unwrap();
        e.update_conditions();
        assert_eq!(e.clock().minute(), 0);
    }

    #[test]
    fn same_seed_same_history() {
        let g = city(5);
        let mut a = env(&g);
        let mut b = env(&g);
        for _ in 0..50 {
            a.update_conditions();
            a.update_fleet(&g);
            b.update_conditions();
            b.update_fleet(&g);
        }
        assert_eq!(a.snapshot(), b.snapshot());
        assert_eq!(a.fleet().vehicles(), b.fleet().vehicles());
    }

    #[test]
    fn chaos_floods_and_raises_rain() {
        let g = city(8);
        let mut e = env(&g);
        e.set_rain_level(0.3);
        e.clear_flood_zones();
        let report = e.trigger_chaos();
        assert!((2..=5).contains(&report.affected.len()));
        assert!(report.affected.iter().all(|&n| e.is_flooded(n)));
        assert!((report.rain - 0.7).abs() < 1e-12);

        let again = e.trigger_chaos();
        assert_eq!(again.rain, 1.0);
    }

    #[test]
    fn set_city_switches_profile() {
        let g = city(3);
        let mut e = env(&g);
        assert_eq!(e.set_city("delhi").unwrap().name, "Delhi");
        assert_eq!(e.profile().name, "Delhi");
        assert!(e.set_city("nowhere").is_err());
        assert_eq!(e.profile().name, "Delhi");
    }

    #[test]
    fn snapshot_mirrors_state() {
        let g = city(4);
        let mut e = env(&g);
        e.set_uniform_traffic(0.5);
        e.set_flood_zones([NodeId(7), NodeId(2)]).unwrap();
        e.add_incident(NodeId(3), IncidentType::Festival, 0.2).unwrap();

        let s = e.snapshot();
        assert_eq!(s.traffic.len(), g.edge_count() / 2);
        assert_eq!(s.traffic_between(NodeId(1), NodeId(0)), Some(0.5));
        assert_eq!(s.weather.flood_zones, vec![NodeId(2), NodeId(7)]);
        assert_eq!(s.incidents.len(), 1);
        assert_eq!(s.minute, 480);
        assert_eq!(s.city, "Generic");
    }

    #[test]
    fn router_reads_live_conditions() {
        let g = city(8);
        let mut e = env(&g);
        e.set_uniform_traffic(0.5);
        e.set_rain_level(0.0);
        e.clear_flood_zones();
        let route = ConstrainedRouter
            .find_route(
                &g,
                &e,
                NodeId(0),
                NodeId(63),
                &DeliveryConstraint::default(),
                &VehicleConstraints::new(VehicleType::Ev, 200.0, 150.0),
            )
            .unwrap();
        assert!(route.connects(NodeId(0), NodeId(63)));
        assert!(!route.fallback);
        assert!(route.steps.iter().all(|s| s.traffic == 0.5 && s.weather == 1.0));
    }

    #[test]
    fn default_priority_is_standard() {
        assert_eq!(DeliveryConstraint::default().priority, Priority::Standard);
    }
}

// ── Fleet ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod fleet {
    use gp_core::{VehicleConstraints, VehicleId, VehicleType};
    use gp_network::UniformConditions;

    use super::*;
    use crate::fleet::{MAX_STRESS, move_probability, next_hop};
    use crate::{Fleet, FleetVehicle, VehicleStatus};

    fn one_vehicle(range: f64, at: NodeId) -> Fleet {
        Fleet::from_vehicles(vec![FleetVehicle::new(
            VehicleId(0),
            VehicleConstraints::new(VehicleType::Ev, 200.0, range),
            at,
        )])
    }

    #[test]
    fn spawn_alternates_types() {
        let g = city(4);
        let f = Fleet::spawn(&g, 4, &mut SimRng::new(1));
        let v = f.vehicles();
        assert_eq!(v.len(), 4);
        assert_eq!(v[0].id.to_string(), "VH-100");
        assert_eq!(v[3].id.to_string(), "VH-103");
        assert_eq!(v[0].constraints.vehicle_type, VehicleType::Ev);
        assert_eq!(v[1].constraints.vehicle_type, VehicleType::Petrol);
        assert!(v.iter().all(|x| x.status == VehicleStatus::Idle && x.location.index() < 16));
        assert!(v.iter().all(|x| x.constraints.current_range >= 0.5 * x.constraints.max_range));
    }

    #[test]
    fn heavier_traffic_moves_less() {
        assert!(move_probability(0.1) > move_probability(1.0));
        assert!(move_probability(1.0) > move_probability(2.0));
        assert_eq!(move_probability(0.0), 0.95);
        assert_eq!(move_probability(100.0), 0.05);
    }

    #[test]
    fn next_hop_heads_for_destination() {
        let g = line4();
        assert_eq!(next_hop(&g, NodeId(1), NodeId(3)), Some(NodeId(2)));
        assert_eq!(next_hop(&g, NodeId(2), NodeId(0)), Some(NodeId(1)));
    }

    #[test]
    fn dispatched_vehicle_arrives() {
        let g = line4();
        let cond = UniformConditions::new(0.1, 1.0);
        let mut fleet = one_vehicle(200.0, NodeId(0));
        let mut rng = SimRng::new(5);

        let mut arrived = false;
        for _ in 0..500 {
            let v = fleet.get_mut(VehicleId(0)).unwrap();
            if v.status == VehicleStatus::Idle {
                v.dispatch(NodeId(3));
            }
            fleet.update(&g, &cond, &mut rng);
            if fleet.get(VehicleId(0)).unwrap().location == NodeId(3) {
                arrived = true;
                break;
            }
        }
        assert!(arrived);
        let v = fleet.get(VehicleId(0)).unwrap();
        assert!(v.constraints.current_range < 200.0);
        assert_eq!(v.destination, None);
    }

    #[test]
    fn stress_stays_bounded() {
        let g = line4();
        let cond = UniformConditions::new(100.0, 1.0);
        let mut fleet = one_vehicle(200.0, NodeId(0));
        let mut rng = SimRng::new(8);
        let mut peak: f64 = 0.0;
        for _ in 0..300 {
            let v = fleet.get_mut(VehicleId(0)).unwrap();
            if v.status == VehicleStatus::Idle {
                let target = if v.location == NodeId(3) { NodeId(0) } else { NodeId(3) };
                v.dispatch(target);
            }
            fleet.update(&g, &cond, &mut rng);
            let s = fleet.get(VehicleId(0)).unwrap().stress_index;
            assert!((0.0..=MAX_STRESS).contains(&s));
            peak = peak.max(s);
        }
        assert!(peak > 0.0);
    }

    #[test]
    fn low_range_goes_charging_then_idle() {
        let g = line4();
        let cond = UniformConditions::neutral();
        let mut fleet = one_vehicle(10.0, NodeId(1));
        let mut rng = SimRng::new(1);

        fleet.update(&g, &cond, &mut rng);
        assert_eq!(fleet.get(VehicleId(0)).unwrap().status, VehicleStatus::Charging);

        for _ in 0..20 {
            fleet.update(&g, &cond, &mut rng);
            if fleet.get(VehicleId(0)).unwrap().status != VehicleStatus::Charging {
                break;
            }
        }
        let v = fleet.get(VehicleId(0)).unwrap();
        assert_eq!(v.constraints.current_range, 200.0);
        assert_eq!(v.location, NodeId(1));
    }

    #[test]
    fn dispatch_to_own_location_is_noop() {
        let mut fleet = one_vehicle(100.0, NodeId(2));
        let v = fleet.get_mut(VehicleId(0)).unwrap();
        v.dispatch(NodeId(2));
        assert_eq!(v.status, VehicleStatus::Idle);
        assert!(v.route.is_empty());
    }
}
