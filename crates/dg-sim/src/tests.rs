//! Integration tests for dg-sim.

use dg_core::{
    BroadcastStrategy, MarkovParams, MobilityKind, Point, Round, ScenarioKind, SimConfig, SimRng,
    StationId,
};
use dg_flood::{BroadcastSummary, MessageStore};
use dg_mobility::Stationary;
use dg_station::StationStore;
use dg_topology::LinkState;
use rustc_hash::FxHashSet;

use crate::{
    ChurnModel, NoopObserver, RoundMetrics, SimBuilder, SimError, SimObserver, Termination,
    VisualTag, nervousness,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Stationary stations in a 100×100 square with a 10-unit range.
fn static_config(n: usize) -> SimConfig {
    SimConfig {
        station_count:          n,
        env_size:               100.0,
        connection_range:       10.0,
        mobility:               MobilityKind::Stationary,
        max_rounds:             100,
        output_interval_rounds: 1,
        ..SimConfig::default()
    }
}

/// `n` points on a horizontal line, consecutive gap just under the range.
fn line_positions(n: usize) -> Vec<Point> {
    (0..n).map(|i| Point::new(10.0 + i as f64 * 9.9, 50.0)).collect()
}

fn mobile_config(n: usize, seed: u64) -> SimConfig {
    SimConfig {
        station_count:    n,
        env_size:         300.0,
        connection_range: 50.0,
        max_rounds:       40,
        seed,
        ..SimConfig::default()
    }
}

/// Brute-force check: an edge exists iff the endpoints are closer than
/// `range`.
fn assert_proximity_exact(stations: &StationStore, graph: &dg_topology::ProximityGraph, range: f64) {
    let positions = stations.mobile_positions();
    for (i, &(u, pu)) in positions.iter().enumerate() {
        for &(v, pv) in &positions[i + 1..] {
            assert_eq!(graph.contains(u, v), pu.distance(pv) < range, "{u}/{v}");
        }
    }
}

// ── SimBuilder validation ─────────────────────────────────────────────────────

#[cfg(test)]
mod builder_tests {
    use super::*;

    #[test]
    fn builds_with_defaults() {
        let sim = SimBuilder::new(mobile_config(40, 1)).build().unwrap();
        assert_eq!(sim.stations.mobile_count(), 40);
        assert_eq!(sim.stations.len(), 44);
        assert_eq!(sim.messages.len(), 40);
        assert_eq!(sim.round(), Round::ZERO);
        assert!(sim.messages.source().is_some());
        assert!(!sim.is_finished());
    }

    #[test]
    fn invalid_config_is_rejected_before_round_zero() {
        let config = SimConfig { connection_range: 0.0, ..SimConfig::default() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));

        let config = SimConfig { scenario: ScenarioKind::Churn { ratio: 1.5 }, ..SimConfig::default() };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));

        let config = SimConfig {
            mobility: MobilityKind::Manhattan,
            env_size: 10.0,
            ..static_config(5)
        };
        assert!(matches!(SimBuilder::new(config).build(), Err(SimError::Config(_))));
    }

    #[test]
    fn position_count_mismatch_errors() {
        let result = SimBuilder::new(static_config(5)).positions(line_positions(4)).build();
        assert!(matches!(
            result,
            Err(SimError::StationCountMismatch { expected: 5, got: 4, .. })
        ));
    }

    #[test]
    fn anchor_cannot_be_source() {
        // Mobile ids are 0..5, anchors 5..9.
        let result = SimBuilder::new(static_config(5))
            .positions(line_positions(5))
            .source(StationId(5))
            .build();
        assert!(matches!(result, Err(SimError::UnknownSource(StationId(5)))));
    }

    #[test]
    fn no_broadcast_means_no_source() {
        let config = SimConfig { broadcast: BroadcastStrategy::NoBroadcasting, ..mobile_config(10, 2) };
        let sim = SimBuilder::new(config).build().unwrap();
        assert_eq!(sim.messages.source(), None);
        assert_eq!(sim.messages.reached_count(), 0);
    }

    #[test]
    fn initial_graph_matches_positions() {
        let sim = SimBuilder::new(mobile_config(80, 3)).build().unwrap();
        assert_proximity_exact(&sim.stations, &sim.graph, 50.0);
    }
}

// ── Flooding over a static line ───────────────────────────────────────────────

#[cfg(test)]
mod line_flood {
    use super::*;

    #[test]
    fn five_in_a_line_reached_after_four_rounds() {
        let mut sim = SimBuilder::new(static_config(5))
            .positions(line_positions(5))
            .source(StationId(0))
            .build()
            .unwrap();

        for round in 1..=4 {
            let m = sim.advance_round();
            assert_eq!(m.reachability, round + 1);
            assert_eq!(m.acquisitions, 1);
            assert!(!sim.is_finished());
        }
        assert_eq!(sim.summary().performance, 1.0);

        let m = sim.advance_round();
        assert_eq!(m.acquisitions, 0);
        assert_eq!(sim.termination(), Some(Termination::FloodComplete));
    }

    #[test]
    fn run_reports_full_performance() {
        let mut sim = SimBuilder::new(static_config(5))
            .positions(line_positions(5))
            .source(StationId(0))
            .build()
            .unwrap();
        let summary = sim.run(&mut NoopObserver);
        assert_eq!(summary.performance, 1.0);
        assert_eq!(summary.rounds, 5);
        assert_eq!(summary.source, Some(StationId(0)));
        assert!((summary.efficiency - 1.6).abs() < 1e-12);
    }

    #[test]
    fn line_metrics() {
        let mut sim = SimBuilder::new(static_config(5))
            .positions(line_positions(5))
            .source(StationId(2))
            .build()
            .unwrap();
        let m = sim.advance_round();
        assert_eq!(m.usable_edges, 4);
        assert!((m.density - 0.4).abs() < 1e-12);
        assert_eq!(m.components, 1);
        assert_eq!(m.vertex_nervousness, 0.0);
        assert_eq!(m.edge_nervousness, 0.0);
        assert!(!m.flags.any());
        assert_eq!(m.transmitters, 1);
        assert_eq!(m.acquisitions, 2);
    }

    #[test]
    fn isolated_source_finishes_after_one_round() {
        let positions = vec![Point::new(10.0, 10.0), Point::new(80.0, 80.0)];
        let mut sim = SimBuilder::new(static_config(2))
            .positions(positions)
            .source(StationId(0))
            .build()
            .unwrap();
        let summary = sim.run(&mut NoopObserver);
        assert_eq!(summary.rounds, 1);
        assert_eq!(summary.reached, 1);
        assert_eq!(summary.performance, 0.5);
    }
}

// ── Time to live ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod ttl {
    use super::*;

    #[test]
    fn two_stations_ttl_two() {
        let (a, b) = (StationId(0), StationId(1));
        let config = SimConfig { scenario: ScenarioKind::TimeToLive { ttl: 2 }, ..static_config(2) };
        let mut sim = SimBuilder::new(config)
            .positions(vec![Point::new(10.0, 50.0), Point::new(15.0, 50.0)])
            .source(a)
            .build()
            .unwrap();

        let m = sim.advance_round();
        assert_eq!(m.acquisitions, 1);
        assert_eq!(sim.messages.get(b).unwrap().lifetime, Some(2));

        // Round 2: B still holds it; the source's own copy runs out.
        let m = sim.advance_round();
        assert_eq!(m.expired, 1);
        assert!(sim.messages.get(b).unwrap().has_message());
        assert!(!sim.messages.get(a).unwrap().has_message());

        // Round 3: B's copy clears.
        let m = sim.advance_round();
        assert_eq!(m.expired, 1);
        assert!(!sim.messages.get(b).unwrap().has_message());
        let tag = sim.station_views().into_iter().find(|v| v.id == b).unwrap().tag;
        assert_eq!(tag, VisualTag::TtlExpired);

        // Round 4: A re-transmits and B takes a fresh copy.
        sim.messages.seed_source(a, Some(2));
        let m = sim.advance_round();
        assert_eq!(m.acquisitions, 1);
        assert_eq!(sim.messages.get(b).unwrap().lifetime, Some(2));
    }
}

// ── Churn ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod churn {
    use super::*;

    fn churn_config(seed: u64) -> SimConfig {
        SimConfig { scenario: ScenarioKind::Churn { ratio: 0.2 }, ..mobile_config(60, seed) }
    }

    #[test]
    fn population_is_constant() {
        let mut sim = SimBuilder::new(churn_config(4)).build().unwrap();
        for _ in 0..25 {
            let m = sim.advance_round();
            assert_eq!(m.station_count, 60);
            assert_eq!(m.churned, 12);
            assert_eq!(sim.stations.mobile_count(), 60);
            assert_eq!(sim.stations.len(), 64);
            assert_eq!(sim.messages.len(), 60);
            assert_eq!(sim.mobility.store.len(), 60);
        }
    }

    #[test]
    fn replaced_stations_are_wired_by_proximity() {
        let mut sim = SimBuilder::new(churn_config(5)).build().unwrap();
        for _ in 0..10 {
            sim.advance_round();
            assert_proximity_exact(&sim.stations, &sim.graph, 50.0);
        }
    }

    #[test]
    fn vertex_nervousness_reflects_replacement() {
        let mut sim = SimBuilder::new(churn_config(6)).build().unwrap();
        let m = sim.advance_round();
        // 12 of 60 replaced: |⊕| = 24, |∪| = 72.
        assert!((m.vertex_nervousness - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn corner_stations_never_leave_and_cap_is_reported() {
        let positions = vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(0.0, 100.0),
            Point::new(100.0, 100.0),
            Point::new(40.0, 40.0),
            Point::new(60.0, 60.0),
        ];
        let config = SimConfig {
            scenario:  ScenarioKind::Churn { ratio: 1.0 },
            broadcast: BroadcastStrategy::NoBroadcasting,
            ..static_config(6)
        };
        let mut sim = SimBuilder::new(config).positions(positions).build().unwrap();

        let mut rng = SimRng::new(1);
        let report = ChurnModel::new(1.0).apply(
            &mut sim.stations,
            &mut sim.graph,
            &mut sim.mobility,
            &mut sim.messages,
            10.0,
            &mut rng,
        );
        assert_eq!(report.requested, 6);
        assert!(report.capped);
        assert_eq!(report.removed, vec![StationId(4), StationId(5)]);
        assert_eq!(report.added.len(), 2);
        assert_eq!(sim.stations.mobile_count(), 6);
        for id in 0..4 {
            assert!(sim.stations.contains(StationId(id)));
        }
    }

    #[test]
    fn zero_ratio_replaces_nobody() {
        let config = SimConfig { scenario: ScenarioKind::Churn { ratio: 0.0 }, ..mobile_config(30, 7) };
        let mut sim = SimBuilder::new(config).build().unwrap();
        let before = sim.stations.mobile_ids();
        let m = sim.advance_round();
        assert_eq!(m.churned, 0);
        assert_eq!(sim.stations.mobile_ids(), before);
    }
}

// ── Edge-Markovian links ──────────────────────────────────────────────────────

#[cfg(test)]
mod markovian {
    use super::*;

    fn markov_config(p: f64, q: f64) -> SimConfig {
        SimConfig {
            mobility:  MobilityKind::EdgeMarkovian,
            markov:    MarkovParams { p, q },
            broadcast: BroadcastStrategy::NoBroadcasting,
            ..mobile_config(50, 8)
        }
    }

    fn states(sim: &crate::Sim<Stationary>) -> Vec<LinkState> {
        sim.graph.edges().map(|(_, s)| s).collect()
    }

    #[test]
    fn no_fresh_edges_survive_a_round() {
        let mut sim = SimBuilder::new(markov_config(0.9, 0.9)).build().unwrap();
        for _ in 0..20 {
            let m = sim.advance_round();
            assert!(sim.graph.edges().all(|(_, s)| s != LinkState::Fresh));
            assert!(m.usable_edges <= sim.graph.edge_count());
            assert!((0.0..=1.0).contains(&m.density));
        }
    }

    #[test]
    fn stay_probability_one_freezes_links() {
        let mut sim = SimBuilder::new(markov_config(1.0, 1.0))
            .with_model(Stationary)
            .build()
            .unwrap();
        let initial = states(&sim);
        assert!(initial.iter().all(|s| matches!(s, LinkState::On | LinkState::Off)));
        for _ in 0..30 {
            sim.advance_round();
        }
        assert_eq!(states(&sim), initial);
    }

    #[test]
    fn stay_probability_zero_flips_every_link_every_round() {
        let mut sim = SimBuilder::new(markov_config(0.0, 0.0))
            .with_model(Stationary)
            .build()
            .unwrap();
        for _ in 0..10 {
            let before = states(&sim);
            sim.advance_round();
            for (a, b) in before.iter().zip(states(&sim)) {
                assert_ne!(*a, b);
            }
        }
    }
}

// ── Termination and determinism ───────────────────────────────────────────────

#[cfg(test)]
mod run_loop {
    use super::*;

    #[test]
    fn no_broadcast_runs_exactly_the_cap() {
        let config = SimConfig {
            broadcast:  BroadcastStrategy::NoBroadcasting,
            max_rounds: 7,
            ..mobile_config(20, 9)
        };
        let mut sim = SimBuilder::new(config).build().unwrap();
        let summary = sim.run(&mut NoopObserver);
        assert_eq!(summary.rounds, 7);
        assert_eq!(sim.termination(), Some(Termination::RoundCap));
        assert!(summary.efficiency_undefined());
    }

    #[test]
    fn flood_run_stops_by_cap_or_completion() {
        let mut sim = SimBuilder::new(mobile_config(60, 10)).build().unwrap();
        let summary = sim.run(&mut NoopObserver);
        assert!(summary.rounds <= 40);
        assert!(sim.is_finished());
        if sim.termination() == Some(Termination::FloodComplete) {
            assert!(!sim.messages.has_pending());
        }
    }

    #[test]
    fn reach_never_drops_without_ttl_or_churn() {
        let mut sim = SimBuilder::new(mobile_config(80, 11)).build().unwrap();
        let mut previous = sim.messages.reached_count();
        while !sim.is_finished() {
            let m = sim.advance_round();
            assert!(m.reachability >= previous);
            previous = m.reachability;
        }
    }

    #[test]
    fn same_seed_same_metrics() {
        let collect = |config: SimConfig| -> Vec<RoundMetrics> {
            let mut sim = SimBuilder::new(config).build().unwrap();
            (0..30).map(|_| sim.advance_round()).collect()
        };
        let config = SimConfig { mobility: MobilityKind::Manhattan, ..mobile_config(50, 12) };
        assert_eq!(collect(config.clone()), collect(config));
    }

    #[test]
    fn positions_stay_in_square_for_every_model() {
        for mobility in [
            MobilityKind::RandomWaypoint,
            MobilityKind::Manhattan,
            MobilityKind::EdgeMarkovian,
            MobilityKind::Brownian,
            MobilityKind::Follower,
        ] {
            let config = SimConfig {
                mobility,
                broadcast: BroadcastStrategy::NoBroadcasting,
                max_rounds: 60,
                ..mobile_config(30, 13)
            };
            let mut sim = SimBuilder::new(config).build().unwrap();
            sim.run(&mut NoopObserver);
            for s in sim.stations.mobile() {
                assert!((0.0..=300.0).contains(&s.position.x), "{mobility}: {}", s.position);
                assert!((0.0..=300.0).contains(&s.position.y), "{mobility}: {}", s.position);
            }
        }
    }
}

// ── Observer hooks ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_hooks {
    use super::*;

    #[derive(Default)]
    struct Counter {
        starts:    Vec<Round>,
        ends:      Vec<Round>,
        snapshots: Vec<Round>,
        final_:    Option<(Round, BroadcastSummary)>,
    }

    impl SimObserver for Counter {
        fn on_round_start(&mut self, round: Round) {
            self.starts.push(round);
        }
        fn on_round_end(&mut self, round: Round, metrics: &RoundMetrics) {
            assert_eq!(round, metrics.round);
            self.ends.push(round);
        }
        fn on_snapshot(&mut self, round: Round, stations: &StationStore, messages: &MessageStore) {
            assert_eq!(stations.mobile_count(), messages.len());
            self.snapshots.push(round);
        }
        fn on_sim_end(&mut self, final_round: Round, summary: &BroadcastSummary) {
            self.final_ = Some((final_round, *summary));
        }
    }

    #[test]
    fn hooks_fire_in_order() {
        let config = SimConfig { output_interval_rounds: 2, ..static_config(5) };
        let mut sim = SimBuilder::new(config)
            .positions(line_positions(5))
            .source(StationId(0))
            .build()
            .unwrap();
        let mut obs = Counter::default();
        sim.run(&mut obs);

        let rounds: Vec<Round> = (1..=5).map(Round).collect();
        assert_eq!(obs.starts, rounds);
        assert_eq!(obs.ends, rounds);
        assert_eq!(obs.snapshots, vec![Round(2), Round(4)]);
        let (last, summary) = obs.final_.unwrap();
        assert_eq!(last, Round(5));
        assert_eq!(summary.reached, 5);
    }

    #[test]
    fn run_rounds_ignores_termination() {
        let mut sim = SimBuilder::new(static_config(5))
            .positions(line_positions(5))
            .source(StationId(0))
            .build()
            .unwrap();
        let mut obs = Counter::default();
        sim.run_rounds(8, &mut obs);
        assert_eq!(obs.ends.len(), 8);
        assert_eq!(sim.round(), Round(8));
        assert!(obs.final_.is_none());
    }
}

// ── Views and nervousness ─────────────────────────────────────────────────────

#[cfg(test)]
mod views {
    use super::*;

    #[test]
    fn tags_follow_the_broadcast() {
        let mut sim = SimBuilder::new(static_config(3))
            .positions(line_positions(3))
            .source(StationId(0))
            .build()
            .unwrap();
        let tag = |sim: &crate::Sim<_>, id| {
            sim.station_views().into_iter().find(|v| v.id == StationId(id)).unwrap().tag
        };
        assert_eq!(tag(&sim, 0), VisualTag::Source);
        assert_eq!(tag(&sim, 1), VisualTag::Plain);
        assert_eq!(tag(&sim, 3), VisualTag::Anchor);

        sim.advance_round();
        assert_eq!(tag(&sim, 1), VisualTag::Carrying);
        sim.advance_round();
        assert_eq!(tag(&sim, 1), VisualTag::Done);
        assert_eq!(tag(&sim, 0), VisualTag::Source);
    }

    #[test]
    fn edge_views_carry_positions() {
        let sim = SimBuilder::new(static_config(3))
            .positions(line_positions(3))
            .source(StationId(0))
            .build()
            .unwrap();
        let edges = sim.edge_views();
        assert_eq!(edges.len(), 2);
        assert!(edges.iter().all(|e| e.usable));
        assert_eq!(edges[0].from, Point::new(10.0, 50.0));
    }

    #[test]
    fn nervousness_bounds() {
        let set = |v: &[u32]| -> FxHashSet<u32> { v.iter().copied().collect() };
        assert_eq!(nervousness(&set(&[1, 2, 3]), &set(&[1, 2, 3])), Some(0.0));
        assert_eq!(nervousness(&set(&[1, 2]), &set(&[3, 4])), Some(1.0));
        assert_eq!(nervousness(&set(&[1, 2, 3]), &set(&[2, 3, 4])), Some(0.5));
        assert_eq!(nervousness(&set(&[]), &set(&[])), None);
        assert_eq!(nervousness(&set(&[1]), &set(&[])), Some(1.0));
    }

    #[test]
    fn empty_edge_sets_are_flagged() {
        let positions = vec![Point::new(10.0, 10.0), Point::new(80.0, 80.0)];
        let mut sim = SimBuilder::new(static_config(2))
            .positions(positions)
            .source(StationId(0))
            .build()
            .unwrap();
        let m = sim.advance_round();
        assert_eq!(m.edge_nervousness, 0.0);
        assert!(m.flags.edge_nervousness_empty);
        assert!(!m.flags.vertex_nervousness_empty);
        assert_eq!(m.components, 2);
    }
}
