//! Unit tests for dg-topology.

use dg_core::{MarkovParams, Point, SimRng, StationId};

use crate::{
    EdgeKey, EdgeMarkov, LinkMode, LinkState, ProximityGraph, connected_components, density,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn random_positions(n: u32, env: f64, seed: u64) -> Vec<(StationId, Point)> {
    let mut rng = SimRng::new(seed);
    (0..n)
        .map(|i| (StationId(i), Point::new(rng.unit() * env, rng.unit() * env)))
        .collect()
}

fn line(n: u32, gap: f64) -> Vec<(StationId, Point)> {
    (0..n).map(|i| (StationId(i), Point::new(i as f64 * gap, 0.0))).collect()
}

// ── EdgeKey ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod edge_key {
    use super::*;

    #[test]
    fn unordered() {
        assert_eq!(EdgeKey::new(StationId(3), StationId(1)), EdgeKey::new(StationId(1), StationId(3)));
        assert_eq!(EdgeKey::new(StationId(3), StationId(1)).endpoints(), (StationId(1), StationId(3)));
    }

    #[test]
    fn other_endpoint() {
        let k = EdgeKey::new(StationId(2), StationId(5));
        assert_eq!(k.other(StationId(2)), Some(StationId(5)));
        assert_eq!(k.other(StationId(5)), Some(StationId(2)));
        assert_eq!(k.other(StationId(9)), None);
    }

    #[test]
    #[should_panic]
    fn self_loop_panics() {
        EdgeKey::new(StationId(4), StationId(4));
    }
}

// ── ProximityGraph ────────────────────────────────────────────────────────────

#[cfg(test)]
mod graph {
    use super::*;

    #[test]
    fn add_is_idempotent() {
        let mut g = ProximityGraph::new(LinkMode::Proximity);
        let k = EdgeKey::new(StationId(0), StationId(1));
        assert!(g.add_edge(k));
        assert!(!g.add_edge(k));
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(StationId(0)), 1);
        assert_eq!(g.degree(StationId(1)), 1);
    }

    #[test]
    fn remove_station_drops_incident_edges() {
        let mut g = ProximityGraph::new(LinkMode::Proximity);
        g.add_edge(EdgeKey::new(StationId(0), StationId(1)));
        g.add_edge(EdgeKey::new(StationId(0), StationId(2)));
        g.add_edge(EdgeKey::new(StationId(1), StationId(2)));
        assert_eq!(g.remove_station(StationId(0)), 2);
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(StationId(0)), 0);
        assert!(g.contains(StationId(1), StationId(2)));
    }

    #[test]
    fn markovian_edges_start_fresh_and_unusable() {
        let mut g = ProximityGraph::new(LinkMode::Markovian);
        let k = EdgeKey::new(StationId(0), StationId(1));
        g.add_edge(k);
        assert_eq!(g.state(k), Some(LinkState::Fresh));
        assert_eq!(g.usable_edge_count(), 0);
        assert_eq!(g.usable_neighbors(StationId(0)).count(), 0);

        g.set_state(k, LinkState::On);
        assert_eq!(g.usable_neighbors(StationId(0)).collect::<Vec<_>>(), vec![StationId(1)]);
    }
}

// ── Proximity rebuild ─────────────────────────────────────────────────────────

#[cfg(test)]
mod proximity {
    use super::*;

    #[test]
    fn edge_iff_closer_than_range() {
        let positions = random_positions(120, 500.0, 7);
        let range = 60.0;
        let mut g = ProximityGraph::new(LinkMode::Proximity);
        g.recompute_edges(&positions, range);

        for (i, &(u, pu)) in positions.iter().enumerate() {
            for &(v, pv) in &positions[i + 1..] {
                assert_eq!(
                    g.contains(u, v),
                    pu.distance(pv) < range,
                    "pair {u}/{v} at distance {}",
                    pu.distance(pv)
                );
            }
        }
    }

    #[test]
    fn recompute_is_idempotent() {
        let positions = random_positions(80, 300.0, 11);
        let mut g = ProximityGraph::new(LinkMode::Proximity);
        g.recompute_edges(&positions, 50.0);
        let first: Vec<_> = g.edges().collect();

        let diff = g.recompute_edges(&positions, 50.0);
        assert!(diff.is_empty());
        assert_eq!(g.edges().collect::<Vec<_>>(), first);
    }

    #[test]
    fn exactly_at_range_is_not_an_edge() {
        let mut g = ProximityGraph::new(LinkMode::Proximity);
        g.recompute_edges(&line(2, 10.0), 10.0);
        assert_eq!(g.edge_count(), 0);
        g.recompute_edges(&line(2, 9.999), 10.0);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn moving_apart_removes_edge() {
        let mut g = ProximityGraph::new(LinkMode::Proximity);
        let diff = g.recompute_edges(&line(3, 5.0), 8.0);
        assert_eq!(diff.added.len(), 2);

        let diff = g.recompute_edges(&line(3, 20.0), 8.0);
        assert_eq!(diff.removed.len(), 2);
        assert!(g.is_empty());
    }

    #[test]
    fn missing_station_loses_its_edges() {
        let mut g = ProximityGraph::new(LinkMode::Proximity);
        let mut positions = line(3, 5.0);
        g.recompute_edges(&positions, 8.0);
        positions.remove(1);
        g.recompute_edges(&positions, 8.0);
        assert_eq!(g.degree(StationId(1)), 0);
    }

    #[test]
    fn kept_edges_keep_their_state() {
        let mut g = ProximityGraph::new(LinkMode::Markovian);
        g.recompute_edges(&line(2, 1.0), 5.0);
        let k = EdgeKey::new(StationId(0), StationId(1));
        g.set_state(k, LinkState::Off);
        g.recompute_edges(&line(2, 2.0), 5.0);
        assert_eq!(g.state(k), Some(LinkState::Off));
    }

    #[test]
    fn connect_station_wires_only_in_range() {
        let mut g = ProximityGraph::new(LinkMode::Proximity);
        let others = line(4, 10.0); // x = 0, 10, 20, 30
        let added = g.connect_station(StationId(9), Point::new(12.0, 0.0), &others, 9.0);
        let mut ends: Vec<_> = added.iter().filter_map(|k| k.other(StationId(9))).collect();
        ends.sort();
        assert_eq!(ends, vec![StationId(1), StationId(2)]);
    }
}

// ── Edge-Markovian process ────────────────────────────────────────────────────

#[cfg(test)]
mod markov {
    use super::*;

    fn markov_graph(n: u32) -> ProximityGraph {
        let mut g = ProximityGraph::new(LinkMode::Markovian);
        // All pairwise within range → complete graph.
        g.recompute_edges(&line(n, 1.0), 1000.0);
        g
    }

    fn states(g: &ProximityGraph) -> Vec<LinkState> {
        g.edges().map(|(_, s)| s).collect()
    }

    #[test]
    fn initialize_assigns_every_fresh_edge() {
        let mut g = markov_graph(6);
        let mut rng = SimRng::new(3);
        let m = EdgeMarkov::new(MarkovParams::default());
        assert_eq!(m.initialize(&mut g, &mut rng), 15);
        assert!(states(&g).iter().all(|s| matches!(s, LinkState::On | LinkState::Off)));
    }

    #[test]
    fn stay_probability_one_freezes_states() {
        let mut g = markov_graph(8);
        let mut rng = SimRng::new(21);
        let m = EdgeMarkov::new(MarkovParams { p: 1.0, q: 1.0 });
        m.initialize(&mut g, &mut rng);
        let initial = states(&g);
        for _ in 0..50 {
            let report = m.evolve(&mut g, &mut rng);
            assert_eq!(report.flipped, 0);
        }
        assert_eq!(states(&g), initial);
    }

    #[test]
    fn stay_probability_zero_flips_every_round() {
        let mut g = markov_graph(8);
        let mut rng = SimRng::new(21);
        let m = EdgeMarkov::new(MarkovParams { p: 0.0, q: 0.0 });
        m.initialize(&mut g, &mut rng);
        for _ in 0..10 {
            let before = states(&g);
            let report = m.evolve(&mut g, &mut rng);
            assert_eq!(report.flipped, before.len());
            for (a, b) in before.iter().zip(states(&g)) {
                assert_ne!(*a, b);
            }
        }
    }

    #[test]
    fn fresh_edges_are_initialized_not_stepped() {
        let mut g = markov_graph(3);
        let mut rng = SimRng::new(2);
        let m = EdgeMarkov::new(MarkovParams { p: 0.0, q: 0.0 });
        let report = m.evolve(&mut g, &mut rng);
        assert_eq!(report.initialized, 3);
        assert_eq!(report.flipped, 0);
        assert_eq!(report.on + report.off, 3);
    }
}

// ── Analysis ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod analysis {
    use super::*;

    #[test]
    fn density_of_complete_graph_is_one() {
        let mut g = ProximityGraph::new(LinkMode::Proximity);
        g.recompute_edges(&line(5, 1.0), 100.0);
        assert_eq!(density(g.usable_edge_count(), 5), 1.0);
    }

    #[test]
    fn density_degenerate_orders() {
        assert_eq!(density(0, 0), 0.0);
        assert_eq!(density(0, 1), 0.0);
        assert_eq!(density(0, 10), 0.0);
    }

    #[test]
    fn components_of_two_clusters_and_a_loner() {
        let mut g = ProximityGraph::new(LinkMode::Proximity);
        let positions = vec![
            (StationId(0), Point::new(0.0, 0.0)),
            (StationId(1), Point::new(1.0, 0.0)),
            (StationId(2), Point::new(50.0, 0.0)),
            (StationId(3), Point::new(51.0, 0.0)),
            (StationId(4), Point::new(100.0, 100.0)),
        ];
        g.recompute_edges(&positions, 5.0);
        let ids: Vec<_> = positions.iter().map(|&(id, _)| id).collect();
        assert_eq!(connected_components(&g, &ids), 3);
    }

    #[test]
    fn off_edges_split_components() {
        let mut g = ProximityGraph::new(LinkMode::Markovian);
        g.recompute_edges(&line(3, 1.0), 1.5); // 0-1, 1-2
        g.set_state(EdgeKey::new(StationId(0), StationId(1)), LinkState::On);
        g.set_state(EdgeKey::new(StationId(1), StationId(2)), LinkState::Off);
        let ids = [StationId(0), StationId(1), StationId(2)];
        assert_eq!(connected_components(&g, &ids), 2);
        assert_eq!(density(g.usable_edge_count(), 3), 1.0 / 3.0);
    }
}
