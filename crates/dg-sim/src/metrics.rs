//! Per-round network metrics.
//!
//! All measures are over the mobile stations; anchors never count.  "Usable"
//! edges are every edge under proximity-only links and the `on` edges under
//! the edge-Markovian process.
//!
//! | Metric             | Definition                                         |
//! |--------------------|----------------------------------------------------|
//! | density            | `2·|E| / (n(n−1))`, `0` when `n < 2`               |
//! | reachability       | stations holding the message                       |
//! | vertex nervousness | `|V_t ⊕ V_{t−1}| / |V_t ∪ V_{t−1}|`                |
//! | edge nervousness   | same over the usable edge sets                     |
//! | components         | connected components over usable edges             |
//!
//! Nervousness is `0` when both sets are empty; the record's
//! [`DegenerateFlags`] says when a value is such a sentinel.

use std::hash::Hash;

use rustc_hash::FxHashSet;

use dg_core::{Round, StationId};
use dg_flood::{FloodReport, MessageStore};
use dg_station::StationStore;
use dg_topology::{EdgeKey, ProximityGraph, connected_components, density};

use crate::Perturbation;

/// Which values of a [`RoundMetrics`] are sentinels rather than measures.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DegenerateFlags {
    /// Fewer than two stations: density forced to `0`.
    pub density_undefined:        bool,
    /// Both vertex sets empty: vertex nervousness forced to `0`.
    pub vertex_nervousness_empty: bool,
    /// Both edge sets empty: edge nervousness forced to `0`.
    pub edge_nervousness_empty:   bool,
}

impl DegenerateFlags {
    pub fn any(&self) -> bool {
        self.density_undefined || self.vertex_nervousness_empty || self.edge_nervousness_empty
    }
}

/// Everything measured at the end of one round.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundMetrics {
    pub round:              Round,
    /// Mobile stations.
    pub station_count:      usize,
    pub usable_edges:       usize,
    pub density:            f64,
    /// Stations holding the message.
    pub reachability:       usize,
    pub vertex_nervousness: f64,
    pub edge_nervousness:   f64,
    pub components:         usize,
    /// Stations that transmitted this round.
    pub transmitters:       usize,
    /// New holders this round.
    pub acquisitions:       usize,
    pub duplicates:         usize,
    /// Messages dropped by TTL expiry this round.
    pub expired:            usize,
    /// Stations replaced by churn this round.
    pub churned:            usize,
    pub flags:              DegenerateFlags,
}

/// `|a ⊕ b| / |a ∪ b|`, or `None` when both sets are empty.
pub fn nervousness<T: Eq + Hash>(current: &FxHashSet<T>, previous: &FxHashSet<T>) -> Option<f64> {
    let common = current.intersection(previous).count();
    let union = current.len() + previous.len() - common;
    if union == 0 {
        return None;
    }
    let sym_diff = union - common;
    Some(sym_diff as f64 / union as f64)
}

/// Computes [`RoundMetrics`] and remembers last round's vertex and edge
/// sets for nervousness.
#[derive(Debug, Default)]
pub struct MetricsCollector {
    previous_vertices: FxHashSet<StationId>,
    previous_edges:    FxHashSet<EdgeKey>,
}

impl MetricsCollector {
    /// A collector whose "previous round" is the current state (round 0).
    pub fn baseline(stations: &StationStore, graph: &ProximityGraph) -> Self {
        Self {
            previous_vertices: stations.mobile().map(|s| s.id).collect(),
            previous_edges:    graph.usable_edges().collect(),
        }
    }

    pub fn collect(
        &mut self,
        round:        Round,
        stations:     &StationStore,
        graph:        &ProximityGraph,
        messages:     &MessageStore,
        flood:        &FloodReport,
        perturbation: &Perturbation,
    ) -> RoundMetrics {
        let ids = stations.mobile_ids();
        let vertices: FxHashSet<StationId> = ids.iter().copied().collect();
        let edges: FxHashSet<EdgeKey> = graph.usable_edges().collect();
        let n = ids.len();

        let vertex_nerv = nervousness(&vertices, &self.previous_vertices);
        let edge_nerv = nervousness(&edges, &self.previous_edges);
        let flags = DegenerateFlags {
            density_undefined:        n < 2,
            vertex_nervousness_empty: vertex_nerv.is_none(),
            edge_nervousness_empty:   edge_nerv.is_none(),
        };

        let metrics = RoundMetrics {
            round,
            station_count:      n,
            usable_edges:       edges.len(),
            density:            density(edges.len(), n),
            reachability:       messages.reached_count(),
            vertex_nervousness: vertex_nerv.unwrap_or(0.0),
            edge_nervousness:   edge_nerv.unwrap_or(0.0),
            components:         connected_components(graph, &ids),
            transmitters:       flood.transmitters,
            acquisitions:       flood.acquired.len(),
            duplicates:         flood.duplicates,
            expired:            perturbation.expired_count(),
            churned:            perturbation.churned_count(),
            flags,
        };

        self.previous_vertices = vertices;
        self.previous_edges = edges;
        metrics
    }
}
