//! The `Sim` struct and its round loop.

use log::{debug, info};

use dg_core::{Round, SimConfig, SimRng, StationId};
use dg_flood::{BroadcastSummary, FloodReport, MessageStore, expire_lifetimes, flood_round};
use dg_mobility::{DynMobility, MobilityEngine, MobilityModel};
use dg_station::StationStore;
use dg_topology::{EdgeMarkov, ProximityGraph};

use crate::{
    EdgeView, MetricsCollector, Perturbation, RoundMetrics, Scenario, SimObserver, StationView,
    visual_tag,
};

/// Why a run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Termination {
    /// No station is left pending.
    FloodComplete,
    /// `config.max_rounds` reached.
    RoundCap,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<M>` owns all run state and drives one round at a time through a
/// fixed phase order:
///
/// 1. **Flood**: every pending station transmits once over usable edges.
/// 2. **Move**: every mobile station takes one movement step.
/// 3. **Topology**: the proximity graph is rebuilt from the new positions.
/// 4. **Perturb**: TTL countdown or churn, per the scenario.
/// 5. **Link process**: the edge-Markovian chain steps (Markovian only).
/// 6. **Metrics**: density, reachability, nervousness, components.
/// 7. **Termination**: flood complete or round cap.
///
/// Each phase completes before the next starts.  Create via
/// [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: MobilityModel = DynMobility> {
    pub config: SimConfig,

    pub(crate) round: Round,

    /// Mobile stations and corner anchors.
    pub stations: StationStore,

    /// Links between mobile stations.
    pub graph: ProximityGraph,

    pub mobility: MobilityEngine<M>,

    /// Message state of every mobile station.
    pub messages: MessageStore,

    pub scenario: Scenario,

    /// `Some` only for the edge-Markovian model.
    pub(crate) markov: Option<EdgeMarkov>,

    pub(crate) metrics: MetricsCollector,

    /// The single run RNG, threaded into every random phase.
    pub(crate) rng: SimRng,

    pub(crate) termination: Option<Termination>,
}

impl<M: MobilityModel> Sim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// The last completed round (`R0` before the first).
    #[inline]
    pub fn round(&self) -> Round {
        self.round
    }

    #[inline]
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.termination.is_some()
    }

    /// Run until the flood completes or the round cap is hit.
    ///
    /// Calls observer hooks at every round boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> BroadcastSummary {
        info!("run started at {}", self.round);
        while !self.is_finished() {
            self.observed_round(observer);
        }
        let summary = self.summary();
        observer.on_sim_end(self.round, &summary);
        info!("run finished at {} ({:?}): {summary}", self.round, self.termination);
        summary
    }

    /// Run exactly `n` rounds from the current one, ignoring termination.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_rounds<O: SimObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            self.observed_round(observer);
        }
    }

    /// Performance and efficiency as of now.
    pub fn summary(&self) -> BroadcastSummary {
        BroadcastSummary::from_store(&self.messages, self.stations.mobile_count(), self.round)
    }

    /// Every station with its visual tag, in id order.
    pub fn station_views(&self) -> Vec<StationView> {
        self.stations
            .iter()
            .map(|s| StationView {
                id:       s.id,
                position: s.position,
                tag:      visual_tag(s, self.messages.get(s.id)),
            })
            .collect()
    }

    /// Every edge with its endpoints' positions and usability.
    pub fn edge_views(&self) -> Vec<EdgeView> {
        self.graph
            .edges()
            .filter_map(|(key, state)| {
                let (u, v) = key.endpoints();
                let from = self.stations.get(u)?.position;
                let to = self.stations.get(v)?.position;
                Some(EdgeView { key, from, to, usable: state.is_usable() })
            })
            .collect()
    }

    // ── Core round processing ─────────────────────────────────────────────

    fn observed_round<O: SimObserver>(&mut self, observer: &mut O) {
        observer.on_round_start(self.round.next());
        let metrics = self.advance_round();
        observer.on_round_end(metrics.round, &metrics);
        if self.round.is_multiple_of(self.config.output_interval_rounds) {
            observer.on_snapshot(self.round, &self.stations, &self.messages);
        }
    }

    /// Execute one full round and return its metrics.
    ///
    /// Runs even after termination; callers that respect termination check
    /// [`is_finished`][Self::is_finished] first.
    pub fn advance_round(&mut self) -> RoundMetrics {
        self.round = self.round.next();
        let round = self.round;

        // ── Phase 1: flood ────────────────────────────────────────────────
        let flood = if self.config.broadcast.is_enabled() {
            flood_round(&mut self.messages, &self.graph, &self.scenario)
        } else {
            FloodReport::default()
        };

        // ── Phase 2: move ─────────────────────────────────────────────────
        let movement = self.mobility.advance(&mut self.stations, &mut self.rng);

        // ── Phase 3: rebuild topology ─────────────────────────────────────
        //
        // All distance checks run against one position snapshot before any
        // edge is added or removed.
        let diff = self
            .graph
            .recompute_edges(&self.stations.mobile_positions(), self.config.connection_range);

        // ── Phase 4: scenario perturbation ────────────────────────────────
        let perturbation = self.perturb(&flood.acquired);

        // ── Phase 5: edge-state process ───────────────────────────────────
        if let Some(markov) = self.markov {
            markov.evolve(&mut self.graph, &mut self.rng);
        }

        // ── Phase 6: metrics ──────────────────────────────────────────────
        let metrics = self.metrics.collect(
            round,
            &self.stations,
            &self.graph,
            &self.messages,
            &flood,
            &perturbation,
        );

        // ── Phase 7: termination ──────────────────────────────────────────
        self.termination = self.check_termination();

        debug!(
            "{round}: flood {}/{}/{}, moved {} arrived {}, edges +{} -{}, reach {}, density {:.4}, components {}",
            metrics.transmitters,
            metrics.acquisitions,
            metrics.duplicates,
            movement.moved,
            movement.arrived,
            diff.added.len(),
            diff.removed.len(),
            metrics.reachability,
            metrics.density,
            metrics.components,
        );
        metrics
    }

    /// Apply the scenario hook.  `acquired` are this round's new holders,
    /// which the TTL countdown skips.
    fn perturb(&mut self, acquired: &[StationId]) -> Perturbation {
        match self.scenario {
            Scenario::Plain => Perturbation::None,
            Scenario::TimeToLive(_) => {
                Perturbation::Expired(expire_lifetimes(&mut self.messages, acquired))
            }
            Scenario::Churn(churn) => Perturbation::Churn(churn.apply(
                &mut self.stations,
                &mut self.graph,
                &mut self.mobility,
                &mut self.messages,
                self.config.connection_range,
                &mut self.rng,
            )),
        }
    }

    fn check_termination(&self) -> Option<Termination> {
        if self.config.broadcast.is_enabled() && !self.messages.has_pending() {
            return Some(Termination::FloodComplete);
        }
        let cap = self.config.max_rounds;
        if cap > 0 && self.round.0 >= cap {
            return Some(Termination::RoundCap);
        }
        None
    }
}
