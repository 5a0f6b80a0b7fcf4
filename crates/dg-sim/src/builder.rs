//! Fluent builder for constructing a [`Sim`].

use log::info;

use dg_core::{ConfigError, Point, Round, SimConfig, SimRng, StationId};
use dg_flood::{MessageStore, ReceptionRule};
use dg_mobility::{DynMobility, MobilityEngine, MobilityModel, MoveContext, model_for};
use dg_station::StationStoreBuilder;
use dg_topology::{EdgeMarkov, LinkMode, ProximityGraph};

use crate::{MetricsCollector, Scenario, Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M>`].
///
/// # Optional inputs (have defaults)
///
/// | Method            | Default                                          |
/// |-------------------|--------------------------------------------------|
/// | `.positions(v)`   | `config.station_count` uniform random positions  |
/// | `.source(id)`     | uniform random mobile station                    |
/// | `.with_model(m)`  | the model selected by `config.mobility`          |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default()).build()?;
/// let summary = sim.run(&mut NoopObserver);
/// ```
pub struct SimBuilder<M: MobilityModel = DynMobility> {
    config:    SimConfig,
    positions: Option<Vec<Point>>,
    source:    Option<StationId>,
    model:     M,
}

impl SimBuilder<DynMobility> {
    pub fn new(config: SimConfig) -> Self {
        let model = model_for(&config);
        Self {
            config,
            positions: None,
            source:    None,
            model,
        }
    }
}

impl<M: MobilityModel> SimBuilder<M> {
    /// Place the mobile stations at fixed positions.  Must be length
    /// `config.station_count`.
    pub fn positions(mut self, positions: Vec<Point>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Start the broadcast from `source` instead of a random station.
    pub fn source(mut self, source: StationId) -> Self {
        self.source = Some(source);
        self
    }

    /// Replace the mobility model.
    pub fn with_model<N: MobilityModel>(self, model: N) -> SimBuilder<N> {
        SimBuilder {
            config:    self.config,
            positions: self.positions,
            source:    self.source,
            model,
        }
    }

    /// Validate the configuration, place the stations, build the initial
    /// graph, pick the source, and return a sim at round 0.
    pub fn build(self) -> SimResult<Sim<M>> {
        let config = self.config;
        config.validate()?;
        let mut rng = SimRng::new(config.seed);

        // ── Stations ──────────────────────────────────────────────────────
        let mut builder = StationStoreBuilder::new(config.station_count, config.env_size);
        if let Some(positions) = self.positions {
            if positions.len() != config.station_count {
                return Err(SimError::StationCountMismatch {
                    expected: config.station_count,
                    got:      positions.len(),
                    what:     "initial positions",
                });
            }
            builder = builder.positions(positions);
        }
        let mut stations = builder.build(&mut rng);

        // ── Movement (may snap positions onto a street grid) ──────────────
        let mut mobility = MobilityEngine::new(self.model, MoveContext::from_config(&config));
        mobility.init(&mut stations, &mut rng);

        // ── Topology and link process ─────────────────────────────────────
        let mode = if config.mobility.is_markovian() {
            LinkMode::Markovian
        } else {
            LinkMode::Proximity
        };
        let mut graph = ProximityGraph::new(mode);
        graph.recompute_edges(&stations.mobile_positions(), config.connection_range);
        let markov = config.mobility.is_markovian().then(|| EdgeMarkov::new(config.markov));
        if let Some(markov) = markov {
            markov.initialize(&mut graph, &mut rng);
        }

        // ── Broadcast ─────────────────────────────────────────────────────
        let scenario = Scenario::from_kind(config.scenario);
        let mobile_ids = stations.mobile_ids();
        let mut messages = MessageStore::with_stations(mobile_ids.iter().copied());
        if config.broadcast.is_enabled() {
            let source = match self.source {
                Some(id) => id,
                None => *rng.choose(&mobile_ids).ok_or(ConfigError::NoStations)?,
            };
            if !messages.seed_source(source, scenario.acquired_lifetime()) {
                return Err(SimError::UnknownSource(source));
            }
        }

        let metrics = MetricsCollector::baseline(&stations, &graph);

        info!(
            "built sim: {} stations, {} mobility, {} scenario, {} edges, source {:?}",
            stations.mobile_count(),
            mobility.model.name(),
            scenario.name(),
            graph.edge_count(),
            messages.source()
        );

        Ok(Sim {
            config,
            round: Round::ZERO,
            stations,
            graph,
            mobility,
            messages,
            scenario,
            markov,
            metrics,
            rng,
            termination: None,
        })
    }
}
