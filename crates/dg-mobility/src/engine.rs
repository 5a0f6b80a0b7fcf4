//! Applies a [`MobilityModel`] to the whole mobile population.

use log::trace;

use dg_core::{Point, SimRng, StationId};
use dg_station::{Station, StationStore};

use crate::{MobilityModel, MobilityStore, MoveContext, MovementState, StepOutcome};

/// Per-phase counts, for logging and observers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MobilityReport {
    pub moved:    usize,
    pub arrived:  usize,
    pub rerouted: usize,
    pub idle:     usize,
}

/// Wraps a model and the per-station movement state.
///
/// # Type parameter
///
/// `M` is usually [`DynMobility`][crate::DynMobility] (chosen from the
/// configuration) but any concrete model works and is dispatched
/// statically.
pub struct MobilityEngine<M: MobilityModel> {
    pub model: M,
    pub store: MobilityStore,
    pub ctx:   MoveContext,
}

impl<M: MobilityModel> MobilityEngine<M> {
    pub fn new(model: M, ctx: MoveContext) -> Self {
        Self {
            model,
            store: MobilityStore::new(),
            ctx,
        }
    }

    /// Give every mobile station its first destination.
    pub fn init(&mut self, stations: &mut StationStore, rng: &mut SimRng) {
        for station in stations.mobile_mut() {
            self.place(station, rng);
        }
    }

    /// Enter a new station: first destination (possibly adjusting its
    /// position) and a fresh speed.
    pub fn place(&mut self, station: &mut Station, rng: &mut SimRng) {
        let destination = self.model.first_destination(&mut station.position, rng);
        let speed = self.ctx.draw_speed(rng);
        self.store.entry(station.id).retarget(destination, speed);
    }

    /// Pick a new destination and speed for each of `ids`, in order, from
    /// its current position.  Unknown ids are skipped.
    pub fn reseed(&mut self, stations: &StationStore, ids: &[StationId], rng: &mut SimRng) {
        for &id in ids {
            let Some(station) = stations.get(id) else {
                continue;
            };
            let destination = self.model.choose_destination(station.position, rng);
            let speed = self.ctx.draw_speed(rng);
            self.store.entry(id).retarget(destination, speed);
        }
    }

    /// Drop the movement state of a removed station.
    pub fn forget(&mut self, id: StationId) {
        self.store.remove(id);
    }

    /// One movement phase over every mobile station, in id order.
    ///
    /// For target-following models every station sees the positions as of
    /// the start of the phase.
    pub fn advance(&mut self, stations: &mut StationStore, rng: &mut SimRng) -> MobilityReport {
        let mut report = MobilityReport::default();
        let snapshot = self.model.follows_targets().then(|| stations.mobile_positions());
        for station in stations.mobile_mut() {
            let state = self.store.entry(station.id);
            if let Some(positions) = &snapshot {
                track_target(&self.model, station.id, state, positions, rng);
            }
            match self.model.step(&mut station.position, state, &self.ctx, rng) {
                StepOutcome::Moved    => report.moved += 1,
                StepOutcome::Arrived  => report.arrived += 1,
                StepOutcome::Rerouted => report.rerouted += 1,
                StepOutcome::Idle     => report.idle += 1,
            }
        }
        trace!(
            "{} movement: {} moved, {} arrived, {} rerouted, {} idle",
            self.model.name(), report.moved, report.arrived, report.rerouted, report.idle
        );
        report
    }
}

/// Point `state.destination` at the followed station's position.
///
/// A station without a target, or whose target has left the simulation,
/// draws a new one.  Arrived stations are left alone.
fn track_target<M: MobilityModel>(
    model:     &M,
    id:        StationId,
    state:     &mut MovementState,
    positions: &[(StationId, Point)],
    rng:       &mut SimRng,
) {
    if state.arrived {
        return;
    }
    let lookup = |target: StationId| {
        positions
            .binary_search_by_key(&target, |&(other, _)| other)
            .ok()
            .map(|i| positions[i].1)
    };
    let mut destination = state.target.and_then(lookup);
    if destination.is_none() {
        let candidates: Vec<StationId> = positions.iter().map(|&(other, _)| other).collect();
        state.target = model.choose_target(id, &candidates, rng);
        destination = state.target.and_then(lookup);
    }
    state.destination = destination;
}
